//! Evasive control placement.
//!
//! Every time the pointer (or a finger) reaches the evasive control it jumps to
//! a random on-screen spot that keeps clear of the target control, shows the
//! next taunt and makes the target a little bigger and brighter.
//!
//! The search is bounded: after `max_attempts` overlapping samples the last
//! sample is kept, so a cramped viewport degrades to overlap instead of
//! hanging the page. The final clamp always keeps the whole control inside the
//! viewport.

use rand::Rng;

use crate::TAUNTS;
use crate::config::PlacerConfig;
use crate::geometry::{Point, Rect, Size};

/// Visual weight applied to the target control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emphasis {
    pub scale: f64,
    pub glow_px: f64,
}

impl Emphasis {
    pub fn transform_css(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn box_shadow_css(&self) -> String {
        format!("0 0 {}px rgba(233, 30, 99, 0.6)", self.glow_px)
    }
}

/// Outcome of one evasion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Top-left of the control, inside `[0, viewport - control]` on both axes.
    pub position: Point,
    pub taunt: &'static str,
    pub emphasis: Emphasis,
    /// Samples drawn, including the accepted one.
    pub attempts: u32,
    /// The final position covers part of the target. Happens when every sample
    /// overlapped, or when the hard clamp pushed an accepted sample back onto it.
    pub overlaps_target: bool,
}

#[derive(Clone, Debug)]
pub struct EvasivePlacer {
    config: PlacerConfig,
    taunt_idx: usize,
    scale: f64,
    calls: u64,
}

impl Default for EvasivePlacer {
    fn default() -> Self {
        Self::new(PlacerConfig::default())
    }
}

impl EvasivePlacer {
    pub fn new(config: PlacerConfig) -> Self {
        Self {
            config,
            taunt_idx: 0,
            scale: 1.0,
            calls: 0,
        }
    }

    /// Taunt the next call will show. Hosts put it on the control before
    /// measuring it, since the text drives the control's size.
    pub fn next_taunt(&self) -> &'static str {
        TAUNTS[self.taunt_idx]
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Pick a new top-left for a control of size `control` inside `viewport`,
    /// avoiding `target`. Inputs are read fresh by the caller on every attempt
    /// since zoom, resize and the growing target all shift the layout.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        viewport: Size,
        control: Size,
        target: Rect,
        rng: &mut R,
    ) -> Placement {
        let taunt = TAUNTS[self.taunt_idx];
        self.taunt_idx = (self.taunt_idx + 1) % TAUNTS.len();
        self.calls += 1;

        let (position, attempts, overlaps_target) = self.search(viewport, control, target, rng);

        let glow_px = self.config.glow_base + self.scale * self.config.glow_per_scale;
        self.scale += self.config.scale_step;

        Placement {
            position,
            taunt,
            emphasis: Emphasis {
                scale: self.scale,
                glow_px,
            },
            attempts,
            overlaps_target,
        }
    }

    fn search<R: Rng + ?Sized>(
        &self,
        viewport: Size,
        control: Size,
        target: Rect,
        rng: &mut R,
    ) -> (Point, u32, bool) {
        let pad = self.config.inset_padding;
        let max_x = (viewport.width - control.width).max(0.0);
        let max_y = (viewport.height - control.height).max(0.0);
        // Padding never inverts the range; a tiny viewport collapses it to a point.
        let range_x = (max_x - pad * 2.0).max(0.0);
        let range_y = (max_y - pad * 2.0).max(0.0);

        let cap = self.config.max_attempts.max(1);
        let mut candidate = Point::default();
        let mut attempts = 0;
        let mut overlaps = true;
        while attempts < cap {
            attempts += 1;
            candidate = Point::new(
                pad + rng.r#gen::<f64>() * range_x,
                pad + rng.r#gen::<f64>() * range_y,
            );
            overlaps = Rect::from_origin_size(candidate, control).overlaps(&target);
            if !overlaps {
                break;
            }
        }

        let clamped = clamp_into(candidate, viewport, control);
        // Clamping can move the control back onto the target.
        if clamped != candidate {
            overlaps = Rect::from_origin_size(clamped, control).overlaps(&target);
        }
        (clamped, attempts, overlaps)
    }
}

/// Force a top-left into `[0, viewport - control]`. When the control is larger
/// than the viewport the coordinate pins to 0.
pub fn clamp_into(p: Point, viewport: Size, control: Size) -> Point {
    Point::new(
        p.x.min(viewport.width - control.width).max(0.0),
        p.y.min(viewport.height - control.height).max(0.0),
    )
}
