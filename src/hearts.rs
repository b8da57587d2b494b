//! Floating hearts: randomized heart parameters and a bounded live count.
//!
//! The page keeps one emitter running. A win asks for a celebratory burst on
//! top of it; the burst goes through the same cap, so repeated wins can never
//! pile up an unbounded number of animated elements.

use rand::Rng;

/// Parameters for one rising heart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSpec {
    /// Horizontal start, in `vw`.
    pub left_vw: f64,
    pub font_px: f64,
    pub opacity: f64,
    pub blur_px: f64,
    pub duration_ms: f64,
    /// Rotation reached at the top, in degrees.
    pub spin_deg: f64,
}

impl HeartSpec {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left_vw: rng.gen_range(0.0..100.0),
            font_px: rng.gen_range(15.0..30.0),
            opacity: rng.gen_range(0.3..0.8),
            blur_px: rng.gen_range(0.0..2.0),
            duration_ms: rng.gen_range(6_000.0..11_000.0),
            spin_deg: rng.gen_range(0.0..360.0),
        }
    }

    /// Inline style for the heart at its starting position.
    pub fn style(&self) -> String {
        format!(
            "position:fixed; left:{}vw; top:105vh; font-size:{}px; z-index:0; \
             pointer-events:none; opacity:{}; filter:blur({}px);",
            self.left_vw, self.font_px, self.opacity, self.blur_px
        )
    }
}

#[derive(Clone, Debug)]
pub struct HeartField {
    cap: usize,
    live: usize,
    running: bool,
}

impl HeartField {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            live: 0,
            running: false,
        }
    }

    /// Mark the emitter as started. Returns false if it already was.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn live(&self) -> usize {
        self.live
    }

    /// Reserve a slot for a new heart, or `None` when the field is full.
    pub fn try_spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<HeartSpec> {
        if self.live >= self.cap {
            return None;
        }
        self.live += 1;
        Some(HeartSpec::random(rng))
    }

    /// Release a slot once a heart's animation has finished.
    pub fn despawn(&mut self) {
        self.live = self.live.saturating_sub(1);
    }

    /// Up to `count` extra hearts, limited by the free slots.
    pub fn celebrate<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Vec<HeartSpec> {
        (0..count).map_while(|_| self.try_spawn(rng)).collect()
    }
}
