//! Tunables for the proposal and valentine pages.
//!
//! Everything here is compile-time; the page has no environment or storage to
//! read configuration from. Enable the `serde` feature to (de)serialize these
//! structs, e.g. when a host page wants to inject overrides as JSON.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evasive control placement parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacerConfig {
    /// Inset kept free on both ends of each axis when sampling.
    pub inset_padding: f64,
    /// Rejected samples tolerated before the last one is accepted anyway.
    pub max_attempts: u32,
    /// Added to the target's scale on every evasion.
    pub scale_step: f64,
    pub glow_base: f64,
    pub glow_per_scale: f64,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            inset_padding: 20.0,
            max_attempts: 500,
            scale_step: 0.15,
            glow_base: 15.0,
            glow_per_scale: 5.0,
        }
    }
}

/// Pacing of the memory game. Both delays are user-visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemoryConfig {
    /// Time both flipped symbols stay visible before the pair is resolved.
    pub resolve_delay_ms: u32,
    /// Gap between the final match and the win reveal.
    pub win_delay_ms: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            resolve_delay_ms: 600,
            win_delay_ms: 400,
        }
    }
}

/// Calendar date the counter measures from (local time, month is 0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnchorDate {
    pub year: u32,
    pub month_index: u32,
    pub day: u32,
}

/// DOM hooks and ambient effect settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageConfig {
    pub evasive_id: String,
    pub target_id: String,
    pub destination: String,
    pub board_id: String,
    pub secret_id: String,
    pub timer_id: String,
    pub music_id: String,
    pub music_toggle_id: String,
    pub cursor_id: String,
    pub reveal_selector: String,
    pub reveal_threshold: f64,
    pub anchor: AnchorDate,
    pub counter_interval_ms: u32,
    pub heart_interval_ms: u32,
    pub heart_cap: usize,
    pub celebration_hearts: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            evasive_id: "no-btn".into(),
            target_id: "yes-btn".into(),
            destination: "valentine.html".into(),
            board_id: "memory-game".into(),
            secret_id: "secret-message".into(),
            timer_id: "timer".into(),
            music_id: "bg-music".into(),
            music_toggle_id: "music-toggle".into(),
            cursor_id: "cursor-heart".into(),
            reveal_selector: ".scroll-trigger".into(),
            reveal_threshold: 0.2,
            anchor: AnchorDate {
                year: 2025,
                month_index: 5,
                day: 1,
            },
            counter_interval_ms: 1000,
            heart_interval_ms: 600,
            heart_cap: 48,
            celebration_hearts: 12,
        }
    }
}
