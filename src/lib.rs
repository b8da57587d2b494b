//! Be My Valentine core crate.
//!
//! Two small pages share this crate. The proposal page has a "No" button that
//! runs away from the pointer and a "Yes" button that keeps growing. The
//! valentine page has an anniversary counter, a memory-matching game that
//! unlocks a secret message, floating hearts, scroll reveals and background
//! music. Game logic lives in plain modules that build and test natively; the
//! DOM wiring in `web` is only compiled for wasm32.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod counter;
pub mod geometry;
pub mod hearts;
pub mod memory;
pub mod music;
pub mod placer;

#[cfg(target_arch = "wasm32")]
mod web;

pub use geometry::{Point, Rect, Size};
pub use memory::{GameEvent, GamePhase, MemoryGame, Tile, TileFace};
pub use placer::{EvasivePlacer, Placement};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// -----------------------------------------------------------------------------
// Shared datasets
// -----------------------------------------------------------------------------

/// Messages shown on the evasive button, one per escape, cycling.
pub const TAUNTS: &[&str] = &[
    "Are you sure?",
    "Really?",
    "Think again! 🥺",
    "Last chance!",
    "Try again! ❤️",
    "Don't break my heart!",
];

/// Six distinct card faces; each is dealt twice.
pub const MEMORY_SYMBOLS: &[&str] = &["❤️", "💖", "✨", "🌹", "💑", "💌"];

// -----------------------------------------------------------------------------
// Browser entrypoints
// -----------------------------------------------------------------------------

/// Runs on module load: panic hook plus the wiring every page shares
/// (cursor heart, proposal buttons, music toggle). Absent elements are skipped.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web::boot()
}

/// Wire the proposal buttons. Already done on load; call this only when the
/// buttons are inserted after the module started.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_proposal_page() -> Result<(), JsValue> {
    web::start_proposal_page()
}

/// Called by the valentine page once its markup is in place.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_valentine_page() -> Result<(), JsValue> {
    web::start_valentine_page()
}

/// Deal a fresh memory board, discarding the current game.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn reset_memory_game() -> Result<(), JsValue> {
    web::reset_memory_game()
}

/// Current memory game as JSON, or `None` before the valentine page started.
#[cfg(all(target_arch = "wasm32", feature = "serde_json"))]
#[wasm_bindgen]
pub fn memory_snapshot_json() -> Option<String> {
    web::memory_snapshot().and_then(|snap| serde_json::to_string(&snap).ok())
}
