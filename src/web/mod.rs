//! DOM glue: turns browser events into calls on the game logic and applies the
//! results back to the page. Every feature looks up its own elements and is
//! skipped when they are not on the current page. Hooks checked on every load
//! stay quiet; features of a page that did load warn about what is missing.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window, window};

use crate::config::PageConfig;

mod ambient;
mod memory_board;
mod proposal;

use ambient::HeartEmitter;

thread_local! {
    static HEARTS: RefCell<Option<Rc<RefCell<HeartEmitter>>>> = const { RefCell::new(None) };
}

pub(crate) fn boot() -> Result<(), JsValue> {
    let config = PageConfig::default();
    ambient::install_cursor(&config)?;
    proposal::install(&config)?;
    ambient::install_music_toggle(&config)?;
    Ok(())
}

pub(crate) fn start_proposal_page() -> Result<(), JsValue> {
    proposal::install(&PageConfig::default())
}

pub(crate) fn start_valentine_page() -> Result<(), JsValue> {
    let config = PageConfig::default();
    console::log!("valentine page: start");
    ambient::install_counter(&config)?;
    let hearts = heart_emitter(&config);
    memory_board::install(&config, hearts.clone())?;
    ambient::start_hearts(&hearts, config.heart_interval_ms);
    ambient::install_scroll_reveal(&config)?;
    ambient::autoplay_music(&config);
    Ok(())
}

pub(crate) fn reset_memory_game() -> Result<(), JsValue> {
    memory_board::reset()
}

#[cfg(feature = "serde_json")]
pub(crate) fn memory_snapshot() -> Option<crate::memory::GameSnapshot> {
    memory_board::snapshot()
}

/// The page-wide heart emitter, created on first use.
fn heart_emitter(config: &PageConfig) -> Rc<RefCell<HeartEmitter>> {
    HEARTS.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Rc::new(RefCell::new(HeartEmitter::new(config.heart_cap))))
            .clone()
    })
}

fn browser_window() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<Document, JsValue> {
    browser_window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, cast to `T`. `None` when missing or of another type.
fn element_by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Same as [`element_by_id`] but logs that the dependent feature is off.
fn required_element<T: JsCast>(doc: &Document, id: &str, feature: &str) -> Option<T> {
    let found = element_by_id::<T>(doc, id);
    if found.is_none() {
        console::warn!(format!("{feature}: #{id} not found, skipping"));
    }
    found
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
