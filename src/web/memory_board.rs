//! Memory board on the valentine page.
//!
//! Owns one [`MemoryGame`] plus the card elements rendered for it. Clicks go to
//! `MemoryGame::activate`; the engine's pending deadline is mirrored by a single
//! one-shot [`Timeout`] that calls `MemoryGame::advance` when it fires. Card
//! listeners and timers hold `Weak` handles so dropping the board tears
//! everything down.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::ambient::{self, HeartEmitter};
use super::{document, element_by_id, now_ms, required_element};
use crate::config::PageConfig;
use crate::memory::{GameEvent, MemoryGame, Tile, TileFace};

type SharedBoard = Rc<RefCell<MemoryBoard>>;

thread_local! {
    static BOARD: RefCell<Option<SharedBoard>> = const { RefCell::new(None) };
}

struct MemoryBoard {
    container: Element,
    secret: Option<HtmlElement>,
    game: MemoryGame,
    rng: StdRng,
    cards: Vec<HtmlElement>,
    listeners: Vec<EventListener>,
    timer: Option<Timeout>,
    hearts: Rc<RefCell<HeartEmitter>>,
    celebration_hearts: usize,
    heart_interval_ms: u32,
}

pub(super) fn install(
    config: &PageConfig,
    hearts: Rc<RefCell<HeartEmitter>>,
) -> Result<(), JsValue> {
    let doc = document()?;
    let Some(container) = required_element::<Element>(&doc, &config.board_id, "memory") else {
        return Ok(());
    };
    let secret = element_by_id::<HtmlElement>(&doc, &config.secret_id);

    let board = Rc::new(RefCell::new(MemoryBoard {
        container,
        secret,
        game: MemoryGame::default(),
        rng: StdRng::from_entropy(),
        cards: Vec::new(),
        listeners: Vec::new(),
        timer: None,
        hearts,
        celebration_hearts: config.celebration_hearts,
        heart_interval_ms: config.heart_interval_ms,
    }));
    setup(&board)?;
    BOARD.with(|slot| slot.replace(Some(board)));
    Ok(())
}

/// Re-deal the installed board. No-op on pages without one.
pub(super) fn reset() -> Result<(), JsValue> {
    let Some(board) = BOARD.with(|slot| slot.borrow().clone()) else {
        return Ok(());
    };
    setup(&board)
}

#[cfg(feature = "serde_json")]
pub(super) fn snapshot() -> Option<crate::memory::GameSnapshot> {
    BOARD.with(|slot| slot.borrow().as_ref().map(|b| b.borrow().game.snapshot()))
}

fn setup(board: &SharedBoard) -> Result<(), JsValue> {
    let doc = document()?;
    let mut guard = board.borrow_mut();
    let b = &mut *guard;

    // Dropping these cancels the old deal's timer and detaches its listeners.
    b.timer = None;
    b.listeners.clear();
    b.cards.clear();
    b.container.set_inner_html("");

    b.game.setup(&mut b.rng);
    for (index, tile) in b.game.tiles().iter().enumerate() {
        let card: HtmlElement = doc.create_element("div")?.dyn_into()?;
        card.set_class_name("memory-card glow");
        card.set_attribute("role", "button")?;
        card.set_attribute("aria-label", "Memory card")?;
        sync_card(&card, tile)?;
        b.container.append_child(&card)?;

        let weak = Rc::downgrade(board);
        b.listeners.push(EventListener::new(&card, "click", move |_event: &Event| {
            on_activate(&weak, index);
        }));
        b.cards.push(card);
    }
    console::log!(format!("memory: dealt generation {}", b.game.generation()));
    Ok(())
}

fn on_activate(board: &Weak<RefCell<MemoryBoard>>, index: usize) {
    let Some(board) = board.upgrade() else {
        return;
    };
    let events = board.borrow_mut().game.activate(index, now_ms());
    apply(&board, &events);
}

fn on_timer(board: &Weak<RefCell<MemoryBoard>>) {
    let Some(board) = board.upgrade() else {
        return;
    };
    let events = board.borrow_mut().game.advance(now_ms());
    apply(&board, &events);
}

/// Render the tiles touched by `events`, run the win reveal, then re-arm the
/// timer for whatever the engine still has pending.
fn apply(board: &SharedBoard, events: &[GameEvent]) {
    let mut won = false;
    {
        let b = board.borrow();
        for event in events {
            let touched = match *event {
                GameEvent::Flipped { index, .. } => vec![index],
                GameEvent::Matched { first, second, .. }
                | GameEvent::Mismatched { first, second } => vec![first, second],
                GameEvent::Won { .. } => {
                    won = true;
                    Vec::new()
                }
            };
            for i in touched {
                if let (Some(card), Some(tile)) = (b.cards.get(i), b.game.tile(i)) {
                    if let Err(err) = sync_card(card, tile) {
                        console::warn!("memory: render failed", err);
                    }
                }
            }
        }
    }
    if won {
        unlock_secret(board);
    }
    arm_timer(board);
}

fn arm_timer(board: &SharedBoard) {
    let mut b = board.borrow_mut();
    let Some(deadline) = b.game.next_deadline() else {
        b.timer = None;
        return;
    };
    let delay = (deadline - now_ms()).max(0.0).ceil() as u32;
    let weak = Rc::downgrade(board);
    b.timer = Some(Timeout::new(delay, move || on_timer(&weak)));
}

fn sync_card(card: &HtmlElement, tile: &Tile) -> Result<(), JsValue> {
    let classes = card.class_list();
    let active = tile.face.css_classes();
    for class in TileFace::CSS_CLASSES {
        classes.toggle_with_force(class, active.contains(&class))?;
    }
    card.set_inner_text(tile.display_symbol());
    if tile.is_interactive() {
        card.style().remove_property("pointer-events")?;
    } else {
        card.style().set_property("pointer-events", "none")?;
    }
    Ok(())
}

fn unlock_secret(board: &SharedBoard) {
    let (secret, hearts, count, interval_ms) = {
        let b = board.borrow();
        (
            b.secret.clone(),
            b.hearts.clone(),
            b.celebration_hearts,
            b.heart_interval_ms,
        )
    };
    match secret {
        Some(secret) => {
            let _ = secret.class_list().add_1("unlocked");
            let _ = secret.set_attribute("aria-hidden", "false");
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Center);
            secret.scroll_into_view_with_scroll_into_view_options(&opts);
        }
        None => console::warn!("memory: secret message not found, skipping reveal"),
    }
    console::log!("memory: all pairs found");
    ambient::celebrate(&hearts, count, interval_ms);
}
