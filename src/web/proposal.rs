// Proposal page: evasive "No" button, growing "Yes" button.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, Window};

use super::{browser_window, document, element_by_id, required_element};
use crate::config::PageConfig;
use crate::geometry::{Rect, Size};
use crate::placer::EvasivePlacer;

struct Proposal {
    evasive: HtmlElement,
    target: HtmlElement,
    placer: EvasivePlacer,
    rng: StdRng,
    /// The control is moved under `<body>` on first use so `position: fixed`
    /// is relative to the viewport rather than a transformed ancestor.
    reparented: bool,
}

pub(super) fn install(config: &PageConfig) -> Result<(), JsValue> {
    let doc = document()?;
    // Every page runs this on load; without a target this is not the proposal page.
    let Some(target) = element_by_id::<HtmlElement>(&doc, &config.target_id) else {
        return Ok(());
    };

    let destination = config.destination.clone();
    EventListener::new(&target, "click", move |_event: &Event| {
        if let Some(win) = web_sys::window() {
            if let Err(err) = win.location().set_href(&destination) {
                console::warn!("proposal: navigation failed", err);
            }
        }
    })
    .forget();

    let Some(evasive) = required_element::<HtmlElement>(&doc, &config.evasive_id, "proposal")
    else {
        return Ok(());
    };

    let state = Rc::new(RefCell::new(Proposal {
        evasive: evasive.clone(),
        target,
        placer: EvasivePlacer::default(),
        rng: StdRng::from_entropy(),
        reparented: false,
    }));

    let hover_state = state.clone();
    EventListener::new(&evasive, "mouseover", move |_event: &Event| {
        on_control_enter(&hover_state);
    })
    .forget();

    // Non-passive so the synthetic click after a tap can be suppressed.
    let touch_state = state;
    EventListener::new_with_options(
        &evasive,
        "touchstart",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            event.prevent_default();
            on_control_enter(&touch_state);
        },
    )
    .forget();

    console::log!("proposal: ready");
    Ok(())
}

fn on_control_enter(state: &Rc<RefCell<Proposal>>) {
    if let Err(err) = state.borrow_mut().evade() {
        console::warn!("proposal: evade failed", err);
    }
}

impl Proposal {
    fn evade(&mut self) -> Result<(), JsValue> {
        let win = browser_window()?;
        if !self.reparented {
            if let Some(body) = win.document().and_then(|d| d.body()) {
                body.append_child(&self.evasive)?;
            }
            self.reparented = true;
        }

        // Text first: it determines the control's measured size.
        self.evasive.set_inner_text(self.placer.next_taunt());

        let viewport = viewport_size(&win);
        let control = Size::new(
            self.evasive.offset_width() as f64,
            self.evasive.offset_height() as f64,
        );
        let r = self.target.get_bounding_client_rect();
        let target = Rect::new(r.left(), r.top(), r.right(), r.bottom());

        let placement = self
            .placer
            .place(viewport, control, target, &mut self.rng);

        let style = self.evasive.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", &format!("{}px", placement.position.x))?;
        style.set_property("top", &format!("{}px", placement.position.y))?;
        style.set_property("margin", "0")?;
        style.set_property("transform", "none")?;

        let target_style = self.target.style();
        target_style.set_property("transform", &placement.emphasis.transform_css())?;
        target_style.set_property("box-shadow", &placement.emphasis.box_shadow_css())?;
        Ok(())
    }
}

/// Visible area, which tracks pinch zoom and mobile browser chrome; falls back
/// to the layout viewport when `visualViewport` is unavailable.
fn viewport_size(win: &Window) -> Size {
    if let Some(vp) = win.visual_viewport() {
        return Size::new(vp.width(), vp.height());
    }
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}
