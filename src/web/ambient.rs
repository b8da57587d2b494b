// Page ambience: cursor heart, floating hearts, counter, scroll reveal, music.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use js_sys::{Array, Date, Object, Reflect};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, HtmlAudioElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
};

use super::{document, element_by_id, required_element};
use crate::config::PageConfig;
use crate::counter::Elapsed;
use crate::hearts::{HeartField, HeartSpec};
use crate::music::MusicAction;

// --- Cursor heart -----------------------------------------------------------

pub(super) fn install_cursor(config: &PageConfig) -> Result<(), JsValue> {
    let doc = document()?;
    // Decorative and optional on every page; no warning when absent.
    let Some(cursor) = element_by_id::<HtmlElement>(&doc, &config.cursor_id) else {
        return Ok(());
    };
    EventListener::new(&doc, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let style = cursor.style();
        let _ = style.set_property("left", &format!("{}px", event.client_x()));
        let _ = style.set_property("top", &format!("{}px", event.client_y()));
    })
    .forget();
    Ok(())
}

// --- Floating hearts --------------------------------------------------------

pub(crate) struct HeartEmitter {
    field: HeartField,
    rng: StdRng,
    interval: Option<Interval>,
}

impl HeartEmitter {
    pub(crate) fn new(cap: usize) -> Self {
        Self {
            field: HeartField::new(cap),
            rng: StdRng::from_entropy(),
            interval: None,
        }
    }
}

/// Start the single page-wide emitter. Later calls are no-ops.
pub(super) fn start_hearts(emitter: &Rc<RefCell<HeartEmitter>>, interval_ms: u32) {
    if !emitter.borrow_mut().field.start() {
        return;
    }
    let weak = Rc::downgrade(emitter);
    let interval = Interval::new(interval_ms, move || {
        let Some(emitter) = weak.upgrade() else {
            return;
        };
        let spec = {
            let mut guard = emitter.borrow_mut();
            let HeartEmitter { field, rng, .. } = &mut *guard;
            field.try_spawn(rng)
        };
        if let Some(spec) = spec {
            spawn_heart(&emitter, spec);
        }
    });
    emitter.borrow_mut().interval = Some(interval);
}

/// Extra hearts for a win, bounded by the emitter's cap.
pub(super) fn celebrate(emitter: &Rc<RefCell<HeartEmitter>>, count: usize, interval_ms: u32) {
    let specs = {
        let mut guard = emitter.borrow_mut();
        let HeartEmitter { field, rng, .. } = &mut *guard;
        field.celebrate(rng, count)
    };
    for spec in specs {
        spawn_heart(emitter, spec);
    }
    start_hearts(emitter, interval_ms);
}

fn spawn_heart(emitter: &Rc<RefCell<HeartEmitter>>, spec: HeartSpec) {
    match build_heart(&spec) {
        Ok(heart) => {
            let weak = Rc::downgrade(emitter);
            Timeout::new(spec.duration_ms as u32, move || {
                heart.remove();
                if let Some(emitter) = weak.upgrade() {
                    emitter.borrow_mut().field.despawn();
                }
            })
            .forget();
        }
        Err(err) => {
            console::warn!("hearts: spawn failed", err);
            emitter.borrow_mut().field.despawn();
        }
    }
}

fn build_heart(spec: &HeartSpec) -> Result<Element, JsValue> {
    let doc = document()?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let heart = doc.create_element("div")?;
    heart.set_inner_html("❤️");
    heart.set_attribute("style", &spec.style())?;
    body.append_child(&heart)?;

    let frames = Array::new();
    frames.push(&keyframe("translateY(0) rotate(0deg)", spec.opacity)?);
    frames.push(&keyframe(
        &format!("translateY(-110vh) rotate({}deg)", spec.spin_deg),
        0.0,
    )?);
    let frames: &Object = &frames;
    heart.animate_with_f64(Some(frames), spec.duration_ms);
    Ok(heart)
}

fn keyframe(transform: &str, opacity: f64) -> Result<Object, JsValue> {
    let frame = Object::new();
    Reflect::set(&frame, &"transform".into(), &transform.into())?;
    Reflect::set(&frame, &"opacity".into(), &opacity.into())?;
    Ok(frame)
}

// --- Anniversary counter ----------------------------------------------------

pub(super) fn install_counter(config: &PageConfig) -> Result<(), JsValue> {
    let doc = document()?;
    let Some(timer) = required_element::<Element>(&doc, &config.timer_id, "counter") else {
        return Ok(());
    };
    let anchor = config.anchor;
    let anchor_ms = Date::new_with_year_month_day(
        anchor.year,
        anchor.month_index as i32,
        anchor.day as i32,
    )
    .get_time();

    let render = move || {
        timer.set_inner_html(&Elapsed::between(anchor_ms, Date::now()).to_markup());
    };
    render();
    Interval::new(config.counter_interval_ms, render).forget();
    Ok(())
}

// --- Scroll reveal ----------------------------------------------------------

pub(super) fn install_scroll_reveal(config: &PageConfig) -> Result<(), JsValue> {
    let doc = document()?;
    let nodes = doc.query_selector_all(&config.reveal_selector)?;
    if nodes.length() == 0 {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1("visible");
                    // Reveal once.
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
        }
    }
    Ok(())
}

// --- Music ------------------------------------------------------------------

pub(super) fn autoplay_music(config: &PageConfig) {
    let Ok(doc) = document() else {
        return;
    };
    if let Some(audio) = required_element::<HtmlAudioElement>(&doc, &config.music_id, "music") {
        play_quietly(&audio);
    }
}

pub(super) fn install_music_toggle(config: &PageConfig) -> Result<(), JsValue> {
    let doc = document()?;
    let Some(toggle) = element_by_id::<HtmlElement>(&doc, &config.music_toggle_id) else {
        return Ok(());
    };
    let music_id = config.music_id.clone();
    let button = toggle.clone();
    EventListener::new(&toggle, "click", move |_event: &Event| {
        let Some(audio) = document()
            .ok()
            .and_then(|d| element_by_id::<HtmlAudioElement>(&d, &music_id))
        else {
            return;
        };
        let action = MusicAction::for_click(audio.paused());
        match action {
            MusicAction::Play => play_quietly(&audio),
            MusicAction::Pause => {
                let _ = audio.pause();
            }
        }
        button.set_inner_html(action.label());
        let _ = button.style().set_property("background", action.background());
    })
    .forget();
    Ok(())
}

/// Start playback; a rejected promise (autoplay policy) is logged and dropped.
fn play_quietly(audio: &HtmlAudioElement) {
    let promise = match audio.play() {
        Ok(p) => p,
        Err(err) => {
            console::log!("music: play failed", err);
            return;
        }
    };
    let on_reject = Closure::wrap(Box::new(|_err: JsValue| {
        console::log!("Auto-play blocked - waiting for user interaction.");
    }) as Box<dyn FnMut(JsValue)>);
    let _ = promise.catch(&on_reject);
    on_reject.forget();
}
