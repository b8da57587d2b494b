// Browser tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::collections::HashMap;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Append `<tag id=id>` to a wrapper inside body. Ids are shared between
/// tests, so every test removes what it added.
fn mount(doc: &Document, parent: &Element, tag: &str, id: &str) -> HtmlElement {
    let el: HtmlElement = doc.create_element(tag).unwrap().dyn_into().unwrap();
    el.set_id(id);
    parent.append_child(&el).unwrap();
    el
}

fn wrapper(doc: &Document) -> Element {
    let wrap = doc.create_element("div").unwrap();
    doc.body().unwrap().append_child(&wrap).unwrap();
    wrap
}

fn proposal_buttons(doc: &Document) -> (Element, HtmlElement, HtmlElement) {
    let wrap = wrapper(doc);
    let yes = mount(doc, &wrap, "button", "yes-btn");
    yes.set_inner_text("Yes");
    let no = mount(doc, &wrap, "button", "no-btn");
    no.set_inner_text("No");
    be_my_valentine::start_proposal_page().unwrap();
    (wrap, yes, no)
}

#[wasm_bindgen_test]
fn mouseover_moves_control_and_grows_target() {
    let doc = document();
    let (wrap, yes, no) = proposal_buttons(&doc);

    no.dispatch_event(&Event::new("mouseover").unwrap()).unwrap();

    let body: Element = doc.body().unwrap().into();
    assert_eq!(no.parent_element(), Some(body));
    let style = no.style();
    assert_eq!(style.get_property_value("position").unwrap(), "fixed");
    assert!(style.get_property_value("left").unwrap().ends_with("px"));
    assert!(style.get_property_value("top").unwrap().ends_with("px"));
    assert_eq!(no.text_content().as_deref(), Some(be_my_valentine::TAUNTS[0]));
    assert_eq!(
        yes.style().get_property_value("transform").unwrap(),
        "scale(1.15)"
    );

    no.remove();
    wrap.remove();
}

#[wasm_bindgen_test]
fn touchstart_on_control_is_default_prevented() {
    let doc = document();
    let (wrap, _yes, no) = proposal_buttons(&doc);

    let init = EventInit::new();
    init.set_cancelable(true);
    let touch = Event::new_with_event_init_dict("touchstart", &init).unwrap();
    no.dispatch_event(&touch).unwrap();

    assert!(touch.default_prevented());
    assert_eq!(no.style().get_property_value("position").unwrap(), "fixed");

    no.remove();
    wrap.remove();
}

#[wasm_bindgen_test]
fn valentine_page_deals_twelve_cards() {
    let doc = document();
    let wrap = wrapper(&doc);
    let board = mount(&doc, &wrap, "div", "memory-game");

    be_my_valentine::start_valentine_page().unwrap();

    let cards = board.query_selector_all(".memory-card").unwrap();
    assert_eq!(cards.length(), 12);
    let first: HtmlElement = cards.item(0).unwrap().dyn_into().unwrap();
    assert_eq!(first.get_attribute("role").as_deref(), Some("button"));
    assert_eq!(first.text_content().as_deref(), Some(""));

    first.click();
    assert!(first.class_list().contains("flipped"));
    assert!(!first.text_content().unwrap_or_default().is_empty());

    wrap.remove();
}

fn cards(board: &HtmlElement) -> Vec<HtmlElement> {
    let list = board.query_selector_all(".memory-card").unwrap();
    (0..list.length())
        .map(|i| list.item(i).unwrap().dyn_into().unwrap())
        .collect()
}

#[wasm_bindgen_test]
async fn finding_every_pair_unlocks_secret_message() {
    let doc = document();
    let wrap = wrapper(&doc);
    let board = mount(&doc, &wrap, "div", "memory-game");
    let secret = mount(&doc, &wrap, "div", "secret-message");
    secret.set_attribute("aria-hidden", "true").unwrap();

    be_my_valentine::start_valentine_page().unwrap();
    let cards = cards(&board);
    assert_eq!(cards.len(), 12);

    // Turn cards over two at a time to learn every symbol. Each pair stays
    // up for the resolve delay, so wait past it before the next one.
    let mut by_symbol: HashMap<String, Vec<usize>> = HashMap::new();
    for pair in (0..cards.len()).collect::<Vec<_>>().chunks(2) {
        for &i in pair {
            cards[i].click();
            let symbol = cards[i].text_content().unwrap_or_default();
            assert!(!symbol.is_empty());
            by_symbol.entry(symbol).or_default().push(i);
        }
        TimeoutFuture::new(800).await;
    }
    assert_eq!(by_symbol.len(), 6);

    for indices in by_symbol.values() {
        assert_eq!(indices.len(), 2);
        if cards[indices[0]].class_list().contains("matched") {
            continue;
        }
        cards[indices[0]].click();
        cards[indices[1]].click();
        TimeoutFuture::new(800).await;
        assert!(cards[indices[0]].class_list().contains("matched"));
    }

    // Win reveal follows the last match.
    TimeoutFuture::new(500).await;
    assert!(secret.class_list().contains("unlocked"));
    assert_eq!(secret.get_attribute("aria-hidden").as_deref(), Some("false"));

    wrap.remove();
}

#[wasm_bindgen_test]
fn reset_without_board_is_noop() {
    assert!(be_my_valentine::reset_memory_game().is_ok());
}
