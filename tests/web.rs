#![cfg(target_arch = "wasm32")]

// Browser smoke tests; run with `wasm-pack test --headless --firefox`.

use harmonia_site::cards::{self, Card, genetic};
use harmonia_site::router::{self, PageId};
use wasm_bindgen_test::*;
use web_sys::Document;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_fixture(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

#[wasm_bindgen_test]
fn activate_is_idempotent() {
    set_fixture(
        "<div class=\"page\" id=\"page-home\"></div>\
         <div class=\"page\" id=\"page-team\"></div>",
    );
    router::activate(PageId::Team, false);
    router::activate(PageId::Team, false);

    let doc = document();
    assert!(
        doc.get_element_by_id("page-team")
            .unwrap()
            .class_list()
            .contains("active")
    );
    assert!(
        !doc.get_element_by_id("page-home")
            .unwrap()
            .class_list()
            .contains("active")
    );
}

#[wasm_bindgen_test]
fn invalid_page_falls_back_to_home() {
    set_fixture(
        "<div class=\"page\" id=\"page-home\"></div>\
         <div class=\"page\" id=\"page-team\"></div>",
    );
    router::activate(PageId::resolve("no-such-page"), false);

    assert!(
        document()
            .get_element_by_id("page-home")
            .unwrap()
            .class_list()
            .contains("active")
    );
}

#[wasm_bindgen_test]
fn close_cancels_an_in_flight_sequence() {
    set_fixture("<div class=\"science-card genetic-card\"></div>");
    cards::init().unwrap();

    cards::trigger(Card::Genetic, true);
    assert!(cards::pending_timers(Card::Genetic) > 0);

    cards::trigger(Card::Genetic, false);
    assert_eq!(cards::pending_timers(Card::Genetic), 0);

    let card = document()
        .query_selector(".genetic-card")
        .unwrap()
        .unwrap();
    for marker in genetic::DESC.all_markers {
        assert!(
            !card.class_list().contains(marker),
            "marker '{marker}' survived close"
        );
    }
}
