//! Feature and team card sliders.
//!
//! Both track the item whose center sits nearest the strip's horizontal
//! center. Pagination is optimistic: indicators update with the scroll
//! request rather than on scroll completion, and a trailing-edge debounce
//! re-syncs them after free scrolling so programmatic and manual scrolling
//! never feed back into each other.

use std::cell::RefCell;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, window,
};

use crate::cards::{self, Card};
use crate::dom;
use crate::sched::{Interval, Oneshot};

const AUTO_ADVANCE_MS: i32 = 20_000;
const SCROLL_SYNC_MS: i32 = 50;
const RESIZE_DEBOUNCE_MS: i32 = 150;

/// Items simultaneously visible in the team strip: 3 in the tablet band,
/// otherwise 1.
pub fn visible_count(viewport_width: f64) -> usize {
    if is_tablet(viewport_width) { 3 } else { 1 }
}

pub fn is_tablet(viewport_width: f64) -> bool {
    (768.0..=1024.0).contains(&viewport_width)
}

/// Clamp a possibly out-of-range index to the valid item range.
pub fn clamp_index(i: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    i.clamp(0, count as isize - 1) as usize
}

/// Pagination dots for `total` items shown `visible` at a time.
pub fn dots_count(total: usize, visible: usize) -> usize {
    if visible == 0 { 0 } else { total.div_ceil(visible) }
}

/// Page a card index belongs to.
pub fn page_index(card: usize, visible: usize) -> usize {
    if visible == 0 { 0 } else { card / visible }
}

/// Index of the center nearest `target`; 0 when `centers` is empty.
pub fn nearest_center_index(centers: &[f64], target: f64) -> usize {
    let mut closest = 0;
    let mut min_dist = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let dist = (c - target).abs();
        if dist < min_dist {
            min_dist = dist;
            closest = i;
        }
    }
    closest
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

fn center_of(el: &Element) -> f64 {
    let rect = el.get_bounding_client_rect();
    rect.left() + rect.width() / 2.0
}

fn smooth_center(el: &Element) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Nearest);
    opts.set_inline(ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

// --- Science slider (feature cards) ------------------------------------------

struct ScienceSlider {
    slider: Element,
    cards: Vec<HtmlElement>,
    dots: Vec<Element>,
    current: usize,
    auto: Option<Interval>,
    scroll_sync: Oneshot,
}

thread_local! {
    static SCIENCE: RefCell<Option<ScienceSlider>> = RefCell::new(None);
}

fn science_update_dots(state: &mut ScienceSlider, i: usize) {
    for (idx, dot) in state.dots.iter().enumerate() {
        dot.class_list().toggle_with_force("active", idx == i).ok();
    }
    state.current = i;

    // The active index drives which card animates open; the rest close.
    cards::trigger(Card::Visual, i == 0);
    cards::trigger(Card::Personality, i == 1);
    cards::trigger(Card::Genetic, i == 2);
    cards::trigger(Card::Synthesis, i == 3);
}

fn science_scroll_to(state: &mut ScienceSlider, i: isize) {
    let i = clamp_index(i, state.cards.len());
    if let Some(card) = state.cards.get(i) {
        smooth_center(card);
    }
    science_update_dots(state, i);
}

fn science_start_auto(state: &mut ScienceSlider) {
    let count = state.cards.len().max(1);
    state.auto = Interval::start(AUTO_ADVANCE_MS, move || {
        SCIENCE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                let next = (state.current + 1) % count;
                science_scroll_to(state, next as isize);
            }
        });
    });
}

fn science_reset_auto(state: &mut ScienceSlider) {
    state.auto = None;
    science_start_auto(state);
}

/// User-initiated jump to a card: clamp, center, re-arm the auto-advance.
fn science_interact(delta_or_index: impl Fn(&ScienceSlider) -> isize + 'static)
-> impl Fn() + 'static {
    move || {
        SCIENCE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                let target = delta_or_index(state);
                science_scroll_to(state, target);
                science_reset_auto(state);
            }
        });
    }
}

fn science_resync() {
    SCIENCE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let target = center_of(&state.slider);
            let centers: Vec<f64> = state
                .cards
                .iter()
                .map(|c| center_of(c))
                .collect();
            let closest = nearest_center_index(&centers, target);
            science_update_dots(state, closest);
        }
    });
}

fn init_science(doc: &Document) -> Result<(), JsValue> {
    let Some(slider) = doc.get_element_by_id("scienceSlider") else {
        return Ok(());
    };
    let cards = dom::elements::<HtmlElement>(slider.query_selector_all(".science-card")?);
    let dots = dom::elements::<Element>(doc.query_selector_all(".pagination-dot")?);

    SCIENCE.with(|cell| {
        cell.replace(Some(ScienceSlider {
            slider: slider.clone(),
            cards: cards.clone(),
            dots,
            current: 0,
            auto: None,
            scroll_sync: Oneshot::new(),
        }))
    });

    if let Some(prev) = doc.get_element_by_id("prevBtn") {
        dom::listen(prev.as_ref(), "click", science_interact(|s| s.current as isize - 1));
    }
    if let Some(next) = doc.get_element_by_id("nextBtn") {
        dom::listen(next.as_ref(), "click", science_interact(|s| s.current as isize + 1));
    }
    SCIENCE.with(|cell| {
        if let Some(state) = cell.borrow().as_ref() {
            for (i, dot) in state.dots.iter().enumerate() {
                dom::listen(dot.as_ref(), "click", science_interact(move |_| i as isize));
            }
        }
    });
    for (i, card) in cards.iter().enumerate() {
        card.style().set_property("cursor", "pointer").ok();
        dom::listen(card.as_ref(), "click", science_interact(move |_| i as isize));
    }

    dom::listen(slider.as_ref(), "scroll", || {
        SCIENCE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.scroll_sync.arm(SCROLL_SYNC_MS, science_resync);
            }
        });
    });

    dom::listen(slider.as_ref(), "mouseenter", || {
        SCIENCE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.auto = None;
            }
        });
    });
    dom::listen(slider.as_ref(), "mouseleave", || {
        SCIENCE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                science_start_auto(state);
            }
        });
    });

    SCIENCE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            science_start_auto(state);
        }
    });
    Ok(())
}

// --- Team slider --------------------------------------------------------------

struct TeamSlider {
    slider: HtmlElement,
    cards: Vec<HtmlElement>,
    dots_container: Option<HtmlElement>,
    resize_sync: Oneshot,
}

thread_local! {
    static TEAM: RefCell<Option<TeamSlider>> = RefCell::new(None);
}

fn team_card_width(state: &TeamSlider) -> f64 {
    let Some(card) = state.cards.first() else {
        return 300.0;
    };
    let gap = window()
        .and_then(|w| w.get_computed_style(&state.slider).ok().flatten())
        .and_then(|cs| cs.get_property_value("gap").ok())
        .and_then(|g| g.trim_end_matches("px").trim().parse::<f64>().ok())
        .unwrap_or(16.0);
    card.offset_width() as f64 + gap
}

fn team_scroll_to_page(page: usize) {
    TEAM.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let visible = visible_count(viewport_width());
            if let Some(card) = state.cards.get(page * visible) {
                smooth_center(card);
            }
        }
    });
}

fn team_create_dots() {
    TEAM.with(|cell| {
        let mut cell = cell.borrow_mut();
        let Some(state) = cell.as_mut() else { return };
        let Some(container) = state.dots_container.clone() else { return };
        let width = viewport_width();
        // Dots are hidden in the tablet band; three-up paging reads fine
        // without them.
        if is_tablet(width) {
            container.style().set_property("display", "none").ok();
            return;
        }
        container.style().remove_property("display").ok();
        container.set_inner_html("");
        let Some(doc) = dom::document() else { return };
        let count = dots_count(state.cards.len(), visible_count(width));
        for i in 0..count {
            let Ok(dot) = doc.create_element("span") else { continue };
            dot.set_class_name(if i == 0 { "dot active" } else { "dot" });
            dot.set_attribute("data-index", &i.to_string()).ok();
            container.append_child(&dot).ok();
            dom::listen(dot.as_ref(), "click", move || team_scroll_to_page(i));
        }
    });
}

fn team_update_dots() {
    TEAM.with(|cell| {
        let mut cell = cell.borrow_mut();
        let Some(state) = cell.as_mut() else { return };
        let Some(container) = state.dots_container.clone() else { return };
        let width = viewport_width();
        if is_tablet(width) {
            return;
        }
        let target = center_of(&state.slider);
        let centers: Vec<f64> = state.cards.iter().map(|c| center_of(c)).collect();
        let card_index = nearest_center_index(&centers, target);
        let page = page_index(card_index, visible_count(width));
        if let Ok(list) = container.query_selector_all(".dot") {
            for (i, dot) in dom::elements::<Element>(list).iter().enumerate() {
                dot.class_list().toggle_with_force("active", i == page).ok();
            }
        }
    });
}

fn team_scroll_by(direction: f64) {
    TEAM.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let opts = ScrollToOptions::new();
            opts.set_left(direction * team_card_width(state));
            opts.set_behavior(ScrollBehavior::Smooth);
            state.slider.scroll_by_with_scroll_to_options(&opts);
        }
    });
}

fn init_team(doc: &Document) -> Result<(), JsValue> {
    let Some(slider) = doc
        .get_element_by_id("teamSlider")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };
    let cards = dom::elements::<HtmlElement>(slider.query_selector_all(".team-card")?);
    let dots_container = doc
        .query_selector(".slider-dots")
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());

    TEAM.with(|cell| {
        cell.replace(Some(TeamSlider {
            slider: slider.clone(),
            cards: cards.clone(),
            dots_container,
            resize_sync: Oneshot::new(),
        }))
    });

    if let Ok(Some(next)) = doc.query_selector(".slider-arrow.next") {
        dom::listen(next.as_ref(), "click", || team_scroll_by(1.0));
    }
    if let Ok(Some(prev)) = doc.query_selector(".slider-arrow.prev") {
        dom::listen(prev.as_ref(), "click", || team_scroll_by(-1.0));
    }

    // On tablet a tapped card centers itself.
    for card in &cards {
        let card2 = card.clone();
        dom::listen(card.as_ref(), "click", move || {
            if is_tablet(viewport_width()) {
                smooth_center(&card2);
            }
        });
    }

    dom::listen(slider.as_ref(), "scroll", team_update_dots);

    if let Some(win) = window() {
        dom::listen(win.as_ref(), "resize", || {
            TEAM.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.resize_sync.arm(RESIZE_DEBOUNCE_MS, || {
                        team_create_dots();
                        team_update_dots();
                    });
                }
            });
        });
    }

    slider.style().set_property("cursor", "grab").ok();

    team_create_dots();
    team_update_dots();
    Ok(())
}

pub fn init() -> Result<(), JsValue> {
    let Some(doc) = dom::document() else { return Ok(()) };
    init_science(&doc)?;
    init_team(&doc)?;
    Ok(())
}
