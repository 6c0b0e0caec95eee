//! Sequenced card animations on the why page.
//!
//! Each science card opens through an ordered series of timed visual-state
//! marker changes and closes by stripping every marker at once, with no
//! intermediate states. The step tables live in the per-card modules; this
//! module owns the generic interpreter and the deck-wide state: the global
//! pause flag, the completed/silhouette broadcasts and the reset path used
//! by the router.
//!
//! A marker is a presentational class name. Every opening sequence keeps
//! its outstanding timers in a pool that is cleared before a new sequence
//! starts and before any close, so at most one sequence per card is ever in
//! flight.

pub mod genetic;
pub mod personality;
pub mod synthesis;
pub mod visual;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement, window};

use crate::dom;
use crate::sched::TimerPool;
use visual::EyeAnimator;

/// A named visual-state toggle backed by a presentational class.
pub type Marker = &'static str;

/// One scheduled change within an opening sequence.
pub struct Step {
    pub offset_ms: u32,
    pub add: &'static [Marker],
    pub remove: &'static [Marker],
}

/// Ordered schedule for one duration profile. The last step is the
/// completion step.
pub struct StepTable {
    pub duration_ms: u32,
    pub steps: &'static [Step],
}

/// Static description of one stepped card variant.
pub struct CardDesc {
    pub selector: &'static str,
    /// CSS custom property carrying the duration, with first/repeat values.
    pub duration_var: Option<(&'static str, [&'static str; 2])>,
    pub first: StepTable,
    pub repeat: StepTable,
    /// Every marker the open path can add; close strips them all.
    pub all_markers: &'static [Marker],
    /// Markers forced on by the deck-wide completed broadcast.
    pub completed: &'static [Marker],
    /// Finishing this card's sequence completes the whole deck.
    pub completes_deck: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Card {
    Visual,
    Personality,
    Genetic,
    Synthesis,
}

struct CardAnimator {
    desc: &'static CardDesc,
    el: Option<HtmlElement>,
    is_open: bool,
    animating: bool,
    has_triggered_once: bool,
    timers: TimerPool,
}

impl CardAnimator {
    fn new(doc: &Document, desc: &'static CardDesc) -> Self {
        let el = doc
            .query_selector(desc.selector)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        Self {
            desc,
            el,
            is_open: false,
            animating: false,
            has_triggered_once: false,
            timers: TimerPool::new(),
        }
    }
}

pub(crate) struct CardDeck {
    paused: bool,
    pub(crate) eye: EyeAnimator,
    personality: CardAnimator,
    genetic: CardAnimator,
    synthesis: CardAnimator,
}

thread_local! {
    static DECK: RefCell<Option<CardDeck>> = RefCell::new(None);
}

pub(crate) fn with_deck(f: impl FnOnce(&mut CardDeck)) {
    DECK.with(|cell| {
        if let Some(deck) = cell.borrow_mut().as_mut() {
            f(deck);
        }
    });
}

fn apply_step(el: &HtmlElement, step: &Step) {
    let classes = el.class_list();
    for m in step.remove {
        classes.remove_1(m).ok();
    }
    for m in step.add {
        classes.add_1(m).ok();
    }
}

fn strip_markers(el: &HtmlElement, markers: &[Marker]) {
    let classes = el.class_list();
    for m in markers {
        classes.remove_1(m).ok();
    }
}

impl CardDeck {
    fn stepped_mut(&mut self, card: Card) -> Option<&mut CardAnimator> {
        match card {
            Card::Personality => Some(&mut self.personality),
            Card::Genetic => Some(&mut self.genetic),
            Card::Synthesis => Some(&mut self.synthesis),
            Card::Visual => None,
        }
    }

    pub(crate) fn trigger(&mut self, card: Card, should_open: bool) {
        if card == Card::Visual {
            let paused = self.paused;
            self.eye.trigger(should_open, paused);
            return;
        }
        if self.paused {
            return;
        }
        let Some(anim) = self.stepped_mut(card) else { return };
        let Some(el) = anim.el.clone() else { return };
        if should_open == anim.is_open && !anim.animating {
            return;
        }

        anim.timers.clear_all();

        if !should_open {
            strip_markers(&el, anim.desc.all_markers);
            anim.is_open = false;
            anim.animating = false;
            return;
        }

        anim.animating = true;
        let first_time = !anim.has_triggered_once;
        if first_time {
            anim.has_triggered_once = true;
            el.class_list().add_1("animated-once").ok();
        }
        if let Some((var, values)) = anim.desc.duration_var {
            el.style()
                .set_property(var, values[if first_time { 0 } else { 1 }])
                .ok();
        }
        let desc = anim.desc;
        let steps: &'static [Step] = if first_time {
            desc.first.steps
        } else {
            desc.repeat.steps
        };
        let last = steps.len().saturating_sub(1);
        for (idx, step) in steps.iter().enumerate() {
            if step.offset_ms == 0 {
                // Applied synchronously so the opening state never flashes
                // before the first timer fires. Zero-offset steps are never
                // the completion step.
                apply_step(&el, step);
                continue;
            }
            let is_last = idx == last;
            anim.timers.schedule(step.offset_ms as i32, move || {
                with_deck(|deck| deck.fire_step(card, step, is_last));
            });
        }
    }

    fn fire_step(&mut self, card: Card, step: &'static Step, is_last: bool) {
        let Some(anim) = self.stepped_mut(card) else { return };
        let Some(el) = anim.el.clone() else { return };
        apply_step(&el, step);
        let completes_deck = anim.desc.completes_deck;
        if is_last {
            anim.is_open = true;
            anim.animating = false;
        }
        if is_last && completes_deck {
            self.show_all_completed();
        }
    }

    /// Force every card into its fully-open visual state without running the
    /// individual sequences.
    fn show_all_completed(&mut self) {
        self.eye.force_open();
        for card in [Card::Personality, Card::Genetic, Card::Synthesis] {
            if let Some(anim) = self.stepped_mut(card) {
                if let Some(el) = anim.el.clone() {
                    let classes = el.class_list();
                    for m in anim.desc.completed {
                        classes.add_1(m).ok();
                    }
                }
            }
        }
    }

    /// Restore the silhouette state. The synthesis card hosts the pause
    /// control and stays visible.
    fn hide_all_completed(&mut self) {
        self.eye.force_closed();
        for card in [Card::Personality, Card::Genetic] {
            if let Some(anim) = self.stepped_mut(card) {
                if let Some(el) = anim.el.clone() {
                    strip_markers(&el, anim.desc.completed);
                }
            }
        }
    }

    fn reset_stepped(&mut self, card: Card) {
        if let Some(anim) = self.stepped_mut(card) {
            anim.timers.clear_all();
            if let Some(el) = anim.el.clone() {
                strip_markers(&el, anim.desc.all_markers);
            }
            anim.is_open = false;
            anim.animating = false;
        }
    }
}

/// Drive one card toward open or closed. No-op while the global pause flag
/// is set, when the card element is absent, or when the request matches the
/// current settled state.
pub fn trigger(card: Card, should_open: bool) {
    with_deck(|deck| deck.trigger(card, should_open));
}

/// Immediately reset all four cards to closed with no animation and no
/// pending timers. Called by the router when leaving the why page.
pub fn reset_all() {
    with_deck(|deck| {
        deck.eye.reset();
        for card in [Card::Personality, Card::Genetic, Card::Synthesis] {
            deck.reset_stepped(card);
        }
    });
}

/// Toggle the global pause flag. Pausing forces every card into the
/// completed state; resuming restores the silhouette state.
pub fn toggle_all_animations() {
    with_deck(|deck| {
        deck.paused = !deck.paused;
        let paused = deck.paused;
        if let Some(doc) = dom::document() {
            if let Some(body) = doc.body() {
                if paused {
                    body.class_list().add_1("animations-paused").ok();
                } else {
                    body.class_list().remove_1("animations-paused").ok();
                }
            }
            if let Ok(Some(label)) =
                doc.query_selector(".synthesis-pause-hint .pause-btn-text")
            {
                label.set_text_content(Some(if paused { "Resume" } else { "Pause" }));
            }
        }
        if paused {
            deck.show_all_completed();
        } else {
            deck.hide_all_completed();
        }
    });
}

/// Outstanding timers for one card; diagnostics and tests.
pub fn pending_timers(card: Card) -> usize {
    let mut count = 0;
    with_deck(|deck| {
        count = match card {
            Card::Visual => usize::from(deck.eye.blending()),
            _ => deck.stepped_mut(card).map(|a| a.timers.len()).unwrap_or(0),
        };
    });
    count
}

/// Restartable spin pulse for the logo mark.
pub fn spin_logo(el: &HtmlElement) {
    let classes = el.class_list();
    classes.remove_1("click-spin").ok();
    // Force a reflow so the animation restarts even mid-spin.
    let _ = el.offset_width();
    classes.add_1("click-spin").ok();
    let el2 = el.clone();
    let cb = Closure::once(move || {
        el2.class_list().remove_1("click-spin").ok();
    });
    if let Some(win) = window() {
        if win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                600,
            )
            .is_ok()
        {
            cb.forget();
        }
    }
}

/// Resolve the card elements and wire the pause control and the eye's
/// first-view trigger.
pub fn init() -> Result<(), wasm_bindgen::JsValue> {
    let Some(doc) = dom::document() else { return Ok(()) };
    let deck = CardDeck {
        paused: false,
        eye: EyeAnimator::new(&doc),
        personality: CardAnimator::new(&doc, &personality::DESC),
        genetic: CardAnimator::new(&doc, &genetic::DESC),
        synthesis: CardAnimator::new(&doc, &synthesis::DESC),
    };
    DECK.with(|cell| cell.replace(Some(deck)));

    if let Ok(Some(control)) = doc.query_selector(".synthesis-pause-hint") {
        dom::listen(control.as_ref(), "click", toggle_all_animations);
    }
    visual::init_first_view_trigger(&doc);
    Ok(())
}
