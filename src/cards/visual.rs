//! Visual card: the eye opens by blending both eyelid paths between their
//! closed and open control points, one eased step per animation frame.
//!
//! The lid shapes are single quadratic Bézier segments; only the Y
//! coordinates move. Unparsable path data aborts the blend and leaves the
//! prior shape untouched.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, window};

use super::Card;
use crate::dom;
use crate::sched::{self, FrameGuard, Oneshot};

/// Y coordinates (start, control, end) of each lid in both poses.
pub const UPPER_CLOSED: [f64; 3] = [50.0, 35.0, 50.0];
pub const LOWER_CLOSED: [f64; 3] = [50.0, 65.0, 50.0];
pub const UPPER_OPEN: [f64; 3] = [40.0, 20.0, 40.0];
pub const LOWER_OPEN: [f64; 3] = [70.0, 85.0, 70.0];

/// X layout of each lid path (fixed; only Y animates).
pub const UPPER_XS: [f64; 3] = [30.0, 50.0, 70.0];
pub const LOWER_XS: [f64; 3] = [35.0, 50.0, 65.0];

const FIRST_MS: f64 = 3000.0;
const REPEAT_MS: f64 = 1500.0;

/// Cubic ease-in-out.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Extract the three Y values from a lid path of the shape
/// `M<x> <y> Q<x> <y> <x> <y>`. `None` when the attribute does not match.
pub fn parse_lid_ys(d: &str) -> Option<[f64; 3]> {
    let toks: Vec<&str> = d.split_whitespace().collect();
    if toks.len() != 6 {
        return None;
    }
    let _mx: f64 = toks[0].strip_prefix('M')?.parse().ok()?;
    let y0: f64 = toks[1].parse().ok()?;
    let _qx: f64 = toks[2].strip_prefix('Q')?.parse().ok()?;
    let y1: f64 = toks[3].parse().ok()?;
    let _ex: f64 = toks[4].parse().ok()?;
    let y2: f64 = toks[5].parse().ok()?;
    Some([y0, y1, y2])
}

/// Render a lid path from its fixed X layout and the given Y values.
pub fn format_lid(xs: [f64; 3], ys: [f64; 3]) -> String {
    format!(
        "M{} {} Q{} {} {} {}",
        xs[0], ys[0], xs[1], ys[1], xs[2], ys[2]
    )
}

pub fn blend(start: [f64; 3], target: [f64; 3], t: f64) -> [f64; 3] {
    [
        start[0] + (target[0] - start[0]) * t,
        start[1] + (target[1] - start[1]) * t,
        start[2] + (target[2] - start[2]) * t,
    ]
}

pub(crate) struct EyeAnimator {
    card: Option<HtmlElement>,
    upper: Option<Element>,
    lower: Option<Element>,
    is_open: bool,
    animating: bool,
    has_triggered_once: bool,
    triggered_this_visit: bool,
    frame: Option<FrameGuard>,
}

impl EyeAnimator {
    pub(super) fn new(doc: &Document) -> Self {
        let card = doc
            .query_selector(".science-card.visual-card")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let upper = card
            .as_ref()
            .and_then(|c| c.query_selector(".upper-lid").ok().flatten());
        let lower = card
            .as_ref()
            .and_then(|c| c.query_selector(".lower-lid").ok().flatten());
        Self {
            card,
            upper,
            lower,
            is_open: false,
            animating: false,
            has_triggered_once: false,
            triggered_this_visit: false,
            frame: None,
        }
    }

    pub(super) fn blending(&self) -> bool {
        self.frame.as_ref().is_some_and(|g| !g.is_cancelled())
    }

    pub(super) fn trigger(&mut self, should_open: bool, paused: bool) {
        let (Some(card), Some(upper), Some(lower)) =
            (self.card.clone(), self.upper.clone(), self.lower.clone())
        else {
            return;
        };
        if paused {
            return;
        }
        if should_open == self.is_open && !self.animating {
            return;
        }

        // Cancel any in-flight blend before starting over.
        if let Some(guard) = self.frame.take() {
            guard.cancel();
        }

        let start_upper = upper.get_attribute("d").and_then(|d| parse_lid_ys(&d));
        let start_lower = lower.get_attribute("d").and_then(|d| parse_lid_ys(&d));
        let (Some(start_upper), Some(start_lower)) = (start_upper, start_lower) else {
            // Unexpected path data; leave the eye exactly as it is.
            self.animating = false;
            return;
        };

        self.animating = true;

        let first_time = should_open && !self.has_triggered_once;
        let duration = if first_time { FIRST_MS } else { REPEAT_MS };
        card.style()
            .set_property("--eye-duration", if first_time { "3s" } else { "1.5s" })
            .ok();

        if should_open {
            card.class_list().add_1("eye-open").ok();
        } else {
            card.class_list().remove_1("eye-open").ok();
        }
        if first_time {
            self.has_triggered_once = true;
        }

        let target_upper = if should_open { UPPER_OPEN } else { UPPER_CLOSED };
        let target_lower = if should_open { LOWER_OPEN } else { LOWER_CLOSED };

        let start_time = sched::now_ms();
        let guard = sched::run_frames(move |ts| {
            let progress = ((ts - start_time) / duration).clamp(0.0, 1.0);
            let t = ease_in_out_cubic(progress);
            upper
                .set_attribute("d", &format_lid(UPPER_XS, blend(start_upper, target_upper, t)))
                .ok();
            lower
                .set_attribute("d", &format_lid(LOWER_XS, blend(start_lower, target_lower, t)))
                .ok();
            if progress < 1.0 {
                true
            } else {
                super::with_deck(|deck| {
                    deck.eye.is_open = should_open;
                    deck.eye.animating = false;
                    deck.eye.frame = None;
                });
                false
            }
        });
        self.frame = Some(guard);
    }

    /// Snap the eye open without animating (completed broadcast).
    pub(super) fn force_open(&mut self) {
        let (Some(card), Some(upper), Some(lower)) = (&self.card, &self.upper, &self.lower)
        else {
            return;
        };
        if card.class_list().contains("eye-open") {
            return;
        }
        card.class_list().add_1("eye-open").ok();
        upper
            .set_attribute("d", &format_lid(UPPER_XS, UPPER_OPEN))
            .ok();
        lower
            .set_attribute("d", &format_lid(LOWER_XS, LOWER_OPEN))
            .ok();
    }

    /// Snap the eye shut without animating (silhouette broadcast).
    pub(super) fn force_closed(&mut self) {
        let (Some(card), Some(upper), Some(lower)) = (&self.card, &self.upper, &self.lower)
        else {
            return;
        };
        card.class_list().remove_1("eye-open").ok();
        upper
            .set_attribute("d", &format_lid(UPPER_XS, UPPER_CLOSED))
            .ok();
        lower
            .set_attribute("d", &format_lid(LOWER_XS, LOWER_CLOSED))
            .ok();
    }

    /// Immediate reset to closed: cancel the blend, clear the per-visit
    /// trigger latch, restore the closed pose.
    pub(super) fn reset(&mut self) {
        if let Some(guard) = self.frame.take() {
            guard.cancel();
        }
        self.triggered_this_visit = false;
        self.is_open = false;
        self.animating = false;
        self.force_closed();
    }
}

fn check_in_view() {
    super::with_deck(|deck| {
        if deck.eye.triggered_this_visit {
            return;
        }
        let Some(card) = deck.eye.card.clone() else { return };
        let Some(win) = window() else { return };
        let viewport = win.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
        let rect = card.get_bounding_client_rect();
        if rect.top() < viewport && rect.bottom() > 0.0 {
            deck.eye.triggered_this_visit = true;
            deck.trigger(Card::Visual, true);
        }
    });
}

/// The eye opens the first time its card scrolls into view on the why page,
/// once per visit.
pub(super) fn init_first_view_trigger(doc: &Document) {
    let Some(why) = doc.get_element_by_id("page-why-harmonia") else { return };
    if let Some(win) = window() {
        dom::listen_passive(win.as_ref(), "scroll", check_in_view);
    }
    // The page fades in; re-check once the transition settles.
    let why2 = why.clone();
    let mut delay = Oneshot::new();
    dom::listen(why.as_ref(), "transitionend", move || {
        if why2.class_list().contains("active") {
            delay.arm(100, check_in_view);
        }
    });
}
