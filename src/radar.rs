//! Home page radar: two jittered compatibility polygons and a cycling
//! status line.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::rng::Lcg;
use crate::sched::{Interval, Oneshot};

const POLYGON_MS: i32 = 2000;
const STATUS_MS: i32 = 3000;
const STATUS_SWAP_MS: i32 = 300;

pub const STATUS_TEXTS: [&str; 5] = [
    "SYNTHESIZING...",
    "ANALYZING HLA...",
    "CHECKING RESONANCE...",
    "CALCULATING...",
    "MATCHING...",
];

/// Base vertices of the two overlapping radar polygons. The top and bottom
/// vertices (0 and 3) keep their X so the silhouette stays anchored.
pub const RADAR_A: [(f64, f64); 6] = [
    (200.0, 50.0),
    (340.0, 125.0),
    (330.0, 275.0),
    (200.0, 345.0),
    (60.0, 270.0),
    (70.0, 130.0),
];
pub const RADAR_B: [(f64, f64); 6] = [
    (200.0, 70.0),
    (320.0, 140.0),
    (325.0, 265.0),
    (200.0, 330.0),
    (80.0, 260.0),
    (75.0, 135.0),
];

fn jitter(rng: &mut Lcg) -> f64 {
    rng.next_f64() * 30.0 - 15.0
}

/// Render an SVG `points` list with every coordinate jittered up to ±15,
/// except the X of vertices 0 and 3.
pub fn jitter_points(base: &[(f64, f64)], rng: &mut Lcg) -> String {
    base.iter()
        .enumerate()
        .map(|(i, (x, y))| {
            let jx = if i == 0 || i == 3 { *x } else { x + jitter(rng) };
            let jy = y + jitter(rng);
            format!("{jx},{jy}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn init() {
    let Some(doc) = dom::document() else { return };
    let (Some(radar_a), Some(radar_b)) =
        (doc.get_element_by_id("radarA"), doc.get_element_by_id("radarB"))
    else {
        return;
    };

    {
        let mut rng = Lcg::from_clock();
        let a = radar_a.clone();
        let b = radar_b.clone();
        if let Some(interval) = Interval::start(POLYGON_MS, move || {
            a.set_attribute("points", &jitter_points(&RADAR_A, &mut rng)).ok();
            b.set_attribute("points", &jitter_points(&RADAR_B, &mut rng)).ok();
        }) {
            interval.forget();
        }
    }

    if let Some(status) = doc
        .get_element_by_id("radar-status")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let mut index = 0usize;
        let mut swap = Oneshot::new();
        if let Some(interval) = Interval::start(STATUS_MS, move || {
            status.style().set_property("opacity", "0").ok();
            index = (index + 1) % STATUS_TEXTS.len();
            let text = STATUS_TEXTS[index];
            let status2 = status.clone();
            swap.arm(STATUS_SWAP_MS, move || {
                status2.set_text_content(Some(text));
                status2.style().set_property("opacity", "1").ok();
            });
        }) {
            interval.forget();
        }
    }
}
