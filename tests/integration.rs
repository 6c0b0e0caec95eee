// Integration tests (native) for the `harmonia-site` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic
// so they can run under `cargo test` on the host.

use harmonia_site::cards::visual::{
    self, LOWER_CLOSED, LOWER_OPEN, LOWER_XS, UPPER_CLOSED, UPPER_OPEN, UPPER_XS,
};
use harmonia_site::router::PageId;
use harmonia_site::sliders;

// --- Page identifiers --------------------------------------------------------

#[test]
fn page_ids_round_trip() {
    for page in PageId::ALL {
        assert_eq!(PageId::parse(page.as_str()), Some(page));
    }
}

#[test]
fn unknown_page_ids_resolve_to_home() {
    assert_eq!(PageId::parse("pricing"), None);
    assert_eq!(PageId::resolve("pricing"), PageId::Home);
    assert_eq!(PageId::resolve(""), PageId::Home);
    assert_eq!(PageId::resolve("WHY-HARMONIA"), PageId::Home);
}

#[test]
fn page_id_set_is_distinct() {
    let mut seen = std::collections::HashSet::new();
    for page in PageId::ALL {
        assert!(seen.insert(page.as_str()), "duplicate page id '{}'", page.as_str());
    }
}

// --- Easing ------------------------------------------------------------------

#[test]
fn ease_endpoints_and_midpoint() {
    assert_eq!(visual::ease_in_out_cubic(0.0), 0.0);
    assert_eq!(visual::ease_in_out_cubic(1.0), 1.0);
    assert!((visual::ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    // 4t^3 on the accelerating half
    assert!((visual::ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
}

#[test]
fn ease_is_monotonic() {
    let mut prev = 0.0;
    for i in 1..=100 {
        let t = i as f64 / 100.0;
        let v = visual::ease_in_out_cubic(t);
        assert!(v >= prev, "ease regressed at t={t}");
        prev = v;
    }
}

// --- Eyelid geometry ---------------------------------------------------------

#[test]
fn lid_path_parses() {
    assert_eq!(visual::parse_lid_ys("M30 50 Q50 35 70 50"), Some([50.0, 35.0, 50.0]));
    assert_eq!(visual::parse_lid_ys("M35 70 Q50 85 65 70"), Some([70.0, 85.0, 70.0]));
}

#[test]
fn malformed_lid_paths_are_rejected() {
    assert_eq!(visual::parse_lid_ys(""), None);
    assert_eq!(visual::parse_lid_ys("M30 50"), None);
    assert_eq!(visual::parse_lid_ys("L30 50 Q50 35 70 50"), None);
    assert_eq!(visual::parse_lid_ys("M30 fifty Q50 35 70 50"), None);
    assert_eq!(visual::parse_lid_ys("M30 50 C50 35 70 50"), None);
    assert_eq!(visual::parse_lid_ys("M30 50 Q50 35 70 50 extra"), None);
}

#[test]
fn lid_format_round_trips() {
    for ys in [UPPER_CLOSED, UPPER_OPEN] {
        let d = visual::format_lid(UPPER_XS, ys);
        assert_eq!(visual::parse_lid_ys(&d), Some(ys));
    }
    for ys in [LOWER_CLOSED, LOWER_OPEN] {
        let d = visual::format_lid(LOWER_XS, ys);
        assert_eq!(visual::parse_lid_ys(&d), Some(ys));
    }
}

#[test]
fn blend_endpoints() {
    assert_eq!(visual::blend(UPPER_CLOSED, UPPER_OPEN, 0.0), UPPER_CLOSED);
    assert_eq!(visual::blend(UPPER_CLOSED, UPPER_OPEN, 1.0), UPPER_OPEN);
    let mid = visual::blend([0.0, 0.0, 0.0], [10.0, 20.0, 30.0], 0.5);
    assert_eq!(mid, [5.0, 10.0, 15.0]);
}

// --- Slider math -------------------------------------------------------------

#[test]
fn clamp_index_bounds() {
    assert_eq!(sliders::clamp_index(-5, 4), 0);
    assert_eq!(sliders::clamp_index(0, 4), 0);
    assert_eq!(sliders::clamp_index(3, 4), 3);
    assert_eq!(sliders::clamp_index(99, 4), 3);
    assert_eq!(sliders::clamp_index(2, 0), 0);
}

#[test]
fn visible_count_width_bands() {
    assert_eq!(sliders::visible_count(320.0), 1);
    assert_eq!(sliders::visible_count(767.0), 1);
    assert_eq!(sliders::visible_count(768.0), 3);
    assert_eq!(sliders::visible_count(900.0), 3);
    assert_eq!(sliders::visible_count(1024.0), 3);
    assert_eq!(sliders::visible_count(1025.0), 1);
    assert_eq!(sliders::visible_count(1920.0), 1);
}

#[test]
fn dots_count_is_ceil_division() {
    assert_eq!(sliders::dots_count(6, 3), 2);
    assert_eq!(sliders::dots_count(6, 1), 6);
    assert_eq!(sliders::dots_count(5, 3), 2);
    assert_eq!(sliders::dots_count(0, 3), 0);
    assert_eq!(sliders::dots_count(6, 0), 0);
}

#[test]
fn page_index_maps_cards_to_pages() {
    assert_eq!(sliders::page_index(0, 3), 0);
    assert_eq!(sliders::page_index(2, 3), 0);
    assert_eq!(sliders::page_index(3, 3), 1);
    assert_eq!(sliders::page_index(5, 1), 5);
}

#[test]
fn nearest_center_picks_closest() {
    let centers = [100.0, 300.0, 500.0, 700.0];
    assert_eq!(sliders::nearest_center_index(&centers, 120.0), 0);
    assert_eq!(sliders::nearest_center_index(&centers, 420.0), 2);
    assert_eq!(sliders::nearest_center_index(&centers, 1000.0), 3);
    assert_eq!(sliders::nearest_center_index(&[], 0.0), 0);
}
