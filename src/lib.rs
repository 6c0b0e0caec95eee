//! Harmonia site front-end crate.
//!
//! Client-side presentation layer for the Harmonia marketing site: a page
//! router over the History API, sequenced card animations on the why page,
//! feature/team sliders, WebGL backdrops and the simulated form handlers.
//! The host page loads the wasm module and calls [`start_site`] once the
//! DOM is ready; everything after that is driven by browser events, timers
//! and animation frames.

use wasm_bindgen::prelude::*;

pub mod cards;
mod dom;
pub mod forms;
pub mod partners;
pub mod radar;
pub mod rng;
pub mod router;
pub mod sched;
pub mod sliders;
pub mod webgl;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Wire every page component. Called by the host page once the DOM is
/// ready. Components whose markup is absent from the page wire themselves
/// as no-ops.
#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    cards::init()?;
    router::init()?;
    radar::init();
    sliders::init()?;
    forms::init();
    partners::init();
    webgl::init();
    log::info!("harmonia site ready");
    Ok(())
}

/// Navigate to a page by identifier; unknown identifiers fall back to home.
#[wasm_bindgen]
pub fn show_page(page_id: &str) {
    router::activate(router::PageId::resolve(page_id), true);
}

/// Toggle the global animation pause flag (the synthesis card's control).
#[wasm_bindgen]
pub fn toggle_all_animations() {
    cards::toggle_all_animations();
}

/// Spin the logo mark once in response to a click.
#[wasm_bindgen]
pub fn spin_logo(element: &web_sys::HtmlElement) {
    cards::spin_logo(element);
}

/// Activate a contact-type card and sync the contact form to it.
#[wasm_bindgen]
pub fn select_contact_type(card: &web_sys::Element, kind: &str) {
    forms::select_contact_type(card, kind);
}

/// Close the partnerships detail modal.
#[wasm_bindgen]
pub fn close_partnerships_modal() {
    partners::close_modal();
}
