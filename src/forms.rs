//! Simulated form submissions.
//!
//! No request leaves the page: a fixed delay fakes the round trip and the
//! form reports success unconditionally, then restores itself. Each form
//! owns its outstanding timers and clears them on resubmit so two rapid
//! submissions cannot interleave their restore steps. A real deployment
//! replaces the delay with an actual submission call and a failure path.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlSelectElement};

use crate::dom;
use crate::sched::TimerPool;

const SUBMIT_DELAY_MS: i32 = 1500;
const WAITLIST_DELAY_MS: i32 = 1000;
const RESTORE_AFTER_MS: i32 = 3000;

const SUCCESS_HTML: &str =
    "<span style=\"color:var(--gold)\">Request received. We will be in touch shortly.</span>";
const WAITLIST_HTML: &str =
    "<span style=\"color:var(--gold)\">You're on the list! We'll be in touch soon.</span>";

#[derive(Default)]
struct FormsState {
    integration: TimerPool,
    contact: TimerPool,
    waitlist: TimerPool,
}

thread_local! {
    static FORMS: RefCell<FormsState> = RefCell::new(FormsState::default());
}

fn form_by_id(doc: &Document, id: &str) -> Option<HtmlFormElement> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
}

fn html_by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn init_integration(doc: &Document) {
    let Some(form) = form_by_id(doc, "integrationForm") else { return };
    let doc = doc.clone();
    let form2 = form.clone();
    dom::listen_with_event(form.as_ref(), "submit", move |evt| {
        evt.prevent_default();
        let btn = form2
            .query_selector(".btn-regal-submit")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let msg = html_by_id(&doc, "integrationMessage");
        let original = btn.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        if let Some(btn) = btn.as_ref() {
            btn.style().set_property("opacity", "0.6").ok();
            btn.set_inner_html("Processing...");
        }
        let form3 = form2.clone();
        let btn2 = btn.clone();
        let btn3 = btn.clone();
        FORMS.with(|cell| {
            let state = &mut cell.borrow_mut().integration;
            state.clear_all();
            state.schedule(SUBMIT_DELAY_MS, move || {
                form3.reset();
                if let Some(btn) = btn2.as_ref() {
                    btn.style().set_property("opacity", "1").ok();
                    btn.set_inner_html("Request Sent");
                }
                if let Some(msg) = msg.as_ref() {
                    msg.set_inner_html(SUCCESS_HTML);
                    msg.style().set_property("display", "block").ok();
                }
            });
            let original = original.clone();
            state.schedule(SUBMIT_DELAY_MS + RESTORE_AFTER_MS, move || {
                if let Some(btn) = btn3.as_ref() {
                    btn.set_inner_html(&original);
                }
            });
        });
    });
}

fn init_contact(doc: &Document) {
    let Some(form) = form_by_id(doc, "contactForm") else { return };
    let doc = doc.clone();
    let form2 = form.clone();
    dom::listen_with_event(form.as_ref(), "submit", move |evt| {
        evt.prevent_default();
        let btn = html_by_id(&doc, "submitBtn");
        let label = btn
            .as_ref()
            .and_then(|b| b.query_selector(".btn-text").ok().flatten());
        let success = doc.get_element_by_id("formSuccess");
        if let Some(btn) = btn.as_ref() {
            btn.class_list().add_1("processing").ok();
        }
        if let Some(label) = label.as_ref() {
            label.set_text_content(Some("Processing..."));
        }
        let doc2 = doc.clone();
        let form3 = form2.clone();
        let success2 = success.clone();
        FORMS.with(|cell| {
            let state = &mut cell.borrow_mut().contact;
            state.clear_all();
            state.schedule(SUBMIT_DELAY_MS, move || {
                form3.reset();
                dom::remove_class_from_all(&doc2, ".contact-card", "active");
                if let Some(success) = success2.as_ref() {
                    success.class_list().add_1("visible").ok();
                }
                if let Some(btn) = btn.as_ref() {
                    btn.class_list().remove_1("processing").ok();
                }
                if let Some(label) = label.as_ref() {
                    label.set_text_content(Some("Send Message"));
                }
            });
            state.schedule(SUBMIT_DELAY_MS + RESTORE_AFTER_MS, move || {
                if let Some(success) = success.as_ref() {
                    success.class_list().remove_1("visible").ok();
                }
            });
        });
    });
}

fn init_waitlist(doc: &Document) {
    let Some(form) = form_by_id(doc, "waitlistForm") else { return };
    let doc = doc.clone();
    let form2 = form.clone();
    dom::listen_with_event(form.as_ref(), "submit", move |evt| {
        evt.prevent_default();
        let msg = html_by_id(&doc, "waitlistMessage");
        let form3 = form2.clone();
        FORMS.with(|cell| {
            let state = &mut cell.borrow_mut().waitlist;
            state.clear_all();
            state.schedule(WAITLIST_DELAY_MS, move || {
                form3.reset();
                if let Some(msg) = msg.as_ref() {
                    msg.set_inner_html(WAITLIST_HTML);
                    msg.style().set_property("display", "block").ok();
                }
            });
        });
    });
}

/// Activate a contact-type card, sync the dropdown and focus the message
/// box.
pub fn select_contact_type(card: &Element, kind: &str) {
    let Some(doc) = dom::document() else { return };
    dom::remove_class_from_all(&doc, ".contact-card", "active");
    card.class_list().add_1("active").ok();
    if let Some(dropdown) = doc
        .get_element_by_id("contact-type")
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        dropdown.set_value(kind);
    }
    if let Some(message) = html_by_id(&doc, "contact-message") {
        message.focus().ok();
    }
}

pub fn init() {
    let Some(doc) = dom::document() else { return };
    init_integration(&doc);
    init_contact(&doc);
    init_waitlist(&doc);
}
