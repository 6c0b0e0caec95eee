//! Small DOM plumbing shared by the page controllers.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, NodeList, window};

pub(crate) fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Attach a persistent event listener; the closure lives for the page.
pub(crate) fn listen(target: &EventTarget, event: &str, f: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    if target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .is_ok()
    {
        cb.forget();
    }
}

/// Persistent listener that receives the event object.
pub(crate) fn listen_with_event(
    target: &EventTarget,
    event: &str,
    f: impl FnMut(web_sys::Event) + 'static,
) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
    if target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .is_ok()
    {
        cb.forget();
    }
}

/// Persistent passive listener (scroll handlers that never preventDefault).
pub(crate) fn listen_passive(target: &EventTarget, event: &str, f: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(true);
    if target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            cb.as_ref().unchecked_ref(),
            &opts,
        )
        .is_ok()
    {
        cb.forget();
    }
}

/// Collect a NodeList into concretely typed elements, skipping mismatches.
pub(crate) fn elements<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<T>().ok())
        .collect()
}

/// Strip a class from every element matching `selector`.
pub(crate) fn remove_class_from_all(doc: &Document, selector: &str, class: &str) {
    if let Ok(list) = doc.query_selector_all(selector) {
        for el in elements::<Element>(list) {
            el.class_list().remove_1(class).ok();
        }
    }
}
