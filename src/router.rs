//! Page navigation with the History API.
//!
//! Exactly one page section is active at a time. Navigation swaps the
//! active markers, records a history entry keyed by the page identifier,
//! and replays through the same path on back/forward. Environments that
//! forbid history mutation (sandboxed embedding) lose only the history
//! integration, nothing else.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement, PopStateEvent, window};

use crate::cards;
use crate::dom;
use crate::sched::TimerPool;

/// The fixed set of site sections.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageId {
    Home,
    WhyHarmonia,
    Partnerships,
    Team,
    LocalNetwork,
    P2p,
    Contact,
}

impl PageId {
    pub const ALL: [PageId; 7] = [
        PageId::Home,
        PageId::WhyHarmonia,
        PageId::Partnerships,
        PageId::Team,
        PageId::LocalNetwork,
        PageId::P2p,
        PageId::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::WhyHarmonia => "why-harmonia",
            PageId::Partnerships => "partnerships",
            PageId::Team => "team",
            PageId::LocalNetwork => "local-network",
            PageId::P2p => "p2p",
            PageId::Contact => "contact",
        }
    }

    /// Strict parse; `None` for identifiers outside the valid set.
    pub fn parse(s: &str) -> Option<PageId> {
        PageId::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Lenient parse used by navigation: anything unrecognized is home.
    pub fn resolve(s: &str) -> PageId {
        PageId::parse(s).unwrap_or(PageId::Home)
    }
}

#[derive(Default)]
struct RouterState {
    current: Option<PageId>,
    timers: TimerPool,
}

thread_local! {
    static ROUTER: RefCell<RouterState> = RefCell::new(RouterState::default());
}

/// Activate `page`: swap active markers, scroll to the origin, optionally
/// record a history entry, and reset the card deck when leaving the why
/// page.
pub fn activate(page: PageId, record_history: bool) {
    let Some(doc) = dom::document() else { return };

    ROUTER.with(|cell| {
        let mut state = cell.borrow_mut();
        state.timers.clear_all();

        close_mobile_nav(&doc);

        dom::remove_class_from_all(&doc, ".page", "active");
        dom::remove_class_from_all(&doc, ".nav-links a", "active");
        if let Some(el) = doc.get_element_by_id(&format!("page-{}", page.as_str())) {
            el.class_list().add_1("active").ok();
        }
        if let Some(el) = doc.get_element_by_id(&format!("nav-{}", page.as_str())) {
            el.class_list().add_1("active").ok();
        }

        if let Some(win) = window() {
            win.scroll_to_with_x_and_y(0.0, 0.0);
        }

        if record_history && state.current != Some(page) {
            push_history(page);
        }
        state.current = Some(page);

        if page != PageId::WhyHarmonia {
            cards::reset_all();
        }

        if page == PageId::Team {
            // On tablet, center the strip on the fourth team member once the
            // page has had a frame to lay out.
            state.timers.schedule(50, center_team_tablet);
        }
    });
}

fn close_mobile_nav(doc: &Document) {
    if let Ok(Some(nav)) = doc.query_selector(".nav-links") {
        nav.class_list().remove_1("mobile-open").ok();
    }
    if let Ok(Some(burger)) = doc.query_selector(".hamburger") {
        burger.class_list().remove_1("active").ok();
    }
}

fn center_team_tablet() {
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };
    let width = win.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
    if !(768.0..=1024.0).contains(&width) {
        return;
    }
    let Some(slider) = doc
        .get_element_by_id("teamSlider")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let Ok(list) = slider.query_selector_all(".team-card") else {
        return;
    };
    let cards = dom::elements::<HtmlElement>(list);
    let Some(card) = cards.get(3) else { return };
    let offset =
        card.offset_left() - slider.offset_width() / 2 + card.offset_width() / 2;
    slider.set_scroll_left(offset);
}

fn history_url(page: PageId) -> Option<String> {
    let win = window()?;
    let path = win.location().pathname().ok()?;
    Some(if page == PageId::Home {
        path
    } else {
        format!("{path}#{}", page.as_str())
    })
}

fn history_state(page: PageId) -> wasm_bindgen::JsValue {
    let state = js_sys::Object::new();
    js_sys::Reflect::set(&state, &"page".into(), &page.as_str().into()).ok();
    state.into()
}

fn push_history(page: PageId) {
    let Some(win) = window() else { return };
    let Ok(history) = win.history() else { return };
    let Some(url) = history_url(page) else { return };
    if history
        .push_state_with_url(&history_state(page), "", Some(&url))
        .is_err()
    {
        log::debug!("history push blocked; navigation not recorded");
    }
}

fn replace_history(page: PageId) {
    let Some(win) = window() else { return };
    let Ok(history) = win.history() else { return };
    let Some(url) = history_url(page) else { return };
    if history
        .replace_state_with_url(&history_state(page), "", Some(&url))
        .is_err()
    {
        log::debug!("history replace blocked; initial entry not seeded");
    }
}

fn fragment_page() -> PageId {
    window()
        .and_then(|w| w.location().hash().ok())
        .map(|h| PageId::resolve(h.trim_start_matches('#')))
        .unwrap_or(PageId::Home)
}

/// Show the page encoded in the URL fragment and seed the history entry.
pub fn init_from_hash() {
    let page = fragment_page();
    replace_history(page);
    activate(page, false);
}

/// Wire navigation links, the hamburger toggle and back/forward replay,
/// then activate the initial page.
pub fn init() -> Result<(), wasm_bindgen::JsValue> {
    let Some(win) = window() else { return Ok(()) };
    let Some(doc) = win.document() else { return Ok(()) };

    for page in PageId::ALL {
        if let Some(link) = doc.get_element_by_id(&format!("nav-{}", page.as_str())) {
            dom::listen_with_event(link.as_ref(), "click", move |evt| {
                evt.prevent_default();
                activate(page, true);
            });
        }
    }

    if let Ok(Some(burger)) = doc.query_selector(".hamburger") {
        let doc2 = doc.clone();
        dom::listen(burger.as_ref(), "click", move || {
            if let Ok(Some(nav)) = doc2.query_selector(".nav-links") {
                nav.class_list().toggle("mobile-open").ok();
            }
            if let Ok(Some(burger)) = doc2.query_selector(".hamburger") {
                burger.class_list().toggle("active").ok();
            }
        });
    }

    // Back/forward replays the router without recording new entries.
    let popstate = Closure::wrap(Box::new(move |evt: PopStateEvent| {
        let state = evt.state();
        let page = js_sys::Reflect::get(&state, &"page".into())
            .ok()
            .and_then(|v| v.as_string())
            .map(|s| PageId::resolve(&s))
            .unwrap_or_else(fragment_page);
        activate(page, false);
    }) as Box<dyn FnMut(PopStateEvent)>);
    win.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())?;
    popstate.forget();

    init_from_hash();
    Ok(())
}
