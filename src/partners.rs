//! Partnerships page: tier dataset, dynamic content switching, the detail
//! modal and the simulated inquiry submission.
//!
//! The tier copy lives in static tables; switching tiers fades the content
//! wrapper, swaps every dynamic slot, and unfades. Feature boxes are
//! rebuilt as DOM nodes per switch; their icon slots carry a `data-icon`
//! key the stylesheet resolves.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom;
use crate::sched::{Oneshot, TimerPool};

const FADE_MS: i32 = 300;
const SUBMIT_DELAY_MS: i32 = 1500;
const MESSAGE_HIDE_MS: i32 = 4000;

const SUCCESS_HTML: &str =
    "<span style=\"color:var(--gold)\">Request received. We will be in touch shortly.</span>";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tier {
    Default,
    Pilot,
    Api,
    Core,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Default, Tier::Pilot, Tier::Api, Tier::Core];

    pub fn key(self) -> &'static str {
        match self {
            Tier::Default => "default",
            Tier::Pilot => "pilot",
            Tier::Api => "api",
            Tier::Core => "core",
        }
    }

    pub fn parse(s: &str) -> Option<Tier> {
        Tier::ALL.into_iter().find(|t| t.key() == s)
    }
}

pub struct TierBox {
    pub key: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub modal_desc: &'static str,
    pub bullets: [&'static str; 3],
}

pub struct TierInfo {
    pub tier: Tier,
    pub title: &'static str,
    pub intro: &'static str,
    pub boxes: [TierBox; 3],
    pub placeholder: &'static str,
    pub cta: &'static str,
}

pub static TIERS: [TierInfo; 4] = [
    TierInfo {
        tier: Tier::Default,
        title: "The Matching Layer You're Missing",
        intro: "Harmonia exists for independent platforms ready to compete \
                differently. Shared engine. Individual identity.",
        boxes: [
            TierBox {
                key: "layers",
                title: "3-Layer Matching",
                desc: "Bio, Psychological, and Neural compatibility.",
                icon: "layers",
                modal_desc: "Compatibility is analyzed across three distinct \
                             dimensions for a holistic view of a connection.",
                bullets: [
                    "Visual attraction analysis using neural networks",
                    "Personality compatibility through psychometric assessment",
                    "HLA genetic markers for biological chemistry signals",
                ],
            },
            TierBox {
                key: "privacy",
                title: "Privacy-First Architecture",
                desc: "GDPR/CCPA compliant by design.",
                icon: "shield",
                modal_desc: "Genetic data is processed client-side; only HLA \
                             markers are extracted and raw files deleted.",
                bullets: [
                    "Zero raw genetic data stored on our servers",
                    "Full GDPR and CCPA compliance built-in",
                    "SOC 2 Type II certification in progress",
                ],
            },
            TierBox {
                key: "platform",
                title: "Platform Agnostic",
                desc: "Works with any tech stack (iOS, Android, Web).",
                icon: "platform",
                modal_desc: "RESTful API design integrates with existing \
                             infrastructure.",
                bullets: [
                    "SDKs available for Swift, Kotlin, and JavaScript",
                    "Webhook support for real-time score updates",
                    "Comprehensive documentation and sandbox environment",
                ],
            },
        ],
        placeholder: "Tell us about your platform...",
        cta: "Request Access",
    },
    TierInfo {
        tier: Tier::Pilot,
        title: "Prove ROI First",
        intro: "Harmonia runs a 30-day pilot. Real cohort. Measured lift. \
                ROI before contract.",
        boxes: [
            TierBox {
                key: "validation",
                title: "Zero-Risk Validation",
                desc: "Test retention lift on a specific cohort.",
                icon: "validation",
                modal_desc: "A controlled experiment on a segment of the user \
                             base, with statistical rigor.",
                bullets: [
                    "A/B testing framework included",
                    "Statistically significant sample sizing guidance",
                    "No long-term commitment required",
                ],
            },
            TierBox {
                key: "metrics",
                title: "Success Metrics Dashboard",
                desc: "Real-time view of match quality improvements.",
                icon: "metrics",
                modal_desc: "Tracks retention lift, session length, and \
                             match-to-message conversion.",
                bullets: [
                    "Day 1, 7, and 30 retention comparisons",
                    "Match success rate tracking",
                    "Exportable reports for stakeholder presentations",
                ],
            },
            TierBox {
                key: "support",
                title: "Dedicated Support",
                desc: "Integration guidance during your 30-day trial.",
                icon: "support",
                modal_desc: "The partnership team stays involved from kickoff \
                             to final analysis.",
                bullets: [
                    "Named integration specialist assigned",
                    "Weekly check-in calls during pilot",
                    "Post-pilot strategy session included",
                ],
            },
        ],
        placeholder: "I'm interested in the 30-day pilot to test retention lift...",
        cta: "Start 30-Day Pilot",
    },
    TierInfo {
        tier: Tier::Api,
        title: "Live in Weeks, Not Months",
        intro: "Deploy the compatibility engine in weeks. Battle-tested. \
                Fully documented. 99.9% uptime.",
        boxes: [
            TierBox {
                key: "deploy",
                title: "Quick Deployment",
                desc: "Live in weeks with comprehensive docs.",
                icon: "deploy",
                modal_desc: "A refined onboarding process takes contract to \
                             production in 2-4 weeks.",
                bullets: [
                    "Step-by-step integration guides",
                    "Sandbox environment for development",
                    "Migration support from existing systems",
                ],
            },
            TierBox {
                key: "realtime",
                title: "Real-Time Scoring",
                desc: "Instant compatibility results during swiping.",
                icon: "realtime",
                modal_desc: "Scores compute in milliseconds for seamless \
                             swipe integration.",
                bullets: [
                    "Sub-100ms response times globally",
                    "Batch scoring for feed optimization",
                    "Webhook support for async workflows",
                ],
            },
            TierBox {
                key: "uptime",
                title: "99.9% Uptime SLA",
                desc: "Enterprise reliability you don't have to build.",
                icon: "uptime",
                modal_desc: "Multi-region redundancy with transparent \
                             incident history.",
                bullets: [
                    "Service Level Agreement with credits",
                    "24/7 monitoring and incident response",
                    "Transparent status page and incident history",
                ],
            },
        ],
        placeholder: "We're ready to integrate the Harmonia API...",
        cta: "Request Integration Docs",
    },
    TierInfo {
        tier: Tier::Core,
        title: "Your Retention Engine, Built Together",
        intro: "Custom weights co-developed for your user base. The match \
                engine evolves as fast as your market.",
        boxes: [
            TierBox {
                key: "custom",
                title: "Custom Algorithm Tuning",
                desc: "Bespoke weighting models trained on your engagement data.",
                icon: "custom",
                modal_desc: "Behavior patterns drive three-layer weight \
                             optimization for your audience.",
                bullets: [
                    "Deep-dive analysis of your user engagement data",
                    "Custom weight optimization for your niche",
                    "Continuous model retraining as your user base evolves",
                ],
            },
            TierBox {
                key: "audits",
                title: "Strategic Quarterly Audits",
                desc: "Data-driven reviews to optimize match success rates.",
                icon: "audits",
                modal_desc: "Quarterly performance reviews with actionable \
                             recommendations.",
                bullets: [
                    "Comprehensive performance review presentation",
                    "Actionable optimization recommendations",
                    "Roadmap alignment for upcoming features",
                ],
            },
            TierBox {
                key: "team",
                title: "Dedicated Implementation Team",
                desc: "Direct Slack access to our engineers.",
                icon: "team",
                modal_desc: "A private channel with direct access to the \
                             engineering team.",
                bullets: [
                    "Private Slack channel with Harmonia engineers",
                    "Named account manager and technical lead",
                    "Priority incident response and feature requests",
                ],
            },
        ],
        placeholder: "We are looking for a custom integration to solve specific churn issues...",
        cta: "Inquire About Partnership",
    },
];

pub fn tier_info(tier: Tier) -> &'static TierInfo {
    TIERS
        .iter()
        .find(|t| t.tier == tier)
        .unwrap_or(&TIERS[0])
}

struct PartnersState {
    current: Tier,
    fade: Oneshot,
    timers: TimerPool,
}

thread_local! {
    static PARTNERS: RefCell<PartnersState> = RefCell::new(PartnersState {
        current: Tier::Default,
        fade: Oneshot::new(),
        timers: TimerPool::new(),
    });
}

fn render_boxes(doc: &Document, boxes: &'static [TierBox; 3]) {
    let Some(container) = doc.get_element_by_id("partnershipsFeatureBoxes") else {
        return;
    };
    container.set_inner_html("");
    for tier_box in boxes {
        let Ok(node) = doc.create_element("div") else { continue };
        node.set_class_name("feature-box");
        let bullets: String = tier_box
            .bullets
            .iter()
            .map(|b| format!("<li>{b}</li>"))
            .collect();
        node.set_inner_html(&format!(
            "<div class=\"card-visual\" data-icon=\"{icon}\"></div>\
             <div class=\"box-content\">\
             <h4 class=\"box-title\">{title}</h4>\
             <p class=\"box-desc\">{desc}</p>\
             <span class=\"tap-hint\">Tap for details</span>\
             <div class=\"box-bullets\"><ul>{bullets}</ul></div>\
             </div>",
            icon = tier_box.icon,
            title = tier_box.title,
            desc = tier_box.desc,
        ));
        let key = tier_box.key;
        dom::listen(node.as_ref(), "click", move || open_modal(key));
        container.append_child(&node).ok();
    }
}

fn sync_tier_tabs(doc: &Document, tier: Tier) {
    if let Ok(list) = doc.query_selector_all(".partnerships-tier-tabs .tier-tab") {
        for tab in dom::elements::<Element>(list) {
            let active = tab.get_attribute("data-tier").as_deref() == Some(tier.key());
            tab.class_list().toggle_with_force("active", active).ok();
        }
    }
}

fn sync_dropdown(doc: &Document, tier: Tier) {
    if let Some(dropdown) = doc
        .get_element_by_id("partnershipInterest")
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        dropdown.set_value(tier.key());
        if tier == Tier::Default {
            dropdown.class_list().remove_1("tier-selected").ok();
        } else {
            dropdown.class_list().add_1("tier-selected").ok();
        }
    }
}

fn apply_tier_content(tier: Tier) {
    let Some(doc) = dom::document() else { return };
    let info = tier_info(tier);
    if let Some(title) = doc.get_element_by_id("partnershipsDynamicTitle") {
        title.set_text_content(Some(info.title));
    }
    if let Some(intro) = doc.get_element_by_id("partnershipsDynamicIntro") {
        intro.set_inner_html(info.intro);
    }
    render_boxes(&doc, &info.boxes);
    if let Some(inquiry) = doc
        .get_element_by_id("partnershipInquiry")
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
    {
        inquiry.set_placeholder(info.placeholder);
    }
    if let Ok(Some(label)) = doc.query_selector("#partnershipsSubmitBtn .btn-text") {
        label.set_text_content(Some(info.cta));
    }
    if let Some(wrapper) = doc.get_element_by_id("partnershipsContentWrapper") {
        wrapper.class_list().remove_1("fading").ok();
    }
}

/// Switch the page to `tier`: fade, swap every dynamic slot, unfade.
pub fn update_content(tier: Tier) {
    let Some(doc) = dom::document() else { return };
    let Some(wrapper) = doc.get_element_by_id("partnershipsContentWrapper") else {
        return;
    };
    PARTNERS.with(|cell| {
        let mut state = cell.borrow_mut();
        state.current = tier;
        wrapper.class_list().add_1("fading").ok();
        sync_tier_tabs(&doc, tier);
        state.fade.arm(FADE_MS, move || apply_tier_content(tier));
    });
}

/// Open the detail modal for the box `key` of the current tier.
pub fn open_modal(key: &str) {
    let Some(doc) = dom::document() else { return };
    let current = PARTNERS.with(|cell| cell.borrow().current);
    let info = tier_info(current);
    let Some(tier_box) = info.boxes.iter().find(|b| b.key == key) else {
        return;
    };

    if let Some(icon) = doc.get_element_by_id("partnershipsModalIcon") {
        icon.set_attribute("data-icon", tier_box.icon).ok();
    }
    if let Some(title) = doc.get_element_by_id("partnershipsModalTitle") {
        title.set_text_content(Some(tier_box.title));
    }
    if let Some(desc) = doc.get_element_by_id("partnershipsModalDesc") {
        desc.set_text_content(Some(tier_box.modal_desc));
    }
    if let Some(list) = doc.get_element_by_id("partnershipsModalList") {
        let items: String = tier_box
            .bullets
            .iter()
            .map(|b| format!("<li>{b}</li>"))
            .collect();
        list.set_inner_html(&items);
    }

    if let Some(overlay) = doc.get_element_by_id("partnershipsModalOverlay") {
        overlay.class_list().add_1("active").ok();
    }
    if let Some(body) = doc.body() {
        body.style().set_property("overflow", "hidden").ok();
    }
}

pub fn close_modal() {
    let Some(doc) = dom::document() else { return };
    if let Some(overlay) = doc.get_element_by_id("partnershipsModalOverlay") {
        overlay.class_list().remove_1("active").ok();
    }
    if let Some(body) = doc.body() {
        body.style().remove_property("overflow").ok();
    }
}

fn handle_submit(doc: &Document) {
    let btn = doc
        .get_element_by_id("partnershipsSubmitBtn")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let label = btn
        .as_ref()
        .and_then(|b| b.query_selector(".btn-text").ok().flatten());
    let arrow = btn
        .as_ref()
        .and_then(|b| b.query_selector(".arrow").ok().flatten())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    let message = doc
        .get_element_by_id("partnershipsFormMessage")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    if let Some(btn) = btn.as_ref() {
        btn.class_list().add_1("processing").ok();
    }
    if let Some(label) = label.as_ref() {
        label.set_text_content(Some("Processing..."));
    }
    if let Some(arrow) = arrow.as_ref() {
        arrow.style().set_property("display", "none").ok();
    }

    let doc2 = doc.clone();
    let message2 = message.clone();
    PARTNERS.with(|cell| {
        let state = &mut cell.borrow_mut().timers;
        state.clear_all();
        state.schedule(SUBMIT_DELAY_MS, move || {
            if let Some(form) = doc2
                .get_element_by_id("partnershipsIntegrationForm")
                .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
            {
                form.reset();
            }
            sync_dropdown(&doc2, Tier::Default);
            if let Some(message) = message2.as_ref() {
                message.set_inner_html(SUCCESS_HTML);
                message.style().set_property("display", "block").ok();
            }
            if let Some(btn) = btn.as_ref() {
                btn.class_list().remove_1("processing").ok();
            }
            if let Some(label) = label.as_ref() {
                label.set_text_content(Some("Request Access"));
            }
            if let Some(arrow) = arrow.as_ref() {
                arrow.style().remove_property("display").ok();
            }
            update_content(Tier::Default);
        });
        state.schedule(SUBMIT_DELAY_MS + MESSAGE_HIDE_MS, move || {
            if let Some(message) = message.as_ref() {
                message.style().set_property("display", "none").ok();
            }
        });
    });
}

pub fn init() {
    let Some(doc) = dom::document() else { return };

    render_boxes(&doc, &tier_info(Tier::Default).boxes);

    if let Some(dropdown) = doc
        .get_element_by_id("partnershipInterest")
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        let dropdown2 = dropdown.clone();
        dom::listen(dropdown.as_ref(), "change", move || {
            let tier = Tier::parse(&dropdown2.value()).unwrap_or(Tier::Default);
            if tier == Tier::Default {
                dropdown2.class_list().remove_1("tier-selected").ok();
            } else {
                dropdown2.class_list().add_1("tier-selected").ok();
            }
            update_content(tier);
        });
    }

    // Tier tabs double the dropdown on narrow layouts; keep both in sync.
    if let Ok(list) = doc.query_selector_all(".partnerships-tier-tabs .tier-tab") {
        for tab in dom::elements::<Element>(list) {
            let tab2 = tab.clone();
            let doc2 = doc.clone();
            dom::listen(tab.as_ref(), "click", move || {
                let tier = tab2
                    .get_attribute("data-tier")
                    .as_deref()
                    .and_then(Tier::parse)
                    .unwrap_or(Tier::Default);
                sync_tier_tabs(&doc2, tier);
                update_content(tier);
                sync_dropdown(&doc2, tier);
            });
        }
    }

    if let Some(form) = doc.get_element_by_id("partnershipsIntegrationForm") {
        let doc2 = doc.clone();
        dom::listen_with_event(form.as_ref(), "submit", move |evt| {
            evt.prevent_default();
            handle_submit(&doc2);
        });
    }

    if let Some(overlay) = doc.get_element_by_id("partnershipsModalOverlay") {
        let overlay2 = overlay.clone();
        dom::listen_with_event(overlay.as_ref(), "click", move |evt| {
            // Only a click on the dimmed backdrop itself closes the modal.
            let on_backdrop = evt
                .target()
                .is_some_and(|t| js_sys::Object::is(t.as_ref(), overlay2.as_ref()));
            if on_backdrop {
                close_modal();
            }
        });
    }
}
