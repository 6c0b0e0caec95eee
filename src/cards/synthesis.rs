//! Synthesis card: the layer icons rush together, the impact raises fog,
//! the logo forms out of it and settles into the header while the text
//! cascade fills in.
//!
//! Completing this card completes the whole deck: the final step broadcasts
//! the completed state to every other card and leaves the pause control
//! live.

use super::{CardDesc, Marker, Step, StepTable};

const ALL_MARKERS: &[Marker] = &[
    "animation-complete",
    "text-harmonia",
    "text-apps",
    "text-science",
    "boxes-tracing",
    "title-visible",
    "logo-spinning",
    "logo-visible",
    "logo-in-header",
    "fog-fading",
    "fog-building",
    "sparks-active",
    "impact",
    "icons-rushing",
];

const COMPLETED: &[Marker] = &[
    "animation-complete",
    "logo-in-header",
    "title-visible",
    "text-science",
    "text-apps",
    "text-harmonia",
];

const FIRST: StepTable = StepTable {
    duration_ms: 4000,
    steps: &[
        Step { offset_ms: 0, add: &["icons-rushing"], remove: &[] },
        Step { offset_ms: 600, add: &["impact", "sparks-active"], remove: &[] },
        Step { offset_ms: 800, add: &["fog-building"], remove: &[] },
        Step { offset_ms: 1500, add: &["logo-visible"], remove: &[] },
        Step {
            offset_ms: 2200,
            add: &["fog-fading", "logo-spinning", "boxes-tracing", "title-visible"],
            remove: &["fog-building"],
        },
        Step { offset_ms: 3200, add: &["text-science"], remove: &["boxes-tracing"] },
        Step { offset_ms: 3400, add: &["text-apps"], remove: &[] },
        Step {
            offset_ms: 3600,
            add: &["logo-in-header", "text-harmonia"],
            remove: &["logo-spinning", "logo-visible"],
        },
        Step {
            offset_ms: 4000,
            add: &["animation-complete"],
            remove: &["fog-fading", "impact", "sparks-active"],
        },
    ],
};

// Repeat run at 0.625x of the first-run offsets.
const REPEAT: StepTable = StepTable {
    duration_ms: 2500,
    steps: &[
        Step { offset_ms: 0, add: &["icons-rushing"], remove: &[] },
        Step { offset_ms: 375, add: &["impact", "sparks-active"], remove: &[] },
        Step { offset_ms: 500, add: &["fog-building"], remove: &[] },
        Step { offset_ms: 937, add: &["logo-visible"], remove: &[] },
        Step {
            offset_ms: 1375,
            add: &["fog-fading", "logo-spinning", "boxes-tracing", "title-visible"],
            remove: &["fog-building"],
        },
        Step { offset_ms: 2000, add: &["text-science"], remove: &["boxes-tracing"] },
        Step { offset_ms: 2125, add: &["text-apps"], remove: &[] },
        Step {
            offset_ms: 2250,
            add: &["logo-in-header", "text-harmonia"],
            remove: &["logo-spinning", "logo-visible"],
        },
        Step {
            offset_ms: 2500,
            add: &["animation-complete"],
            remove: &["fog-fading", "impact", "sparks-active"],
        },
    ],
};

pub static DESC: CardDesc = CardDesc {
    selector: ".science-card.synthesis-card",
    duration_var: None,
    first: FIRST,
    repeat: REPEAT,
    all_markers: ALL_MARKERS,
    completed: COMPLETED,
    completes_deck: true,
};
