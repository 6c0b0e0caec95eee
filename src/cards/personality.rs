//! Personality card: connector lines draw one by one, each lighting up its
//! box, the center hub pops, the outer arcs trace, and the icon glides into
//! the harmonia box.
//!
//! The repeat profile compresses the draw offsets to 0.6x but keeps the two
//! trailing completion offsets on their own literal values, matching the
//! card's authored timing rather than a uniform scale.

use super::{CardDesc, Marker, Step, StepTable};

const ALL_MARKERS: &[Marker] = &[
    "animation-complete",
    "icon-arrived",
    "icon-moving",
    "harmonia-glow",
    "outer-circle-animating",
    "harmonia-box-visible",
    "center-visible",
    "line-3-visible",
    "apps-box-visible",
    "apps-box-glow",
    "line-2-visible",
    "science-box-visible",
    "science-box-glow",
    "line-1-visible",
];

const COMPLETED: &[Marker] = &[
    "animation-complete",
    "icon-moving",
    "center-visible",
    "outer-circle-animating",
    "line-1-visible",
    "line-2-visible",
    "line-3-visible",
    "science-box-visible",
    "apps-box-visible",
    "harmonia-box-visible",
];

const FIRST: StepTable = StepTable {
    duration_ms: 5500,
    steps: &[
        Step { offset_ms: 0, add: &["line-1-visible"], remove: &[] },
        Step { offset_ms: 600, add: &["science-box-visible", "science-box-glow"], remove: &[] },
        Step { offset_ms: 900, add: &["line-2-visible"], remove: &[] },
        Step { offset_ms: 1200, add: &[], remove: &["science-box-glow"] },
        Step { offset_ms: 1500, add: &["apps-box-visible", "apps-box-glow"], remove: &[] },
        Step { offset_ms: 1800, add: &["line-3-visible"], remove: &[] },
        Step { offset_ms: 2100, add: &[], remove: &["apps-box-glow"] },
        Step { offset_ms: 2400, add: &["center-visible"], remove: &[] },
        Step { offset_ms: 2600, add: &["outer-circle-animating"], remove: &[] },
        Step { offset_ms: 3800, add: &["harmonia-box-visible", "harmonia-glow"], remove: &[] },
        Step { offset_ms: 4000, add: &["icon-moving"], remove: &[] },
        Step { offset_ms: 5000, add: &["animation-complete"], remove: &[] },
        Step { offset_ms: 5500, add: &[], remove: &["harmonia-glow"] },
    ],
};

const REPEAT: StepTable = StepTable {
    duration_ms: 3900,
    steps: &[
        Step { offset_ms: 0, add: &["line-1-visible"], remove: &[] },
        Step { offset_ms: 360, add: &["science-box-visible", "science-box-glow"], remove: &[] },
        Step { offset_ms: 540, add: &["line-2-visible"], remove: &[] },
        Step { offset_ms: 720, add: &[], remove: &["science-box-glow"] },
        Step { offset_ms: 900, add: &["apps-box-visible", "apps-box-glow"], remove: &[] },
        Step { offset_ms: 1080, add: &["line-3-visible"], remove: &[] },
        Step { offset_ms: 1260, add: &[], remove: &["apps-box-glow"] },
        Step { offset_ms: 1440, add: &["center-visible"], remove: &[] },
        Step { offset_ms: 1560, add: &["outer-circle-animating"], remove: &[] },
        Step { offset_ms: 2280, add: &["harmonia-box-visible", "harmonia-glow"], remove: &[] },
        Step { offset_ms: 2400, add: &["icon-moving"], remove: &[] },
        Step { offset_ms: 3400, add: &["animation-complete"], remove: &[] },
        Step { offset_ms: 3900, add: &[], remove: &["harmonia-glow"] },
    ],
};

pub static DESC: CardDesc = CardDesc {
    selector: ".science-card.personality-card",
    duration_var: Some(("--personality-duration", ["5s", "3s"])),
    first: FIRST,
    repeat: REPEAT,
    all_markers: ALL_MARKERS,
    completed: COMPLETED,
    completes_deck: false,
};
