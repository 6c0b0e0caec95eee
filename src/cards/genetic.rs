//! Genetic card: the strands crackle, warp, roll into a helix and light the
//! harmonia mark.
//!
//! The two profiles are separately authored schedules, not a scaled copy of
//! one another: the repeat run skips the crackle phase entirely and starts
//! straight at the warp.

use super::{CardDesc, Marker, Step, StepTable};

const ALL_MARKERS: &[Marker] = &[
    "animation-complete",
    "harmonia-visible",
    "harmonia-glow",
    "final-glow",
    "energy-wave-active",
    "dna-moving",
    "boxes-fading",
    "subtitle-visible",
    "particles-active",
    "helix-warping",
    "helix-forming",
    "crackling",
];

const COMPLETED: &[Marker] = &[
    "animation-complete",
    "dna-moving",
    "helix-forming",
    "boxes-fading",
    "subtitle-visible",
    "harmonia-visible",
];

const FIRST: StepTable = StepTable {
    duration_ms: 3000,
    steps: &[
        Step { offset_ms: 0, add: &["crackling"], remove: &[] },
        Step { offset_ms: 500, add: &["helix-warping"], remove: &["crackling"] },
        Step { offset_ms: 700, add: &["boxes-fading", "subtitle-visible"], remove: &[] },
        Step { offset_ms: 900, add: &[], remove: &["helix-warping"] },
        Step { offset_ms: 1200, add: &["dna-moving", "helix-forming"], remove: &[] },
        Step { offset_ms: 2300, add: &["energy-wave-active", "final-glow"], remove: &[] },
        Step { offset_ms: 2700, add: &["harmonia-visible", "harmonia-glow"], remove: &[] },
        Step {
            offset_ms: 3000,
            add: &["animation-complete"],
            remove: &["final-glow", "energy-wave-active", "harmonia-glow"],
        },
    ],
};

const REPEAT: StepTable = StepTable {
    duration_ms: 1500,
    steps: &[
        Step { offset_ms: 0, add: &["helix-warping"], remove: &[] },
        Step { offset_ms: 200, add: &["boxes-fading", "subtitle-visible"], remove: &[] },
        Step { offset_ms: 300, add: &[], remove: &["helix-warping"] },
        Step { offset_ms: 400, add: &["dna-moving", "helix-forming"], remove: &[] },
        Step { offset_ms: 1100, add: &["energy-wave-active", "final-glow"], remove: &[] },
        Step { offset_ms: 1300, add: &["harmonia-visible", "harmonia-glow"], remove: &[] },
        Step {
            offset_ms: 1500,
            add: &["animation-complete"],
            remove: &["final-glow", "energy-wave-active", "harmonia-glow"],
        },
    ],
};

pub static DESC: CardDesc = CardDesc {
    selector: ".science-card.genetic-card",
    duration_var: Some(("--genetic-duration", ["3s", "1.5s"])),
    first: FIRST,
    repeat: REPEAT,
    all_markers: ALL_MARKERS,
    completed: COMPLETED,
    completes_deck: false,
};
