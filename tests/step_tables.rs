// Invariants over the card animation step tables. These hold the close
// path to its contract: everything an opening sequence can add must be
// stripped by a close, and the completion step must be the last thing a
// sequence ever schedules.

use harmonia_site::cards::{CardDesc, StepTable, genetic, personality, synthesis};

fn descs() -> [(&'static str, &'static CardDesc); 3] {
    [
        ("personality", &personality::DESC),
        ("genetic", &genetic::DESC),
        ("synthesis", &synthesis::DESC),
    ]
}

fn check_table(name: &str, profile: &str, table: &StepTable, all_markers: &[&str]) {
    assert!(!table.steps.is_empty(), "{name}/{profile}: empty step table");

    let mut prev = None;
    for step in table.steps {
        if let Some(prev) = prev {
            assert!(
                step.offset_ms > prev,
                "{name}/{profile}: offsets not strictly increasing at {}",
                step.offset_ms
            );
        }
        prev = Some(step.offset_ms);

        for marker in step.add.iter().chain(step.remove) {
            assert!(
                all_markers.contains(marker),
                "{name}/{profile}: marker '{marker}' not covered by the close set"
            );
        }
    }

    let first = &table.steps[0];
    assert_eq!(first.offset_ms, 0, "{name}/{profile}: sequence must start at 0");
    let last = table.steps.last().unwrap();
    assert!(last.offset_ms > 0, "{name}/{profile}: completion step cannot be synchronous");
    assert_eq!(
        last.offset_ms, table.duration_ms,
        "{name}/{profile}: duration must equal the final offset"
    );
}

#[test]
fn step_tables_are_well_formed() {
    for (name, desc) in descs() {
        check_table(name, "first", &desc.first, desc.all_markers);
        check_table(name, "repeat", &desc.repeat, desc.all_markers);
    }
}

#[test]
fn repeat_profile_is_shorter() {
    for (name, desc) in descs() {
        assert!(
            desc.repeat.duration_ms < desc.first.duration_ms,
            "{name}: repeat profile must be the short one"
        );
    }
}

#[test]
fn every_card_reaches_completion() {
    for (name, desc) in descs() {
        for (profile, table) in [("first", &desc.first), ("repeat", &desc.repeat)] {
            let completes = table
                .steps
                .iter()
                .any(|s| s.add.contains(&"animation-complete"));
            assert!(completes, "{name}/{profile}: never marks animation-complete");
        }
    }
}

#[test]
fn completed_broadcast_markers_are_closable() {
    // The pause toggle forces the completed set on and later strips it; a
    // card close must also be able to strip it.
    for (name, desc) in descs() {
        for marker in desc.completed {
            assert!(
                desc.all_markers.contains(marker),
                "{name}: completed marker '{marker}' missing from the close set"
            );
        }
    }
}

#[test]
fn only_the_synthesis_card_completes_the_deck() {
    assert!(synthesis::DESC.completes_deck);
    assert!(!personality::DESC.completes_deck);
    assert!(!genetic::DESC.completes_deck);
}

#[test]
fn selectors_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for (_, desc) in descs() {
        assert!(seen.insert(desc.selector), "duplicate selector {}", desc.selector);
    }
}
