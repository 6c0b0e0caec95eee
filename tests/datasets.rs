// Integration tests for the partnership tier dataset and other static
// tables. Native-friendly; no wasm/browser APIs.

use std::collections::HashSet;

use harmonia_site::partners::{TIERS, Tier, tier_info};
use harmonia_site::radar::{RADAR_A, RADAR_B, STATUS_TEXTS};
use harmonia_site::rng::Lcg;
use harmonia_site::webgl::{Palette, palette_for, seed_particles, step_particles};
use harmonia_site::webgl::ParticleOptions;

#[test]
fn tier_keys_parse_and_round_trip() {
    for tier in Tier::ALL {
        assert_eq!(Tier::parse(tier.key()), Some(tier));
    }
    assert_eq!(Tier::parse("enterprise"), None);
}

#[test]
fn tier_dataset_is_complete() {
    assert_eq!(TIERS.len(), Tier::ALL.len());
    let mut seen = HashSet::new();
    for info in &TIERS {
        assert!(seen.insert(info.tier.key()), "duplicate tier '{}'", info.tier.key());
        assert!(!info.title.is_empty());
        assert!(!info.intro.is_empty());
        assert!(!info.placeholder.is_empty());
        assert!(!info.cta.is_empty());

        let mut box_keys = HashSet::new();
        for tier_box in &info.boxes {
            assert!(
                box_keys.insert(tier_box.key),
                "duplicate box key '{}' in tier '{}'",
                tier_box.key,
                info.tier.key()
            );
            assert!(!tier_box.title.is_empty());
            assert!(!tier_box.desc.is_empty());
            assert!(!tier_box.icon.is_empty());
            assert!(!tier_box.modal_desc.is_empty());
            for bullet in &tier_box.bullets {
                assert!(!bullet.is_empty(), "empty bullet in '{}'", tier_box.key);
            }
        }
    }
}

#[test]
fn tier_info_resolves_each_tier() {
    for tier in Tier::ALL {
        assert_eq!(tier_info(tier).tier, tier);
    }
}

#[test]
fn radar_status_texts_are_distinct() {
    let set: HashSet<&str> = STATUS_TEXTS.iter().copied().collect();
    assert_eq!(set.len(), STATUS_TEXTS.len());
}

#[test]
fn radar_jitter_stays_in_band() {
    let mut rng = Lcg::new(7);
    for base in [&RADAR_A, &RADAR_B] {
        let points = harmonia_site::radar::jitter_points(base.as_slice(), &mut rng);
        let pairs: Vec<&str> = points.split(' ').collect();
        assert_eq!(pairs.len(), base.len());
        for (i, pair) in pairs.iter().enumerate() {
            let (x, y) = pair.split_once(',').expect("malformed point");
            let x: f64 = x.parse().unwrap();
            let y: f64 = y.parse().unwrap();
            let (bx, by) = base[i];
            if i == 0 || i == 3 {
                // Anchored vertices keep their X.
                assert_eq!(x, bx);
            } else {
                assert!((x - bx).abs() < 15.0 + 1e-9);
            }
            assert!((y - by).abs() < 15.0 + 1e-9);
        }
    }
}

#[test]
fn lcg_is_deterministic_and_bounded() {
    let mut a = Lcg::new(42);
    let mut b = Lcg::new(42);
    for _ in 0..100 {
        let va = a.next_f64();
        assert_eq!(va, b.next_f64());
        assert!((0.0..1.0).contains(&va));
    }
    // Successive draws differ.
    let mut c = Lcg::new(1);
    assert_ne!(c.next_u32(), c.next_u32());
}

#[test]
fn particles_wrap_toroidally() {
    let palette = palette_for(false);
    let mut rng = Lcg::new(3);
    let opts = ParticleOptions { count: 32, ..Default::default() };
    let mut particles = seed_particles(&opts, palette, 100.0, 50.0, &mut rng);
    assert_eq!(particles.len(), 32);

    // Push one particle past each edge and step once.
    particles[0].x = 99.9;
    particles[0].vx = 1.0;
    particles[1].x = 0.05;
    particles[1].vx = -1.0;
    particles[2].y = 49.9;
    particles[2].vy = 1.0;
    particles[3].y = 0.05;
    particles[3].vy = -1.0;
    step_particles(&mut particles, 100.0, 50.0);
    assert_eq!(particles[0].x, 0.0);
    assert_eq!(particles[1].x, 100.0);
    assert_eq!(particles[2].y, 0.0);
    assert_eq!(particles[3].y, 50.0);

    // Count never changes under stepping.
    for _ in 0..1000 {
        step_particles(&mut particles, 100.0, 50.0);
    }
    assert_eq!(particles.len(), 32);
    for p in &particles {
        assert!((0.0..=100.0).contains(&p.x));
        assert!((0.0..=50.0).contains(&p.y));
    }
}

#[test]
fn seeded_particles_respect_options() {
    let palette = palette_for(true);
    let mut rng = Lcg::new(11);
    let opts = ParticleOptions { count: 64, min_size: 1.0, max_size: 3.0, speed: 0.3 };
    let particles = seed_particles(&opts, palette, 800.0, 600.0, &mut rng);
    for p in &particles {
        assert!((0.0..800.0).contains(&p.x));
        assert!((0.0..600.0).contains(&p.y));
        assert!(p.vx.abs() <= 0.15 + 1e-6);
        assert!(p.vy.abs() <= 0.15 + 1e-6);
        assert!((1.0..=3.0).contains(&p.size));
        assert!((0.2..0.7).contains(&p.alpha));
        assert!(p.color == palette.primary || p.color == palette.secondary);
    }
}

#[test]
fn palettes_differ_by_theme() {
    let light = palette_for(false);
    let dark = palette_for(true);
    assert_ne!(light, dark);
    assert_eq!(light, Palette { primary: [0.83, 0.66, 0.33], secondary: [0.45, 0.18, 0.22] });
}
