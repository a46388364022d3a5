// Roast catalog selection

use rand::SeedableRng;
use rand::rngs::StdRng;
use roastmon::commentary::{ROASTS, pick, roast};
use roastmon::models::SystemStats;
use std::collections::HashSet;

#[test]
fn test_pick_is_deterministic_for_a_seeded_rng() {
    let draws = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..32).map(|_| pick(&ROASTS, &mut rng)).collect::<Vec<_>>()
    };
    assert_eq!(draws(7), draws(7));
}

#[test]
fn test_pick_eventually_covers_every_entry() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        seen.insert(pick(&ROASTS, &mut rng));
        if seen.len() == ROASTS.len() {
            break;
        }
    }
    assert_eq!(seen.len(), ROASTS.len(), "some catalog entry was never drawn");
}

#[test]
fn test_pick_only_returns_catalog_entries() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..256 {
        let line = pick(&ROASTS, &mut rng);
        assert!(ROASTS.contains(&line));
    }
}

#[test]
fn test_roast_ignores_the_snapshot_and_stays_in_catalog() {
    let idle = SystemStats::default();
    let busy = SystemStats {
        cpu: Some(99.9),
        gpu_temp: Some(105.0),
        ..SystemStats::default()
    };
    for stats in [idle, busy] {
        let message = roast(&stats);
        assert!(ROASTS.contains(&message.as_str()));
    }
}
