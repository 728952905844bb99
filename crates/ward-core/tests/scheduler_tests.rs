// Weighted pattern sequencing and timed rotation.

use ward_core::scheduler::{PatternPools, ShapeScheduler, WeightMap};

fn pools() -> PatternPools {
    let mut pools = PatternPools::new();
    pools.insert("neutral", &["orb", "ring", "drift"]);
    pools.insert("calming", &["slow_wave", "halo"]);
    pools.insert("strengthening", &["starburst", "lattice", "pulse"]);
    pools
}

#[test]
fn sequence_length_tracks_weight_shares() {
    let mut sched = ShapeScheduler::new(8000.0, 0.0);
    let weights = WeightMap::of(&[("neutral", 0.7), ("calming", 0.1), ("strengthening", 0.2)]);
    sched.build_sequence(&pools(), &weights);

    // repeats: round(7)=7, round(1)=1, round(2)=2
    let seq = sched.sequence();
    assert_eq!(seq.len(), 7 * 3 + 2 + 2 * 3);

    let neutral_count = seq.iter().filter(|p| p.as_str() == "orb").count();
    let calming_count = seq.iter().filter(|p| p.as_str() == "halo").count();
    let strong_count = seq.iter().filter(|p| p.as_str() == "pulse").count();
    assert_eq!(neutral_count, 7);
    assert_eq!(calming_count, 1);
    assert_eq!(strong_count, 2);
}

#[test]
fn sequence_follows_weight_map_order() {
    let mut sched = ShapeScheduler::new(8000.0, 0.0);
    let weights = WeightMap::of(&[("strengthening", 0.6), ("neutral", 0.3), ("calming", 0.1)]);
    sched.build_sequence(&pools(), &weights);
    assert_eq!(sched.sequence()[0], "starburst");
}

#[test]
fn zero_total_weight_falls_back_to_neutral_verbatim() {
    let mut sched = ShapeScheduler::new(8000.0, 0.0);
    sched.build_sequence(&pools(), &WeightMap::of(&[("neutral", 0.0), ("calming", 0.0)]));
    assert_eq!(sched.sequence(), ["orb", "ring", "drift"]);
}

#[test]
fn unresolved_pools_fall_back_to_neutral() {
    let mut sched = ShapeScheduler::new(8000.0, 0.0);
    sched.build_sequence(&pools(), &WeightMap::of(&[("missing", 1.0)]));
    assert_eq!(sched.sequence(), ["orb", "ring", "drift"]);
}

#[test]
fn rotation_advances_once_per_interval() {
    let mut sched = ShapeScheduler::new(8000.0, 0.0);
    sched.build_sequence(&pools(), &WeightMap::of(&[("neutral", 1.0)]));
    assert_eq!(sched.rotation_index(), 0);

    sched.tick(7999.0);
    assert_eq!(sched.rotation_index(), 0, "advanced before the interval");

    sched.tick(8000.0);
    assert_eq!(sched.rotation_index(), 1);

    // Subsequent frames inside the next interval do not advance
    sched.tick(8100.0);
    sched.tick(12000.0);
    assert_eq!(sched.rotation_index(), 1);

    sched.tick(16000.0);
    assert_eq!(sched.rotation_index(), 2);
    assert_eq!(sched.current(), Some("drift"));
}

#[test]
fn rotation_wraps_around_the_sequence() {
    let mut sched = ShapeScheduler::new(1000.0, 0.0);
    sched.build_sequence(&pools(), &WeightMap::of(&[("calming", 1.0)]));
    assert_eq!(sched.sequence().len(), 20); // 10 repeats of a 2-pattern pool

    let mut t = 0.0;
    for _ in 0..20 {
        t += 1000.0;
        sched.tick(t);
    }
    assert_eq!(sched.rotation_index(), 0, "full cycle should wrap to start");
}

#[test]
fn rebuild_preserves_rotation_position() {
    let mut sched = ShapeScheduler::new(1000.0, 0.0);
    sched.build_sequence(&pools(), &WeightMap::of(&[("neutral", 1.0)]));
    sched.tick(1000.0);
    sched.tick(2000.0);
    assert_eq!(sched.rotation_index(), 2);

    // Rebuilding re-wraps the pointer but keeps elapsed rotation time
    sched.build_sequence(&pools(), &WeightMap::of(&[("calming", 1.0)]));
    assert_eq!(sched.rotation_index(), 2);
    sched.tick(2500.0);
    assert_eq!(sched.rotation_index(), 2, "rebuild must not grant an early advance");
    sched.tick(3000.0);
    assert_eq!(sched.rotation_index(), 3);
}

#[test]
fn empty_pools_yield_empty_sequence_without_panic() {
    let mut sched = ShapeScheduler::new(8000.0, 0.0);
    sched.build_sequence(&PatternPools::new(), &WeightMap::of(&[("neutral", 1.0)]));
    assert!(sched.sequence().is_empty());
    assert_eq!(sched.current(), None);
    sched.tick(9000.0);
    assert_eq!(sched.rotation_index(), 0);
}
