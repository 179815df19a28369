use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use feasible::{Error, FeasibilityOracle, FeasibleRegion, SampleSet};

fn band() -> FeasibleRegion {
    FeasibleRegion::new(vec![0.5, 0.5])
        .unwrap()
        .with_predicate(|x| (x[0] - x[1]).abs() <= 0.3)
}

#[test]
fn test_grow_then_shrink_keeps_prefix() {
    let region = band();
    let mut set = SampleSet::builder().seed(1).build(&region).unwrap();
    set.grow(10).unwrap();
    let before = set.export_coordinates();

    set.grow(5).unwrap();
    assert_eq!(set.export_coordinates(), before[..5].to_vec());
}

#[test]
fn test_grow_zero_fails_without_changes() {
    let region = band();
    let mut set = SampleSet::builder().seed(2).build(&region).unwrap();
    set.grow(7).unwrap();
    let before = set.export_coordinates();

    assert!(matches!(set.grow(0), Err(Error::InvalidTargetCount(0))));
    assert_eq!(set.export_coordinates(), before);
}

#[test]
fn test_grow_in_steps_appends() {
    let region = band();
    let mut set = SampleSet::builder().seed(3).build(&region).unwrap();
    set.grow(5).unwrap();
    let first = set.export_coordinates();

    set.grow(12).unwrap();
    let all = set.export_coordinates();
    assert_eq!(all.len(), 12);
    assert_eq!(all[..5], first[..]);
}

#[test]
fn test_same_seed_same_samples() {
    let region = band();
    let run = |seed| {
        let mut set = SampleSet::builder().seed(seed).build(&region).unwrap();
        set.grow(40).unwrap();
        set.diffuse_n(20).unwrap();
        set.export_coordinates()
    };

    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn test_densities_are_reciprocal() {
    let region = band();
    let mut set = SampleSet::builder().seed(4).build(&region).unwrap();
    set.grow(25).unwrap();

    for p in set.points() {
        assert!(p.log_density.is_finite());
        assert!((p.density() * p.inverse_density() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_stats_accumulate() {
    let region = band();
    let mut set = SampleSet::builder().seed(5).build(&region).unwrap();
    set.grow(20).unwrap();

    let stats = set.stats();
    assert_eq!(stats.searches, 19);
    assert!(stats.candidates >= 19 * 10);
}

#[test]
fn test_coverage_is_balanced() {
    // The unconstrained square is symmetric about x0 = 0.5.
    let region = FeasibleRegion::new(vec![0.5, 0.5]).unwrap();
    let mut set = SampleSet::builder().seed(8).build(&region).unwrap();
    set.grow(400).unwrap();
    set.diffuse_n(200).unwrap();

    #[allow(clippy::cast_precision_loss)]
    let left = set.points().iter().filter(|p| p.coordinates[0] < 0.5).count() as f64 / 400.0;
    assert!((0.35..=0.65).contains(&left), "left fraction {left}");
}

#[test]
fn test_grow_stops_when_cancelled() {
    let region = band();
    let mut set = SampleSet::builder().seed(6).build(&region).unwrap();
    let cancel = AtomicBool::new(false);

    let added = set
        .grow_while(1_000, |set| {
            if set.len() == 12 {
                cancel.store(true, Ordering::Relaxed);
            }
            if cancel.load(Ordering::Relaxed) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

    assert_eq!(added, 11);
    assert_eq!(set.len(), 12);
    assert!(set.points().iter().all(|p| region.is_feasible(&p.coordinates)));
}
