use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use feasible::{FeasibilityOracle, FeasibleRegion, SampleSet, StopReason};

fn annulus() -> FeasibleRegion {
    FeasibleRegion::new(vec![0.85, 0.5])
        .unwrap()
        .with_predicate(|x| {
            let r2 = (x[0] - 0.5).powi(2) + (x[1] - 0.5).powi(2);
            (0.04..=0.16).contains(&r2)
        })
}

#[test]
fn test_diffusion_preserves_size_and_feasibility() {
    let region = annulus();
    let mut set = SampleSet::builder().seed(41).build(&region).unwrap();
    set.grow(60).unwrap();
    set.diffuse_n(120).unwrap();

    assert_eq!(set.len(), 60);
    assert!(set.points().iter().all(|p| region.is_feasible(&p.coordinates)));
}

#[test]
fn test_diffuse_while_can_stop_on_state() {
    let region = annulus();
    let mut set = SampleSet::builder().seed(42).build(&region).unwrap();
    set.grow(10).unwrap();
    let searches_before = set.stats().searches;

    let steps = set
        .diffuse_while(|s| {
            if s.stats().searches >= searches_before + 15 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
    assert_eq!(steps, 15);
}

#[test]
fn test_cancel_from_another_thread() {
    let region = annulus();
    let mut set = SampleSet::builder().seed(43).build(&region).unwrap();
    set.grow(20).unwrap();

    let cancel = AtomicBool::new(false);
    let report = std::thread::scope(|scope| {
        scope.spawn(|| {
            std::thread::sleep(Duration::from_millis(30));
            cancel.store(true, Ordering::Relaxed);
        });
        set.diffuse_for(Duration::from_secs(30), &cancel).unwrap()
    });

    assert_eq!(report.reason, StopReason::Cancelled);
    assert!(report.elapsed < Duration::from_secs(30));
    assert_eq!(set.len(), 20);
    assert!(set.points().iter().all(|p| region.is_feasible(&p.coordinates)));
}
