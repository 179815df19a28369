#![cfg(feature = "serde")]

use feasible::{Error, FeasibleRegion, Point, SampleSet, SampleSetSnapshot};

fn tempdir() -> std::path::PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir =
        std::env::temp_dir().join(format!("feasible_serde_test_{}_{id}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn wedge() -> FeasibleRegion {
    FeasibleRegion::new(vec![0.6, 0.3])
        .unwrap()
        .with_predicate(|x| x[1] <= x[0])
}

#[test]
fn round_trip_save_load() {
    let region = wedge();
    let mut set = SampleSet::builder().seed(1).build(&region).unwrap();
    set.grow(30).unwrap();

    let dir = tempdir();
    let path = dir.join("samples.json");
    set.save(&path).unwrap();
    assert!(!dir.join(".samples.json.tmp").exists());

    let loaded = SampleSet::load(&path, &region, SampleSet::builder().seed(2)).unwrap();
    assert_eq!(loaded.points(), set.points());
    assert_eq!(loaded.stats().searches, 0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn loaded_set_keeps_sampling() {
    let region = wedge();
    let mut set = SampleSet::builder().seed(3).build(&region).unwrap();
    set.grow(10).unwrap();

    let dir = tempdir();
    let path = dir.join("samples.json");
    set.save(&path).unwrap();

    let mut loaded = SampleSet::load(&path, &region, SampleSet::builder().seed(4)).unwrap();
    loaded.grow(25).unwrap();
    loaded.diffuse_n(10).unwrap();
    assert_eq!(loaded.len(), 25);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_rejects_other_region() {
    let region = wedge();
    let mut set = SampleSet::builder().seed(5).build(&region).unwrap();
    set.grow(10).unwrap();

    let dir = tempdir();
    let path = dir.join("samples.json");
    set.save(&path).unwrap();

    let flipped = FeasibleRegion::new(vec![0.3, 0.6])
        .unwrap()
        .with_predicate(|x| x[1] >= x[0]);
    let result = SampleSet::load(&path, &flipped, SampleSet::builder());
    assert!(matches!(result, Err(Error::InvalidOrigin { .. })));

    let cube = FeasibleRegion::new(vec![0.5, 0.5, 0.5]).unwrap();
    let result = SampleSet::load(&path, &cube, SampleSet::builder());
    assert!(matches!(result, Err(Error::DimensionMismatch { .. })));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_rejects_garbage() {
    let dir = tempdir();
    let path = dir.join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = SampleSet::load(&path, wedge(), SampleSet::builder());
    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
        other => panic!("expected an I/O error, got {other:?}"),
    }

    let result = SampleSet::load(dir.join("missing.json"), wedge(), SampleSet::builder());
    assert!(matches!(result, Err(Error::Io(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn snapshot_json_shape() {
    let snapshot = SampleSetSnapshot {
        version: 1,
        dimension: 1,
        points: vec![Point {
            coordinates: vec![0.25],
            log_density: -0.5,
        }],
    };
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["dimension"], 1);
    assert_eq!(json["points"][0]["coordinates"][0], 0.25);
    assert_eq!(json["points"][0]["log_density"], -0.5);

    let back: SampleSetSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
}
