use feasible::{EdgeDetector, Error, FeasibilityOracle, FeasibleRegion};

fn disc() -> FeasibleRegion {
    FeasibleRegion::new(vec![0.5, 0.5])
        .unwrap()
        .with_predicate(|x| (x[0] - 0.5).powi(2) + (x[1] - 0.5).powi(2) <= 0.09)
}

#[test]
fn test_edges_of_disc() {
    let region = disc();
    let detector = EdgeDetector::new(&region, 30);
    let edges = detector.detect_edges(&[0.5, 0.5]).unwrap();

    for axis in 0..2 {
        assert!((edges.positive[axis][axis] - 0.8).abs() < 1e-6);
        assert!((edges.negative[axis][axis] - 0.2).abs() < 1e-6);
    }
    for hw in edges.half_widths() {
        assert!((hw - 0.3).abs() < 1e-6);
    }
}

#[test]
fn test_edges_stay_feasible_and_within_ray() {
    let region = disc();
    let detector = EdgeDetector::new(&region, 12);
    let origin = [0.6, 0.45];
    let edges = detector.detect_edges(&origin).unwrap();

    for (axis, (pos, neg)) in edges.positive.iter().zip(&edges.negative).enumerate() {
        assert!(region.is_feasible(pos));
        assert!(region.is_feasible(neg));
        assert!(pos[axis] >= origin[axis] && pos[axis] <= 1.0);
        assert!(neg[axis] <= origin[axis] && neg[axis] >= 0.0);
        // Off-axis coordinates are untouched.
        let other = 1 - axis;
        assert!((pos[other] - origin[other]).abs() < f64::EPSILON);
        assert!((neg[other] - origin[other]).abs() < f64::EPSILON);
    }
}

#[test]
fn test_diagonal_direction() {
    let region = disc();
    let detector = EdgeDetector::new(&region, 30);
    let probe = detector.detect_along(&[0.5, 0.5], &[1.0, 1.0]).unwrap();

    assert!(region.is_feasible(&probe.point));
    let radius = ((probe.point[0] - 0.5).powi(2) + (probe.point[1] - 0.5).powi(2)).sqrt();
    assert!((radius - 0.3).abs() < 1e-6);
}

#[test]
fn test_invalid_inputs() {
    let region = disc();
    let detector = EdgeDetector::new(&region, 10);

    assert!(matches!(
        detector.detect_edges(&[0.5]),
        Err(Error::DimensionMismatch {
            expected: 2,
            got: 1
        })
    ));
    assert!(matches!(
        detector.detect_edges(&[0.0, 0.0]),
        Err(Error::InvalidOrigin { .. })
    ));
    assert!(matches!(
        detector.detect_along(&[0.5, 0.5], &[0.0, 0.0]),
        Err(Error::ZeroDirection)
    ));
}
