use feasible::{EdgeDetector, Error, FeasibilityOracle, FeasibleRegion, SampleSet};

fn triangle() -> FeasibleRegion {
    FeasibleRegion::new(vec![0.5, 0.5])
        .unwrap()
        .with_predicate(|x| x[0] + x[1] <= 1.0)
}

#[test]
fn test_triangle_grow_and_diffuse() {
    let region = triangle();
    let mut set = SampleSet::builder().seed(2024).build(&region).unwrap();

    set.grow(100).unwrap();
    let rows = set.export_coordinates();
    assert_eq!(rows.len(), 100);
    for row in &rows {
        assert!(row[0] + row[1] <= 1.0);
        assert!(row.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    for _ in 0..50 {
        set.diffuse().unwrap();
    }
    let rows = set.export_coordinates();
    assert_eq!(rows.len(), 100);
    assert!(rows.iter().all(|row| region.is_feasible(row)));
}

#[test]
fn test_origin_on_boundary() {
    // The example sits exactly on the constraint x0 + x1 = 1.
    let region = FeasibleRegion::new(vec![0.5, 0.5])
        .unwrap()
        .with_predicate(|x| x[0] + x[1] <= 1.0);
    let detector = EdgeDetector::new(&region, 24);

    let edges = detector.detect_edges(&[0.5, 0.5]).unwrap();
    for edge in edges.positive.iter().chain(&edges.negative) {
        assert!(region.is_feasible(edge));
    }
    // Moving along +e_i leaves the region immediately.
    assert!((edges.positive[0][0] - 0.5).abs() < 1e-6);
    assert!((edges.positive[1][1] - 0.5).abs() < 1e-6);
    // Moving along -e_i reaches the cube face.
    assert!(edges.negative[0][0] < 1e-6);
    assert!(edges.negative[1][1] < 1e-6);

    let mut set = SampleSet::builder().seed(5).build(&region).unwrap();
    set.grow(30).unwrap();
    assert!(set.points().iter().all(|p| region.is_feasible(&p.coordinates)));
}

#[test]
fn test_thin_corridor_escalates() {
    let region = FeasibleRegion::new(vec![0.5, 0.5])
        .unwrap()
        .with_predicate(|x| (x[0] - 0.5).abs() <= 0.01);
    let mut set = SampleSet::builder()
        .seed(77)
        .initial_batch_size(1)
        .batch_growth(10)
        .max_escalations(Some(4))
        .build(&region)
        .unwrap();

    match set.grow(50) {
        Ok(()) => {
            assert_eq!(set.len(), 50);
            assert!(set.stats().escalations > 0);
        }
        Err(Error::SearchExhausted {
            escalations,
            batch_size,
        }) => {
            assert_eq!(escalations, 4);
            assert_eq!(batch_size, 10_000);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
    for p in set.points() {
        assert!((p.coordinates[0] - 0.5).abs() <= 0.01);
    }
}

#[test]
fn test_constraint_source_end_to_end() {
    let source = "\
# quarter disc around the origin corner
2
0.1, 0.1
x0^2 + x1^2 <= 0.5^2
x0 >= 0.01 and x1 >= 0.01
";
    let region = FeasibleRegion::from_source(source).unwrap();
    let mut set = SampleSet::builder().seed(9).build(&region).unwrap();
    set.grow(60).unwrap();
    set.diffuse_n(30).unwrap();

    for p in set.points() {
        let [a, b] = p.coordinates[..] else {
            panic!("expected two coordinates");
        };
        assert!(a * a + b * b <= 0.25);
        assert!(a >= 0.01 && b >= 0.01);
    }
}

#[test]
fn test_higher_dimension_simplex() {
    let region = FeasibleRegion::new(vec![0.1; 5])
        .unwrap()
        .with_predicate(|x| x.iter().sum::<f64>() <= 1.0);
    let mut set = SampleSet::builder().seed(3).build(&region).unwrap();
    set.grow(80).unwrap();

    assert_eq!(set.len(), 80);
    assert!(set.points().iter().all(|p| p.coordinates.len() == 5));
    assert!(set.points().iter().all(|p| region.is_feasible(&p.coordinates)));
}

#[test]
fn test_narrow_box_in_many_dimensions() {
    // The peak density of this box's local model is about e^718, past f64.
    let region = FeasibleRegion::new(vec![0.5; 120])
        .unwrap()
        .with_predicate(|x| x.iter().all(|v| (v - 0.5).abs() <= 0.001));
    let mut set = SampleSet::builder()
        .seed(1)
        .edge_iterations(16)
        .max_escalations(Some(1))
        .build(&region)
        .unwrap();
    assert!(set.points()[0].log_density.is_finite());

    match set.find_next_entry() {
        Ok(point) => {
            assert!(region.is_feasible(&point.coordinates));
            assert!(point.log_density.is_finite());
        }
        Err(err) => assert!(matches!(err, Error::SearchExhausted { .. }), "{err}"),
    }
}
