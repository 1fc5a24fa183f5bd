//! Public geometry entry points, exercised without a scene.

use proptest::prelude::*;
use vesselgrid::*;

#[test]
fn reference_zone_distances() {
    let classifier = RadialZoneClassifier::new(Axis::Z, ZoneThresholds::new(2.0, 2.5)).unwrap();
    assert_eq!(classifier.classify(DVec3::new(1.0, 0.0, 0.0)), Zone::Inner);
    assert_eq!(classifier.classify(DVec3::new(2.3, 0.0, 0.0)), Zone::Middle);
    assert_eq!(classifier.classify(DVec3::new(3.0, 0.0, 0.0)), Zone::Outer);
}

#[test]
fn reference_rod_marks() {
    let marks = compute_rod_marks(Axis::X, 15.0, 5.0).unwrap();
    assert_eq!(marks.len(), 6);
    let xs: Vec<f64> = marks.iter().map(|p| p.x).collect();
    assert_eq!(xs, [-15.0, -10.0, -5.0, 5.0, 10.0, 15.0]);
}

#[test]
fn zero_counts_give_empty_grid() {
    for (nx, ny, nz) in [(0, 3, 3), (3, 0, 3), (3, 3, 0), (0, 0, 0)] {
        let elements = compute_grid(&GridSpec::new(nx, ny, nz, 1.0), 2.0, 2.5, Axis::Z).unwrap();
        assert!(elements.is_empty());
    }
}

#[test]
fn negative_count_is_a_configuration_error() {
    let err = compute_grid(&GridSpec::new(-1, 3, 3, 1.0), 2.0, 2.5, Axis::Z).unwrap_err();
    assert_eq!(
        err,
        GridError::NegativeCount {
            axis: Axis::X,
            count: -1
        }
    );
}

#[test]
fn overflowing_lattice_is_rejected_not_filtered() {
    let spec = GridSpec::new(1, 1, 1, f64::MAX).with_spacing(1.0, 1e300);
    assert!(matches!(
        compute_grid(&spec, 2.0, 2.5, Axis::Z),
        Err(GridError::NonFiniteScale(_))
    ));
}

#[test]
fn runaway_mark_walk_is_rejected() {
    assert!(matches!(
        compute_rod_marks(Axis::X, 1e12, 1e-3),
        Err(GridError::InvalidMarkSpacing(_))
    ));
}

proptest! {
    #[test]
    fn lattice_enumerates_every_cell(
        nx in 1i32..10,
        ny in 1i32..10,
        nz in 1i32..10,
        extent in 0.5f64..50.0,
    ) {
        let cells = compute_lattice(
            &GridSpec::new(nx, ny, nz, extent),
            ZoneThresholds::default(),
            Axis::Z,
        )
        .unwrap();
        prop_assert_eq!(cells.len(), usize::try_from(nx * ny * nz).unwrap());
    }

    #[test]
    fn lattice_is_centred_for_any_parity(
        nx in 1i32..10,
        ny in 1i32..10,
        nz in 1i32..10,
    ) {
        let cells = compute_lattice(
            &GridSpec::new(nx, ny, nz, 10.0),
            ZoneThresholds::default(),
            Axis::Y,
        )
        .unwrap();
        let sum: DVec3 = cells.iter().map(|c| c.position).sum();
        let mean = sum / cells.len() as f64;
        prop_assert!(mean.abs().max_element() < 1e-9);
    }

    #[test]
    fn entry_points_are_deterministic(
        n in 1i32..8,
        half_length in 0.0f64..30.0,
        spacing in 0.1f64..5.0,
    ) {
        let spec = GridSpec::cube(n, 8.0);
        prop_assert_eq!(
            compute_grid(&spec, 1.0, 2.0, Axis::X).unwrap(),
            compute_grid(&spec, 1.0, 2.0, Axis::X).unwrap()
        );
        prop_assert_eq!(
            compute_rod_marks(Axis::Z, half_length, spacing).unwrap(),
            compute_rod_marks(Axis::Z, half_length, spacing).unwrap()
        );
    }
}
