use super::*;
use proptest::prelude::*;

fn tri() -> Curve {
    Curve::from_pairs(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]).unwrap()
}

#[test]
fn midpoint_of_first_segment() {
    assert_eq!(tri().sample(0.25), 0.5);
    assert_eq!(tri().sample(0.75), 0.5);
}

#[test]
fn exact_at_control_points() {
    let c = Curve::from_pairs(&[(0.0, 1.0), (0.4, 0.8), (0.6, 0.0)]).unwrap();
    for cp in c.points() {
        assert_eq!(c.sample(cp.progress), cp.value);
    }
}

#[test]
fn clamps_outside_range() {
    let c = Curve::from_pairs(&[(0.0, 0.0), (0.5, 8.0)]).unwrap();
    assert_eq!(c.sample(-3.0), 0.0);
    assert_eq!(c.sample(0.9), 8.0);
    assert_eq!(c.sample(42.0), 8.0);
}

#[test]
fn extend_continues_outer_slope() {
    let c = Curve::from_pairs(&[(0.0, 100.0), (1.0, -100.0)])
        .unwrap()
        .with_extrapolation(Extrapolation::Extend);
    assert_eq!(c.sample(1.5), -200.0);
    assert_eq!(c.sample(-0.5), 200.0);
}

#[test]
fn single_point_curve_is_constant() {
    let c = Curve::constant(3.0);
    assert_eq!(c.sample(-1.0), 3.0);
    assert_eq!(c.sample(0.5), 3.0);
    assert_eq!(c.with_extrapolation(Extrapolation::Extend).sample(9.0), 3.0);
}

#[test]
fn nan_progress_yields_first_value() {
    assert_eq!(tri().sample(f64::NAN), 0.0);
}

#[test]
fn validation_rejects_bad_curves() {
    assert!(Curve::new(std::iter::empty::<ControlPoint>()).is_err());
    assert!(Curve::from_pairs(&[(0.5, 0.0), (0.5, 1.0)]).is_err());
    assert!(Curve::from_pairs(&[(0.6, 0.0), (0.5, 1.0)]).is_err());
    assert!(Curve::from_pairs(&[(0.0, f64::INFINITY)]).is_err());
}

#[test]
fn control_point_serializes_as_pair() {
    let cp: ControlPoint = serde_json::from_str("[0.25, 12]").unwrap();
    assert_eq!(cp, ControlPoint::new(0.25, 12.0));
    assert_eq!(serde_json::to_string(&cp).unwrap(), "[0.25,12.0]");
}

#[test]
fn empty_slice_interpolates_to_zero() {
    assert_eq!(interpolate(0.3, &[]), 0.0);
}

proptest! {
    #[test]
    fn clamped_mode_is_idempotent_outside_unit_range(p in 1.0f64..1_000.0) {
        let c = tri();
        prop_assert_eq!(c.sample(-p), 0.0);
        prop_assert_eq!(c.sample(1.0 + p), 0.0);
    }

    #[test]
    fn rising_segment_is_monotonic(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let c = Curve::from_pairs(&[(0.0, -20.0), (0.3, 5.0), (1.0, 150.0)]).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(c.sample(lo) <= c.sample(hi));
    }

    #[test]
    fn samples_stay_within_control_value_bounds(p in -2.0f64..3.0) {
        let c = Curve::from_pairs(&[(0.0, 1.0), (0.4, 0.8), (0.6, 0.0)]).unwrap();
        let v = c.sample(p);
        prop_assert!((0.0..=1.0).contains(&v));
    }
}
