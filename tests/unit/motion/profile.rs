use super::*;
use crate::animation::anim::Curve;
use crate::animation::params::AttributeCurves;

fn prefs(narrow: bool, reduced: bool) -> Preferences {
    Preferences {
        is_narrow_viewport: narrow,
        prefers_reduced_motion: reduced,
    }
}

#[test]
fn reduced_motion_wins_over_narrow() {
    assert_eq!(MotionProfile::select(prefs(false, false)), MotionProfile::Full);
    assert_eq!(MotionProfile::select(prefs(true, false)), MotionProfile::Mobile);
    assert_eq!(MotionProfile::select(prefs(false, true)), MotionProfile::Reduced);
    assert_eq!(MotionProfile::select(prefs(true, true)), MotionProfile::Reduced);
}

#[test]
fn reduced_amplitude_is_materially_smaller() {
    let curves = AttributeCurves::new().with(
        Attribute::TranslateY,
        Curve::from_pairs(&[(0.0, 0.0), (1.0, 120.0)]).unwrap(),
    );
    let profiles = MotionProfiles::default();
    let full = curves.sample(1.0, profiles.tuning(MotionProfile::Full));
    let reduced = curves.sample(1.0, profiles.tuning(MotionProfile::Reduced));
    assert_eq!(full.translate_y, 120.0);
    assert!(reduced.translate_y <= 20.0);
    assert!(reduced.translate_y > 0.0);
}

#[test]
fn mobile_shrinks_offsets_less_than_reduced() {
    let m = MotionTuning::MOBILE.scale(Attribute::TranslateY, 100.0);
    let r = MotionTuning::REDUCED.scale(Attribute::TranslateY, 100.0);
    assert!(r < m && m < 100.0);
}

#[test]
fn partial_override_keeps_other_profiles() {
    let p: MotionProfiles =
        serde_json::from_str(r#"{ "mobile": { "amplitude": 0.5, "duration": 0.5, "stagger": 0.25 } }"#)
            .unwrap();
    assert_eq!(p.full, MotionTuning::FULL);
    assert_eq!(p.reduced, MotionTuning::REDUCED);
    assert_eq!(p.mobile.stagger, 0.25);
}

#[test]
fn negative_factor_is_rejected() {
    let mut p = MotionProfiles::default();
    p.reduced.duration = -1.0;
    assert!(p.validate().is_err());
}
