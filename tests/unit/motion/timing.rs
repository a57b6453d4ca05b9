use super::*;

#[test]
fn progress_waits_for_delay_then_completes() {
    let t = Transition::new(0.8).with_delay(0.4).with_ease(Ease::Linear);
    assert_eq!(t.progress(0.0), 0.0);
    assert_eq!(t.progress(0.4), 0.0);
    assert_eq!(t.progress(0.8), 0.5);
    assert_eq!(t.progress(1.3), 1.0);
    assert_eq!(t.progress(99.0), 1.0);
    assert!((t.end_time() - 1.2).abs() < 1e-12);
}

#[test]
fn zero_duration_jumps_to_end() {
    let t = Transition::new(0.0);
    assert_eq!(t.progress(0.0), 1.0);
}

#[test]
fn reduced_profile_halves_durations() {
    let t = Transition::new(0.6).with_delay(0.2).tuned(&MotionTuning::REDUCED);
    assert_eq!(t.duration, 0.3);
    assert_eq!(t.delay, 0.1);
}

#[test]
fn mobile_stagger_is_tighter() {
    let s = Stagger::new(0.2, 0.12);
    let full = s.child_delay(3, &MotionTuning::FULL);
    let mobile = s.child_delay(3, &MotionTuning::MOBILE);
    let reduced = s.child_delay(3, &MotionTuning::REDUCED);
    assert!((full - 0.56).abs() < 1e-12);
    assert!(mobile < full);
    assert!((reduced - 0.1).abs() < 1e-12);
}

#[test]
fn negative_times_are_rejected() {
    assert!(Transition::new(-0.1).validate().is_err());
    assert!(Stagger::new(0.0, -1.0).validate().is_err());
    assert!(Transition::default().validate().is_ok());
}

fn bounce() -> Loop {
    let keyframes = BTreeMap::from([(Attribute::TranslateY, vec![0.0, 8.0, 0.0])]);
    Loop::new(&keyframes, None, 1.5)
        .unwrap()
        .with_ease(Ease::Linear)
}

#[test]
fn loop_spreads_keyframes_evenly_and_repeats() {
    let l = bounce();
    let full = MotionTuning::FULL;
    assert_eq!(l.sample(0.0, &full).translate_y, 0.0);
    assert!((l.sample(0.375, &full).translate_y - 4.0).abs() < 1e-9);
    assert!((l.sample(0.75, &full).translate_y - 8.0).abs() < 1e-9);
    assert!((l.sample(0.75 + 1.5 * 40.0, &full).translate_y - 8.0).abs() < 1e-9);
}

#[test]
fn loop_holds_last_keyframe_during_repeat_delay() {
    let keyframes = BTreeMap::from([(Attribute::Scale, vec![1.0, 1.2])]);
    let l = Loop::new(&keyframes, None, 2.0)
        .unwrap()
        .with_ease(Ease::Linear)
        .with_repeat_delay(0.5);
    let full = MotionTuning::FULL;
    assert!((l.sample(2.25, &full).scale - 1.2).abs() < 1e-9);
    assert!((l.sample(3.5, &full).scale - 1.1).abs() < 1e-9);
}

#[test]
fn loop_waits_for_its_delay() {
    let l = bounce().with_delay(1.0);
    assert_eq!(l.cycle_position(0.5, &MotionTuning::FULL), 0.0);
    assert!((l.cycle_position(1.75, &MotionTuning::FULL) - 0.5).abs() < 1e-9);
}

#[test]
fn reduced_motion_holds_first_keyframe() {
    let keyframes = BTreeMap::from([
        (Attribute::TranslateY, vec![0.0, -20.0, 0.0]),
        (Attribute::Opacity, vec![0.0, 0.4, 0.0]),
    ]);
    let l = Loop::new(&keyframes, None, 20.0).unwrap();
    for t in [0.0, 5.0, 10.0, 123.4] {
        let p = l.sample(t, &MotionTuning::REDUCED);
        assert_eq!(p.translate_y, 0.0);
        assert_eq!(p.opacity, 0.0);
    }
}

#[test]
fn mobile_loops_run_faster_and_smaller() {
    let l = bounce();
    // 1.5s * 0.75 cycle, peak at half of it
    let p = l.sample(0.5625, &MotionTuning::MOBILE);
    assert!((p.translate_y - 8.0 * 0.6).abs() < 1e-9);
}

#[test]
fn ease_applies_per_segment() {
    let keyframes = BTreeMap::from([(Attribute::TranslateY, vec![0.0, 8.0, 0.0])]);
    let l = Loop::new(&keyframes, None, 1.0).unwrap();
    let full = MotionTuning::FULL;
    // ease-in-out is symmetric, so each segment midpoint is the value midpoint
    assert!((l.sample(0.25, &full).translate_y - 4.0).abs() < 1e-6);
    assert!(l.sample(0.05, &full).translate_y < 0.8);
}

#[test]
fn loop_rejects_bad_keyframes() {
    let ragged = BTreeMap::from([
        (Attribute::Scale, vec![1.0, 1.2, 1.0]),
        (Attribute::Opacity, vec![1.0, 0.8]),
    ]);
    assert!(Loop::new(&ragged, None, 2.0).is_err());
    assert!(Loop::new(&BTreeMap::new(), None, 2.0).is_err());

    let keyframes = BTreeMap::from([(Attribute::Scale, vec![1.0, 1.2])]);
    assert!(Loop::new(&keyframes, None, 0.0).is_err());
    assert!(Loop::new(&keyframes, Some(&[0.0, 1.5][..]), 1.0).is_err());
    assert!(Loop::new(&keyframes, Some(&[0.5, 0.5][..]), 1.0).is_err());
}
