use super::*;
use std::cell::RefCell;

#[test]
fn initial_read_happens_at_construction() {
    let reduced = SharedFlag::new(true);
    let d = PreferenceDetector::with_breakpoint(768.0, reduced);
    assert!(d.current().prefers_reduced_motion);
    assert_eq!(d.profile(), MotionProfile::Reduced);
    assert_eq!(d.generation(), 0);
}

#[test]
fn failed_queries_degrade_to_baseline() {
    let d = PreferenceDetector::new(
        NarrowSource::Query(Box::new(|| -> Result<bool, QueryError> {
            Err(QueryError::Failed("no window".into()))
        })),
        SharedFlag::unavailable(),
    );
    assert_eq!(d.current(), Preferences::default());
    assert_eq!(d.profile(), MotionProfile::Full);
}

#[test]
fn flip_notifies_listeners_once() {
    let reduced = SharedFlag::new(false);
    let mut d = PreferenceDetector::with_breakpoint(768.0, reduced.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    d.subscribe(move |p| sink.borrow_mut().push(p));

    assert!(!d.on_media_change(MediaFeature::ReducedMotion));
    reduced.set(true);
    assert!(d.on_media_change(MediaFeature::ReducedMotion));
    assert!(!d.on_media_change(MediaFeature::ReducedMotion));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].prefers_reduced_motion);
    assert_eq!(d.generation(), 1);
}

#[test]
fn breakpoint_tracks_viewport_width() {
    let mut d = PreferenceDetector::default();
    assert!(!d.current().is_narrow_viewport);
    assert!(d.observe_viewport(Viewport::new(390.0, 844.0).unwrap()));
    assert_eq!(d.profile(), MotionProfile::Mobile);
    assert!(!d.observe_viewport(Viewport::new(500.0, 844.0).unwrap()));
    assert!(d.observe_viewport(Viewport::new(768.0, 1024.0).unwrap()));
    assert!(!d.current().is_narrow_viewport);
}

#[test]
fn query_source_ignores_viewport() {
    let narrow = SharedFlag::new(false);
    let mut d = PreferenceDetector::new(
        NarrowSource::Query(Box::new(narrow.clone())),
        SharedFlag::new(false),
    );
    assert!(!d.observe_viewport(Viewport::new(100.0, 100.0).unwrap()));
    narrow.set(true);
    assert!(d.refresh());
    assert!(d.current().is_narrow_viewport);
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let reduced = SharedFlag::new(false);
    let mut d = PreferenceDetector::with_breakpoint(768.0, reduced.clone());
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let id = d.subscribe(move |_| c.set(c.get() + 1));
    assert!(d.unsubscribe(id));
    assert!(!d.unsubscribe(id));
    reduced.set(true);
    d.refresh();
    assert_eq!(calls.get(), 0);
}

#[test]
fn query_going_away_falls_back_to_full_motion() {
    let reduced = SharedFlag::new(true);
    let mut d = PreferenceDetector::with_breakpoint(768.0, reduced.clone());
    reduced.set_unavailable();
    assert!(d.on_media_change(MediaFeature::ReducedMotion));
    assert!(!d.current().prefers_reduced_motion);
}
