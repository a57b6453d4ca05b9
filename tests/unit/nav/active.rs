use super::*;
use proptest::prelude::*;

fn two_sections() -> ActiveSectionTracker {
    ActiveSectionTracker::new(vec![
        NavEntry::new("a", "Overview", "01", Some(SectionBox::new(0.0, 1000.0).unwrap())),
        NavEntry::new("b", "Work", "02", Some(SectionBox::new(1000.0, 1000.0).unwrap())),
    ])
}

#[test]
fn starts_on_first_entry() {
    assert_eq!(two_sections().active(), Some("a"));
    assert_eq!(ActiveSectionTracker::new(Vec::new()).active(), None);
}

#[test]
fn midline_inside_second_section_selects_it() {
    let mut t = two_sections();
    assert!(t.update(1500.0));
    assert_eq!(t.active(), Some("b"));
}

#[test]
fn midline_past_last_section_keeps_previous() {
    let mut t = two_sections();
    t.update(1500.0);
    assert!(!t.update(2500.0));
    assert_eq!(t.active(), Some("b"));
    assert!(!t.update(-40.0));
    assert_eq!(t.active(), Some("b"));
}

#[test]
fn midline_uses_half_viewport() {
    let mut t = two_sections();
    let vp = crate::foundation::core::Viewport::new(1280.0, 800.0).unwrap();
    t.update_scroll(ScrollState::new(650.0, vp));
    assert_eq!(t.active(), Some("b"));
}

#[test]
fn unmounted_sections_are_skipped() {
    let mut t = two_sections();
    assert!(t.set_geometry("b", None));
    assert!(!t.update(1500.0));
    assert_eq!(t.active(), Some("a"));
    assert!(!t.set_geometry("missing", None));
    assert_eq!(t.scroll_target("b"), None);
    assert_eq!(t.scroll_target("a"), Some(0.0));
}

#[test]
fn items_flag_only_the_active_entry() {
    let mut t = two_sections();
    t.update(1200.0);
    let items = t.items();
    assert_eq!(items.len(), 2);
    assert!(!items[0].is_active);
    assert!(items[1].is_active);
    assert_eq!(items[1].label, "Work");
}

proptest! {
    #[test]
    fn no_flicker_outside_sections(midlines in proptest::collection::vec(-5000.0f64..5000.0, 1..64)) {
        let mut t = two_sections();
        for y in midlines {
            let before = t.active().map(str::to_owned);
            t.update(y);
            let after = t.active().map(str::to_owned);
            prop_assert!(after.is_some());
            if !(0.0..2000.0).contains(&y) {
                prop_assert_eq!(before, after);
            } else {
                let expected = if y < 1000.0 { "a" } else { "b" };
                prop_assert_eq!(after.as_deref(), Some(expected));
            }
        }
    }
}
