use super::*;

const FIXTURE: &str = include_str!("../../data/portfolio.json");

fn minimal() -> PageDef {
    PageDef::from_json_str(r#"{ "sections": [ { "id": "a", "top": 0, "height": 100 } ] }"#).unwrap()
}

#[test]
fn fixture_parses_and_validates() {
    let page = PageDef::from_json_str(FIXTURE).unwrap();
    page.validate().unwrap();
    assert_eq!(page.sections.len(), 5);
    assert_eq!(page.document_height(), 6500.0);
    assert_eq!(page.sections[0].scroll_range, ScrollRange::LEAVE);
    assert_eq!(page.sections[1].scroll_range, ScrollRange::ENTER_EXIT);
}

#[test]
fn defaults_fill_optional_fields() {
    let page = minimal();
    page.validate().unwrap();
    assert_eq!(page.narrow_breakpoint, 768.0);
    assert_eq!(page.motion, MotionProfiles::default());
    assert_eq!(page.document_height(), 100.0);
    assert!(page.page_layers.is_empty());
}

#[test]
fn rect_accepts_both_forms() {
    let a: RectDef = serde_json::from_str("[0, 10, 20, 40]").unwrap();
    assert_eq!(a.0, Rect::new(0.0, 10.0, 20.0, 40.0));
    let b: RectDef = serde_json::from_str(r#"{ "top": 10, "height": 30 }"#).unwrap();
    assert_eq!(b.0, Rect::new(0.0, 10.0, 1.0, 40.0));
    assert_eq!(serde_json::to_string(&a).unwrap(), "[0.0,10.0,20.0,40.0]");
}

#[test]
fn layer_curves_carry_extrapolation() {
    let page = PageDef::from_json_str(FIXTURE).unwrap();
    let timeline = &page.sections[1].layers[0];
    let curves = timeline.build_curves().unwrap();
    let c = curves.get(Attribute::TranslateY).unwrap();
    assert_eq!(c.extrapolation(), Extrapolation::Extend);
    assert_eq!(c.sample(1.5), -100.0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut page = minimal();
    page.sections.push(page.sections[0].clone());
    assert!(page.validate().is_err());

    let s = r#"{ "sections": [ { "id": "a", "top": 0, "height": 100,
        "layers": [ { "id": "x", "curves": {} }, { "id": "x", "curves": {} } ] } ] }"#;
    assert!(PageDef::from_json_str(s).unwrap().validate().is_err());
}

#[test]
fn unsorted_curve_is_rejected_with_layer_context() {
    let s = r#"{ "sections": [ { "id": "a", "top": 0, "height": 100,
        "layers": [ { "id": "bad", "curves": { "opacity": [[0.5, 1], [0.2, 0]] } } ] } ] }"#;
    let err = PageDef::from_json_str(s).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("bad"));
}

#[test]
fn bad_threshold_and_geometry_are_rejected() {
    let s = r#"{ "sections": [ { "id": "a", "top": 0, "height": 100,
        "reveals": [ { "id": "r", "rect": [0, 0, 10, 10], "threshold": 0 } ] } ] }"#;
    assert!(PageDef::from_json_str(s).unwrap().validate().is_err());

    let s = r#"{ "sections": [ { "id": "a", "top": 0, "height": -5 } ] }"#;
    assert!(PageDef::from_json_str(s).unwrap().validate().is_err());

    let s = r#"{ "sections": [] }"#;
    assert!(PageDef::from_json_str(s).unwrap().validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PageDef::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = PageDef::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("definitely/not/here.json"));
}

#[test]
fn fixture_loops_and_particles_parse() {
    let page = PageDef::from_json_str(FIXTURE).unwrap();
    let about = &page.sections[0];
    assert_eq!(about.loops.len(), 2);
    assert_eq!(about.loops[0].ease, Ease::EASE_IN_OUT);
    assert_eq!(about.loops[1].repeat_delay, 0.2);
    assert_eq!(about.loops[1].ease, Ease::IN_OUT_SINE);
    assert_eq!(about.particles.as_ref().map(|p| p.count), Some(20));
    assert!(page.sections[4].particles.is_none());

    let dot = about.loops[0].build().unwrap();
    assert_eq!(dot.duration(), 1.5);
}

#[test]
fn bad_loop_is_rejected_with_its_id() {
    let err = PageDef::from_json_str(
        r#"{ "sections": [ { "id": "a", "top": 0, "height": 100,
              "loops": [{ "id": "pulse", "keyframes": { "scale": [1, 1.2] }, "duration": 0 }] } ] }"#,
    )
    .unwrap()
    .validate()
    .unwrap_err();
    assert!(err.to_string().contains("loop 'pulse'"), "{err}");
}

#[test]
fn loop_ids_share_the_element_namespace() {
    let page = PageDef::from_json_str(
        r#"{ "sections": [ { "id": "a", "top": 0, "height": 100,
              "reveals": [{ "id": "dot", "rect": { "top": 0, "height": 10 } }],
              "loops": [{ "id": "dot", "keyframes": { "opacity": [1, 0.5, 1] }, "duration": 2 }] } ] }"#,
    )
    .unwrap();
    assert!(page.validate().unwrap_err().to_string().contains("duplicate element id 'dot'"));
}

#[test]
fn inverted_particle_range_names_the_section() {
    let page = PageDef::from_json_str(
        r#"{ "sections": [ { "id": "a", "top": 0, "height": 100,
              "particles": { "size": [4, 1] } } ] }"#,
    )
    .unwrap();
    assert!(page.validate().unwrap_err().to_string().contains("section 'a' particles"));
}
