use super::*;

struct Halve;

impl AmplitudeScale for Halve {
    fn scale(&self, attr: Attribute, value: f64) -> f64 {
        scale_about_rest(attr, value, 0.5)
    }
}

fn hero_curves() -> AttributeCurves {
    AttributeCurves::new()
        .with(
            Attribute::Scale,
            Curve::from_pairs(&[(0.0, 1.0), (0.5, 0.95)]).unwrap(),
        )
        .with(
            Attribute::Opacity,
            Curve::from_pairs(&[(0.0, 1.0), (0.4, 0.8), (0.6, 0.0)]).unwrap(),
        )
        .with(
            Attribute::Blur,
            Curve::from_pairs(&[(0.0, 0.0), (0.5, 8.0)]).unwrap(),
        )
}

#[test]
fn one_progress_drives_several_attributes() {
    let p = hero_curves().sample(0.5, &Unscaled);
    assert_eq!(p.scale, 0.95);
    assert_eq!(p.blur, 8.0);
    assert!((p.opacity - 0.4).abs() < 1e-12);
    assert_eq!(p.translate_y, 0.0);
}

#[test]
fn undriven_attributes_rest() {
    let p = AttributeCurves::new().sample(0.7, &Unscaled);
    assert_eq!(p, VisualParams::default());
}

#[test]
fn hook_scales_motion_but_not_opacity() {
    let p = hero_curves().sample(0.5, &Halve);
    assert_eq!(p.blur, 4.0);
    assert!((p.scale - 0.975).abs() < 1e-12);
    assert!((p.opacity - 0.4).abs() < 1e-12);
}

#[test]
fn visual_params_lerp_blends_every_field() {
    let hidden = VisualParams::default()
        .with(Attribute::Opacity, 0.0)
        .with(Attribute::TranslateY, 20.0);
    let shown = VisualParams::default();
    let mid = VisualParams::lerp(&hidden, &shown, 0.5);
    assert_eq!(mid.opacity, 0.5);
    assert_eq!(mid.translate_y, 10.0);
    assert_eq!(mid.scale, 1.0);
}

#[test]
fn attribute_names_are_snake_case() {
    let s = serde_json::to_string(&Attribute::LetterSpacing).unwrap();
    assert_eq!(s, "\"letter_spacing\"");
}
