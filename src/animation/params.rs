use std::collections::BTreeMap;

use crate::animation::anim::{Curve, Lerp};

/// Visual attribute driven by a curve.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal offset in px.
    TranslateX,
    /// Vertical offset in px.
    TranslateY,
    /// Gaussian blur radius in px.
    Blur,
    /// Uniform scale factor.
    Scale,
    /// Vertical-only scale factor (timeline line, scroll cue).
    ScaleY,
    /// Letter spacing in em.
    LetterSpacing,
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Attribute; 7] = [
        Attribute::Opacity,
        Attribute::TranslateX,
        Attribute::TranslateY,
        Attribute::Blur,
        Attribute::Scale,
        Attribute::ScaleY,
        Attribute::LetterSpacing,
    ];

    /// Value at rest, i.e. with no motion applied.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale | Self::ScaleY => 1.0,
            Self::TranslateX | Self::TranslateY | Self::Blur | Self::LetterSpacing => 0.0,
        }
    }

    /// Positional/blur/scale attributes carry motion amplitude; opacity does not.
    pub fn carries_amplitude(self) -> bool {
        !matches!(self, Self::Opacity)
    }
}

/// Output of the mapper for one element. Missing fields deserialize to their rest values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualParams {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset in px.
    pub translate_x: f64,
    /// Vertical offset in px.
    pub translate_y: f64,
    /// Blur radius in px.
    pub blur: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Letter spacing in em.
    pub letter_spacing: f64,
}

impl Default for VisualParams {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            blur: 0.0,
            scale: 1.0,
            scale_y: 1.0,
            letter_spacing: 0.0,
        }
    }
}

impl VisualParams {
    /// Read one attribute.
    pub fn get(&self, attr: Attribute) -> f64 {
        match attr {
            Attribute::Opacity => self.opacity,
            Attribute::TranslateX => self.translate_x,
            Attribute::TranslateY => self.translate_y,
            Attribute::Blur => self.blur,
            Attribute::Scale => self.scale,
            Attribute::ScaleY => self.scale_y,
            Attribute::LetterSpacing => self.letter_spacing,
        }
    }

    /// Write one attribute.
    pub fn set(&mut self, attr: Attribute, value: f64) {
        let slot = match attr {
            Attribute::Opacity => &mut self.opacity,
            Attribute::TranslateX => &mut self.translate_x,
            Attribute::TranslateY => &mut self.translate_y,
            Attribute::Blur => &mut self.blur,
            Attribute::Scale => &mut self.scale,
            Attribute::ScaleY => &mut self.scale_y,
            Attribute::LetterSpacing => &mut self.letter_spacing,
        };
        *slot = value;
    }

    /// Builder form of [`VisualParams::set`].
    pub fn with(mut self, attr: Attribute, value: f64) -> Self {
        self.set(attr, value);
        self
    }

    /// Apply an amplitude hook to every attribute.
    pub fn scaled(self, hook: &impl AmplitudeScale) -> Self {
        let mut out = self;
        for attr in Attribute::ALL {
            out.set(attr, hook.scale(attr, self.get(attr)));
        }
        out
    }
}

impl Lerp for VisualParams {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mut out = *a;
        for attr in Attribute::ALL {
            out.set(attr, <f64 as Lerp>::lerp(&a.get(attr), &b.get(attr), t));
        }
        out
    }
}

/// Hook through which motion preferences shrink or grow animation amplitude.
pub trait AmplitudeScale {
    /// Map a raw curve output for `attr` to the value actually rendered.
    fn scale(&self, attr: Attribute, value: f64) -> f64;
}

/// Identity hook.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unscaled;

impl AmplitudeScale for Unscaled {
    fn scale(&self, _attr: Attribute, value: f64) -> f64 {
        value
    }
}

/// Scale the deviation of `value` from the attribute's rest value by `factor`.
///
/// Opacity passes through unchanged.
pub fn scale_about_rest(attr: Attribute, value: f64, factor: f64) -> f64 {
    if !attr.carries_amplitude() {
        return value;
    }
    let rest = attr.rest_value();
    rest + (value - rest) * factor
}

/// Independent curves per attribute, all driven by one progress value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeCurves {
    curves: BTreeMap<Attribute, Curve>,
}

impl AttributeCurves {
    /// Empty set: samples to [`VisualParams::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: attach `curve` to `attr`, replacing any previous curve.
    pub fn with(mut self, attr: Attribute, curve: Curve) -> Self {
        self.insert(attr, curve);
        self
    }

    /// Attach `curve` to `attr`, replacing any previous curve.
    pub fn insert(&mut self, attr: Attribute, curve: Curve) {
        self.curves.insert(attr, curve);
    }

    /// Curve for `attr`, if any.
    pub fn get(&self, attr: Attribute) -> Option<&Curve> {
        self.curves.get(&attr)
    }

    /// Number of driven attributes.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// `true` when no attribute is driven.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Sample every curve at `progress` and pass the results through `hook`.
    pub fn sample(&self, progress: f64, hook: &impl AmplitudeScale) -> VisualParams {
        let mut out = VisualParams::default();
        for (&attr, curve) in &self.curves {
            out.set(attr, hook.scale(attr, curve.sample(progress)));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/params.rs"]
mod tests;
