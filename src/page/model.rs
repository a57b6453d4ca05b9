use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::anim::{ControlPoint, Curve, Extrapolation};
use crate::animation::ease::Ease;
use crate::animation::params::{Attribute, AttributeCurves};
use crate::animation::spring::SpringParams;
use crate::foundation::core::{Rect, SectionBox};
use crate::foundation::error::{MotionError, MotionResult};
use crate::motion::particles::ParticleField;
use crate::motion::profile::MotionProfiles;
use crate::motion::timing::{Loop, Stagger};
use crate::prefs::detector::DEFAULT_NARROW_BREAKPOINT;
use crate::reveal::trigger::RevealVariant;
use crate::scroll::progress::ScrollRange;

const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;

fn default_breakpoint() -> f64 {
    DEFAULT_NARROW_BREAKPOINT
}

fn default_threshold() -> f64 {
    DEFAULT_REVEAL_THRESHOLD
}

fn default_loop_ease() -> Ease {
    Ease::EASE_IN_OUT
}

/// JSON-facing description of a page: its sections, scroll-linked layers, and reveal elements.
///
/// Content (copy, cards, styling) is not part of this model; only geometry and motion are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDef {
    /// Ordered sections, top to bottom.
    pub sections: Vec<SectionDef>,
    /// Layers driven by whole-document progress (e.g. the navigation rail).
    #[serde(default)]
    pub page_layers: Vec<LayerDef>,
    /// Per-profile tuning overrides.
    #[serde(default)]
    pub motion: MotionProfiles,
    /// Width below which the narrow profile applies.
    #[serde(default = "default_breakpoint")]
    pub narrow_breakpoint: f64,
    /// Total document height; defaults to the bottom of the lowest section.
    #[serde(default)]
    pub document_height: Option<f64>,
}

/// One page section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDef {
    /// Unique section id; also the navigation target.
    pub id: String,
    /// Navigation label.
    #[serde(default)]
    pub label: String,
    /// Navigation index string, e.g. `"01"`.
    #[serde(default)]
    pub index: String,
    /// Document offset of the section top.
    pub top: f64,
    /// Section height.
    pub height: f64,
    /// Scroll interval for this section's progress.
    #[serde(default)]
    pub scroll_range: ScrollRange,
    /// Delay orchestration for this section's reveal elements.
    #[serde(default)]
    pub stagger: Stagger,
    /// Scroll-linked layers.
    #[serde(default)]
    pub layers: Vec<LayerDef>,
    /// One-shot reveal elements.
    #[serde(default)]
    pub reveals: Vec<RevealDef>,
    /// Time-driven looping elements (scroll cues, status pulses).
    #[serde(default)]
    pub loops: Vec<LoopDef>,
    /// Background particle field.
    #[serde(default)]
    pub particles: Option<ParticleField>,
}

impl SectionDef {
    /// Geometry as a [`SectionBox`].
    pub fn section_box(&self) -> SectionBox {
        SectionBox {
            top: self.top,
            height: self.height,
        }
    }
}

/// Element whose visual parameters follow scroll progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDef {
    /// Layer id, unique within the page.
    pub id: String,
    /// Control points per attribute.
    pub curves: BTreeMap<Attribute, Vec<ControlPoint>>,
    /// Out-of-range behaviour for every curve of this layer.
    #[serde(default)]
    pub extrapolate: Extrapolation,
    /// Smooth the progress signal with a spring before mapping.
    #[serde(default)]
    pub spring: Option<SpringParams>,
}

impl LayerDef {
    /// Validate and build the runtime curve set.
    pub fn build_curves(&self) -> MotionResult<AttributeCurves> {
        let mut out = AttributeCurves::new();
        for (&attr, points) in &self.curves {
            let curve = Curve::new(points.iter().copied())
                .map_err(|e| {
                    MotionError::validation(format!("layer '{}' {attr:?}: {e}", self.id))
                })?
                .with_extrapolation(self.extrapolate);
            out.insert(attr, curve);
        }
        Ok(out)
    }
}

/// Element animated by a repeating keyframe loop on host time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopDef {
    /// Element id, unique within the page.
    pub id: String,
    /// Keyframe values per attribute; all arrays have the same length.
    pub keyframes: BTreeMap<Attribute, Vec<f64>>,
    /// Keyframe positions within a cycle; evenly spaced when omitted.
    #[serde(default)]
    pub times: Option<Vec<f64>>,
    /// Cycle length in seconds.
    pub duration: f64,
    /// Wait before the first cycle.
    #[serde(default)]
    pub delay: f64,
    /// Hold between cycles.
    #[serde(default)]
    pub repeat_delay: f64,
    /// Per-segment ease.
    #[serde(default = "default_loop_ease")]
    pub ease: Ease,
}

impl LoopDef {
    /// Validate and build the runtime loop.
    pub fn build(&self) -> MotionResult<Loop> {
        let context = |e: MotionError| MotionError::validation(format!("loop '{}': {e}", self.id));
        let built = Loop::new(&self.keyframes, self.times.as_deref(), self.duration)
            .map_err(context)?
            .with_delay(self.delay)
            .with_repeat_delay(self.repeat_delay)
            .with_ease(self.ease);
        built.validate().map_err(context)?;
        Ok(built)
    }
}

/// Element revealed once when enough of it scrolls into view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealDef {
    /// Element id, unique within the page.
    pub id: String,
    /// Document-space bounds.
    pub rect: RectDef,
    /// Visible fraction required to fire.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Hidden/visible parameters and transition.
    #[serde(default)]
    pub variant: RevealVariant,
    /// Position in the parent section's stagger sequence.
    #[serde(default)]
    pub stagger_index: Option<usize>,
}

/// Document-space rectangle.
///
/// Accepts `[x0, y0, x1, y1]` or `{ "top", "height", "left"?, "width"? }`. A missing width
/// means a 1px column at `left`, which only matters for vertical visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDef(pub Rect);

impl Serialize for RectDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let r = self.0;
        [r.x0, r.y0, r.x1, r.y1].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RectDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        fn one() -> f64 {
            1.0
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 4]),
            Obj {
                top: f64,
                height: f64,
                #[serde(default)]
                left: f64,
                #[serde(default = "one")]
                width: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x0, y0, x1, y1]) => Ok(Self(Rect::new(x0, y0, x1, y1))),
            Repr::Obj {
                top,
                height,
                left,
                width,
            } => Ok(Self(Rect::new(left, top, left + width, top + height))),
        }
    }
}

impl PageDef {
    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| MotionError::serde(format!("parse page definition JSON: {e}")))
    }

    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MotionResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MotionError::serde(format!("parse page definition JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MotionError::validation(format!("open page definition '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Document height: explicit, or the lowest section bottom.
    pub fn document_height(&self) -> f64 {
        self.document_height.unwrap_or_else(|| {
            self.sections
                .iter()
                .map(|s| s.top + s.height)
                .fold(0.0, f64::max)
        })
    }

    /// Check ids, geometry, curves, thresholds, and tuning.
    pub fn validate(&self) -> MotionResult<()> {
        if self.sections.is_empty() {
            return Err(MotionError::validation("page must have at least one section"));
        }
        if !(self.narrow_breakpoint.is_finite() && self.narrow_breakpoint > 0.0) {
            return Err(MotionError::validation(
                "narrow_breakpoint must be finite and > 0",
            ));
        }
        if let Some(h) = self.document_height
            && !(h.is_finite() && h >= 0.0)
        {
            return Err(MotionError::validation(
                "document_height must be finite and >= 0",
            ));
        }
        self.motion.validate()?;

        let mut section_ids = BTreeSet::new();
        let mut element_ids = BTreeSet::new();
        for layer in &self.page_layers {
            validate_layer(layer, &mut element_ids)?;
        }
        for section in &self.sections {
            if section.id.is_empty() {
                return Err(MotionError::validation("section id must not be empty"));
            }
            if !section_ids.insert(section.id.as_str()) {
                return Err(MotionError::validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            section.section_box().validate().map_err(|e| {
                MotionError::validation(format!("section '{}': {e}", section.id))
            })?;
            section.stagger.validate()?;
            for layer in &section.layers {
                validate_layer(layer, &mut element_ids)?;
            }
            for reveal in &section.reveals {
                claim_id(&reveal.id, &mut element_ids)?;
                let r = reveal.rect.0;
                if ![r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite())
                    || r.x1 < r.x0
                    || r.y1 < r.y0
                {
                    return Err(MotionError::validation(format!(
                        "reveal '{}' has an invalid rect",
                        reveal.id
                    )));
                }
                if !(reveal.threshold > 0.0 && reveal.threshold <= 1.0) {
                    return Err(MotionError::validation(format!(
                        "reveal '{}' threshold must be in (0, 1]",
                        reveal.id
                    )));
                }
                reveal.variant.validate()?;
            }
            for l in &section.loops {
                claim_id(&l.id, &mut element_ids)?;
                l.build()?;
            }
            if let Some(field) = &section.particles {
                field.validate().map_err(|e| {
                    MotionError::validation(format!("section '{}' particles: {e}", section.id))
                })?;
            }
        }
        Ok(())
    }
}

fn claim_id<'a>(id: &'a str, seen: &mut BTreeSet<&'a str>) -> MotionResult<()> {
    if id.is_empty() {
        return Err(MotionError::validation("element id must not be empty"));
    }
    if !seen.insert(id) {
        return Err(MotionError::validation(format!("duplicate element id '{id}'")));
    }
    Ok(())
}

fn validate_layer<'a>(layer: &'a LayerDef, seen: &mut BTreeSet<&'a str>) -> MotionResult<()> {
    claim_id(&layer.id, seen)?;
    layer.build_curves()?;
    if let Some(spring) = &layer.spring {
        spring.validate()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
