use smallvec::SmallVec;

use crate::foundation::error::{MotionError, MotionResult};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`; `t` outside `[0, 1]` extrapolates.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// One `(progress, value)` pair of a piecewise-linear curve.
///
/// Serialized as a two-element array `[progress, value]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ControlPoint {
    /// Position along the progress axis.
    pub progress: f64,
    /// Attribute value at `progress`.
    pub value: f64,
}

impl ControlPoint {
    /// Build a control point.
    pub const fn new(progress: f64, value: f64) -> Self {
        Self { progress, value }
    }
}

impl From<[f64; 2]> for ControlPoint {
    fn from([progress, value]: [f64; 2]) -> Self {
        Self { progress, value }
    }
}

impl From<ControlPoint> for [f64; 2] {
    fn from(cp: ControlPoint) -> Self {
        [cp.progress, cp.value]
    }
}

/// Behaviour for progress values outside the first/last control point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Hold the first/last value.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment (parallax layers).
    Extend,
}

/// Piecewise-linear curve over progress with strictly increasing control points.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    points: SmallVec<[ControlPoint; 4]>,
    extrapolation: Extrapolation,
}

impl Curve {
    /// Build a clamped curve, validating ordering and finiteness.
    pub fn new(points: impl IntoIterator<Item = ControlPoint>) -> MotionResult<Self> {
        let curve = Self {
            points: points.into_iter().collect(),
            extrapolation: Extrapolation::Clamp,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Convenience constructor from `(progress, value)` tuples.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> MotionResult<Self> {
        Self::new(pairs.iter().map(|&(p, v)| ControlPoint::new(p, v)))
    }

    /// A curve that always yields `value`.
    pub fn constant(value: f64) -> Self {
        let mut points = SmallVec::new();
        points.push(ControlPoint::new(0.0, value));
        Self {
            points,
            extrapolation: Extrapolation::Clamp,
        }
    }

    /// Replace the out-of-range behaviour.
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Reject empty, non-finite, or non-increasing control points.
    pub fn validate(&self) -> MotionResult<()> {
        if self.points.is_empty() {
            return Err(MotionError::animation(
                "Curve must have at least one control point",
            ));
        }
        if !self
            .points
            .iter()
            .all(|cp| cp.progress.is_finite() && cp.value.is_finite())
        {
            return Err(MotionError::animation("Curve control points must be finite"));
        }
        if !self
            .points
            .windows(2)
            .all(|w| w[0].progress < w[1].progress)
        {
            return Err(MotionError::animation(
                "Curve control points must be strictly increasing in progress",
            ));
        }
        Ok(())
    }

    /// Control points in progress order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Configured out-of-range behaviour.
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Value of the curve at `progress`.
    pub fn sample(&self, progress: f64) -> f64 {
        interpolate_with(progress, &self.points, self.extrapolation)
    }
}

/// Clamped piecewise-linear interpolation over `points` (sorted by progress).
///
/// Returns `0.0` for an empty slice.
pub fn interpolate(progress: f64, points: &[ControlPoint]) -> f64 {
    interpolate_with(progress, points, Extrapolation::Clamp)
}

/// Piecewise-linear interpolation with explicit out-of-range behaviour.
pub fn interpolate_with(progress: f64, points: &[ControlPoint], mode: Extrapolation) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if points.len() == 1 || progress.is_nan() {
        return first.value;
    }

    let idx = points.partition_point(|cp| cp.progress <= progress);
    let (a, b) = if idx == 0 {
        match mode {
            Extrapolation::Clamp => return first.value,
            Extrapolation::Extend => (&points[0], &points[1]),
        }
    } else if idx >= points.len() {
        match mode {
            Extrapolation::Clamp => return last.value,
            Extrapolation::Extend => (&points[points.len() - 2], last),
        }
    } else {
        (&points[idx - 1], &points[idx])
    };

    let denom = b.progress - a.progress;
    if denom <= 0.0 {
        return a.value;
    }
    let t = (progress - a.progress) / denom;
    Lerp::lerp(&a.value, &b.value, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
