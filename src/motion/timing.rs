use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::animation::anim::{ControlPoint, Curve};
use crate::animation::ease::Ease;
use crate::animation::params::{Attribute, AttributeCurves, VisualParams};
use crate::foundation::error::{MotionError, MotionResult};
use crate::motion::profile::MotionTuning;

/// Time-based entrance transition: wait `delay`, then ease over `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transition {
    /// Length of the eased segment in seconds.
    pub duration: f64,
    /// Wait before the segment starts, in seconds.
    pub delay: f64,
    /// Easing applied over the segment.
    pub ease: Ease,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: 0.6,
            delay: 0.0,
            ease: Ease::OUT_QUINT,
        }
    }
}

impl Transition {
    /// Transition with the given duration, no delay, default ease.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Builder: set the delay.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Builder: set the ease.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Durations finite and non-negative, ease well-formed.
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.duration.is_finite() && self.delay.is_finite()) {
            return Err(MotionError::animation("Transition times must be finite"));
        }
        if self.duration < 0.0 || self.delay < 0.0 {
            return Err(MotionError::animation("Transition times must be >= 0"));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::animation("Transition ease is malformed"));
        }
        Ok(())
    }

    /// Same transition with duration and delay scaled by the profile.
    pub fn tuned(self, tuning: &MotionTuning) -> Self {
        Self {
            duration: self.duration * tuning.duration,
            delay: self.delay * tuning.duration,
            ease: self.ease,
        }
    }

    /// Eased progress in `[0, 1]` after `elapsed` seconds.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() || elapsed < self.delay {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.ease.apply((elapsed - self.delay) / self.duration)
    }

    /// Time at which the transition completes.
    pub fn end_time(&self) -> f64 {
        self.delay + self.duration
    }
}

/// Parent-level orchestration of child entrance delays.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Stagger {
    /// Delay before the first child starts.
    pub delay_children: f64,
    /// Additional delay per child index.
    pub stagger_children: f64,
}

impl Stagger {
    /// Build a stagger.
    pub fn new(delay_children: f64, stagger_children: f64) -> Self {
        Self {
            delay_children,
            stagger_children,
        }
    }

    /// Finite and non-negative.
    pub fn validate(&self) -> MotionResult<()> {
        if ![self.delay_children, self.stagger_children]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
        {
            return Err(MotionError::animation(
                "Stagger delays must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Extra delay for child `index` under `tuning`.
    pub fn child_delay(&self, index: usize, tuning: &MotionTuning) -> f64 {
        self.delay_children * tuning.duration
            + index as f64 * self.stagger_children * tuning.stagger
    }
}

/// Keyframe animation repeating forever on host time (pulses, drifting particles).
///
/// Keyframes sit at `times`, fractions of one cycle. The ease applies to each segment between
/// neighbouring keyframes. After each cycle the last keyframe holds for `repeat_delay` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    times: SmallVec<[f64; 4]>,
    keyframes: AttributeCurves,
    duration: f64,
    delay: f64,
    repeat_delay: f64,
    ease: Ease,
}

impl Loop {
    /// Loop over per-attribute keyframe values, spread evenly over the cycle unless `times`
    /// is given. Every attribute needs one value per keyframe time.
    pub fn new(
        keyframes: &BTreeMap<Attribute, Vec<f64>>,
        times: Option<&[f64]>,
        duration: f64,
    ) -> MotionResult<Self> {
        let count = keyframes.values().map(Vec::len).max().unwrap_or(0);
        if count == 0 {
            return Err(MotionError::animation("Loop needs at least one keyframe"));
        }
        let times: SmallVec<[f64; 4]> = match times {
            Some(times) => times.iter().copied().collect(),
            None if count == 1 => std::iter::once(0.0).collect(),
            None => (0..count).map(|i| i as f64 / (count - 1) as f64).collect(),
        };
        if !times.iter().all(|t| (0.0..=1.0).contains(t)) {
            return Err(MotionError::animation("Loop keyframe times must lie in [0, 1]"));
        }

        let mut curves = AttributeCurves::new();
        for (&attr, values) in keyframes {
            if values.len() != times.len() {
                return Err(MotionError::animation(format!(
                    "Loop {attr:?} has {} keyframes, expected {}",
                    values.len(),
                    times.len()
                )));
            }
            let points = times
                .iter()
                .zip(values)
                .map(|(&t, &v)| ControlPoint::new(t, v));
            curves.insert(attr, Curve::new(points)?);
        }

        let out = Self {
            times,
            keyframes: curves,
            duration,
            delay: 0.0,
            repeat_delay: 0.0,
            ease: Ease::EASE_IN_OUT,
        };
        out.validate()?;
        Ok(out)
    }

    /// Builder: wait `delay` seconds before the first cycle.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Builder: hold the last keyframe for `repeat_delay` seconds between cycles.
    pub fn with_repeat_delay(mut self, repeat_delay: f64) -> Self {
        self.repeat_delay = repeat_delay;
        self
    }

    /// Builder: set the per-segment ease.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Positive finite duration, non-negative delays, well-formed ease.
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(MotionError::animation("Loop duration must be finite and > 0"));
        }
        if ![self.delay, self.repeat_delay]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
        {
            return Err(MotionError::animation(
                "Loop delays must be finite and >= 0",
            ));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::animation("Loop ease is malformed"));
        }
        Ok(())
    }

    /// Cycle length in seconds, before tuning.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Linear position within the current cycle at host time `time`, in `[0, 1]`.
    ///
    /// Times are scaled by `tuning.duration`; before the first cycle the position is 0.
    pub fn cycle_position(&self, time: f64, tuning: &MotionTuning) -> f64 {
        let duration = self.duration * tuning.duration;
        let elapsed = time - self.delay * tuning.duration;
        if !(elapsed > 0.0 && duration > 0.0) {
            return 0.0;
        }
        let period = duration + self.repeat_delay * tuning.duration;
        (elapsed.rem_euclid(period) / duration).min(1.0)
    }

    /// Parameters at host time `time`. Holds the first keyframe when `tuning` disables loops.
    pub fn sample(&self, time: f64, tuning: &MotionTuning) -> VisualParams {
        let position = if tuning.looping {
            self.cycle_position(time, tuning)
        } else {
            0.0
        };
        self.keyframes.sample(self.warp(position), tuning)
    }

    fn warp(&self, position: f64) -> f64 {
        let idx = self.times.partition_point(|&t| t <= position);
        if idx == 0 || idx >= self.times.len() {
            return position;
        }
        let (a, b) = (self.times[idx - 1], self.times[idx]);
        a + self.ease.apply((position - a) / (b - a)) * (b - a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/timing.rs"]
mod tests;
