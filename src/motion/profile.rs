use crate::animation::params::{AmplitudeScale, Attribute, scale_about_rest};
use crate::foundation::error::{MotionError, MotionResult};
use crate::prefs::detector::Preferences;

/// Multipliers a motion profile applies to authored animation constants.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Scales the deviation of positional, blur, and scale attributes from rest.
    pub amplitude: f64,
    /// Scales transition durations and base delays.
    pub duration: f64,
    /// Scales per-child stagger increments.
    pub stagger: f64,
    /// Run ambient loops (particles, pulses); when off they hold their first keyframe.
    pub looping: bool,
}

impl MotionTuning {
    /// Authored motion, unchanged.
    pub const FULL: MotionTuning = MotionTuning {
        amplitude: 1.0,
        duration: 1.0,
        stagger: 1.0,
        looping: true,
    };
    /// Narrow viewports: smaller offsets, faster and less staggered reveals.
    pub const MOBILE: MotionTuning = MotionTuning {
        amplitude: 0.6,
        duration: 0.75,
        stagger: 0.5,
        looping: true,
    };
    /// Reduced motion: same animations at a tenth of the amplitude, no stagger, no loops.
    pub const REDUCED: MotionTuning = MotionTuning {
        amplitude: 0.1,
        duration: 0.5,
        stagger: 0.0,
        looping: false,
    };

    /// All factors finite and non-negative.
    pub fn validate(&self) -> MotionResult<()> {
        if ![self.amplitude, self.duration, self.stagger]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
        {
            return Err(MotionError::validation(
                "MotionTuning factors must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self::FULL
    }
}

impl AmplitudeScale for MotionTuning {
    fn scale(&self, attr: Attribute, value: f64) -> f64 {
        scale_about_rest(attr, value, self.amplitude)
    }
}

/// Motion variant selected once from [`Preferences`] and applied to every element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionProfile {
    /// Wide viewport, motion allowed.
    #[default]
    Full,
    /// Reduced motion requested (takes precedence over narrow viewport).
    Reduced,
    /// Narrow viewport.
    Mobile,
}

impl MotionProfile {
    /// Pick the profile for the given preferences.
    pub fn select(prefs: Preferences) -> Self {
        if prefs.prefers_reduced_motion {
            Self::Reduced
        } else if prefs.is_narrow_viewport {
            Self::Mobile
        } else {
            Self::Full
        }
    }
}

/// Tuning table for the three profiles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionProfiles {
    /// Tuning for [`MotionProfile::Full`].
    pub full: MotionTuning,
    /// Tuning for [`MotionProfile::Reduced`].
    pub reduced: MotionTuning,
    /// Tuning for [`MotionProfile::Mobile`].
    pub mobile: MotionTuning,
}

impl Default for MotionProfiles {
    fn default() -> Self {
        Self {
            full: MotionTuning::FULL,
            reduced: MotionTuning::REDUCED,
            mobile: MotionTuning::MOBILE,
        }
    }
}

impl MotionProfiles {
    /// Tuning for `profile`.
    pub fn tuning(&self, profile: MotionProfile) -> &MotionTuning {
        match profile {
            MotionProfile::Full => &self.full,
            MotionProfile::Reduced => &self.reduced,
            MotionProfile::Mobile => &self.mobile,
        }
    }

    /// Validate every entry.
    pub fn validate(&self) -> MotionResult<()> {
        self.full.validate()?;
        self.reduced.validate()?;
        self.mobile.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/profile.rs"]
mod tests;
