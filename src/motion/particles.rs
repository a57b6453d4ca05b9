use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::params::Attribute;
use crate::foundation::error::{MotionError, MotionResult};
use crate::motion::timing::Loop;

/// Seeded field of background particles drifting up and fading in and out.
///
/// Positions are percentages of the owning section; `drift` uses the same unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleField {
    /// Number of particles.
    pub count: usize,
    /// RNG seed; the same seed yields the same field.
    pub seed: u64,
    /// Inclusive size range in px.
    pub size: [f64; 2],
    /// Inclusive cycle duration range in seconds.
    pub duration: [f64; 2],
    /// Upper bound of the random start delay in seconds.
    pub max_delay: f64,
    /// Upward travel at the middle of each cycle.
    pub drift: f64,
    /// Opacity at the middle of each cycle.
    pub peak_opacity: f64,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self {
            count: 20,
            seed: 0,
            size: [1.0, 4.0],
            duration: [15.0, 25.0],
            max_delay: 5.0,
            drift: 20.0,
            peak_opacity: 0.4,
        }
    }
}

/// One generated particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in the field.
    pub index: usize,
    /// Horizontal position, percent of the section width.
    pub x: f64,
    /// Vertical rest position, percent of the section height.
    pub y: f64,
    /// Diameter in px.
    pub size: f64,
    /// Drift and fade loop.
    pub motion: Loop,
}

impl ParticleField {
    /// Ranges ordered and finite, durations positive, opacity in `[0, 1]`.
    pub fn validate(&self) -> MotionResult<()> {
        let [size_lo, size_hi] = self.size;
        let [dur_lo, dur_hi] = self.duration;
        let finite = [size_lo, size_hi, dur_lo, dur_hi, self.max_delay, self.drift]
            .iter()
            .all(|v| v.is_finite());
        if !finite || size_lo < 0.0 || size_lo > size_hi {
            return Err(MotionError::validation(
                "particle size range must be finite, >= 0 and ordered",
            ));
        }
        if dur_lo <= 0.0 || dur_lo > dur_hi {
            return Err(MotionError::validation(
                "particle duration range must be > 0 and ordered",
            ));
        }
        if self.max_delay < 0.0 {
            return Err(MotionError::validation("particle max_delay must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.peak_opacity) {
            return Err(MotionError::validation(
                "particle peak_opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Generate the field deterministically from `seed`.
    pub fn generate(&self) -> MotionResult<Vec<Particle>> {
        self.validate()?;
        let keyframes = BTreeMap::from([
            (Attribute::TranslateY, vec![0.0, -self.drift, 0.0]),
            (Attribute::Opacity, vec![0.0, self.peak_opacity, 0.0]),
        ]);
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|index| -> MotionResult<Particle> {
                let x = rng.gen_range(0.0..100.0);
                let y = rng.gen_range(0.0..100.0);
                let size = rng.gen_range(self.size[0]..=self.size[1]);
                let duration = rng.gen_range(self.duration[0]..=self.duration[1]);
                let delay = rng.gen_range(0.0..=self.max_delay);
                let motion = Loop::new(&keyframes, None, duration)?.with_delay(delay);
                Ok(Particle {
                    index,
                    x,
                    y,
                    size,
                    motion,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/particles.rs"]
mod tests;
