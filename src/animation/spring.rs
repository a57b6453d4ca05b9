use crate::foundation::error::{MotionError, MotionResult};

const MAX_STEP_SECS: f64 = 1.0 / 240.0;
const MAX_GAP_SECS: f64 = 1.0;

/// Physical parameters of a [`Spring`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Spring constant.
    pub stiffness: f64,
    /// Velocity damping coefficient.
    pub damping: f64,
    /// Mass of the simulated body.
    pub mass: f64,
    /// Distance to target under which the spring may settle.
    pub rest_delta: f64,
    /// Speed under which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 200.0,
            damping: 20.0,
            mass: 1.0,
            rest_delta: 1e-3,
            rest_speed: 1e-2,
        }
    }
}

impl SpringParams {
    /// All fields finite, mass strictly positive, the rest non-negative.
    pub fn validate(&self) -> MotionResult<()> {
        let fields = [
            self.stiffness,
            self.damping,
            self.mass,
            self.rest_delta,
            self.rest_speed,
        ];
        if !fields.iter().all(|v| v.is_finite() && *v >= 0.0) {
            return Err(MotionError::animation(
                "Spring parameters must be finite and >= 0",
            ));
        }
        if self.mass <= 0.0 {
            return Err(MotionError::animation("Spring mass must be > 0"));
        }
        Ok(())
    }
}

/// Follows a moving target with spring dynamics; used to smooth scroll progress.
#[derive(Clone, Debug)]
pub struct Spring {
    params: SpringParams,
    value: f64,
    velocity: f64,
    primed: bool,
}

impl Spring {
    /// Create a spring that snaps to the first target it sees.
    pub fn new(params: SpringParams) -> MotionResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            value: 0.0,
            velocity: 0.0,
            primed: false,
        })
    }

    /// Current smoothed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Teleport to `value` with zero velocity.
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.velocity = 0.0;
        self.primed = true;
    }

    /// `true` once the spring has seen a target.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// `true` when settled on `target`.
    pub fn is_at_rest(&self, target: f64) -> bool {
        self.value == target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds toward `target` and return the new value.
    ///
    /// Integration runs in fixed sub-steps so large frame gaps stay stable. A gap longer than
    /// one second lands on `target` directly.
    pub fn step(&mut self, target: f64, dt: f64) -> f64 {
        if !self.primed {
            self.jump(target);
            return self.value;
        }
        let mut remaining = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if remaining > MAX_GAP_SECS {
            self.jump(target);
            return self.value;
        }
        let p = self.params;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let force = -p.stiffness * (self.value - target) - p.damping * self.velocity;
            self.velocity += force / p.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if (target - self.value).abs() < p.rest_delta && self.velocity.abs() < p.rest_speed {
            self.jump(target);
        }
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
