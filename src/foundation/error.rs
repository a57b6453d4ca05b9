/// Crate-wide result alias.
pub type MotionResult<T> = Result<T, MotionError>;

/// Configuration-time failures.
///
/// Per-scroll evaluation never produces these; it degrades instead (skips missing geometry,
/// falls back to baseline preferences).
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid page definition, geometry, or tuning value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed curve or transition.
    #[error("animation error: {0}")]
    Animation(String),

    /// Evaluation against state that does not exist (e.g. unknown section id).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Lookup of a section or element the session does not hold.
    #[error("unknown {kind} '{id}'")]
    Unknown {
        /// What was looked up (`"section"`, `"reveal element"`).
        kind: &'static str,
        /// Requested id.
        id: String,
    },

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MotionError::Unknown`].
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        Self::Unknown {
            kind,
            id: id.into(),
        }
    }

    /// Build a [`MotionError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
