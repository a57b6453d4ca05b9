/// Reduced-motion and narrow-viewport detection.
pub mod detector;
