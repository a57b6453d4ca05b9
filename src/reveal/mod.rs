/// Viewport-entry triggers that fire once.
pub mod trigger;
