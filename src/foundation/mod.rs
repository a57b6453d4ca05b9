/// Geometry and scroll state.
pub mod core;
/// Crate error type.
pub mod error;
