/// Active-section tracking for the navigation rail.
pub mod active;
