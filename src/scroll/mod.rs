/// Progress of sections through the viewport.
pub mod progress;
