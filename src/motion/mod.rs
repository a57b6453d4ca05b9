/// Seeded ambient particle fields.
pub mod particles;
/// Motion profiles and their tuning.
pub mod profile;
/// Transitions, staggers and loops.
pub mod timing;
