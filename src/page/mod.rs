/// JSON page definition and its validation.
pub mod model;
