/// Mounted page and per-frame evaluation.
pub mod page_session;
