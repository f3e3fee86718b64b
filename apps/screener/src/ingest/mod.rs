// Input loaders: the resume PDF and the job catalog.
// Both fail softly: the public entry points log and return `None`, the `try_` variants
// return the underlying `ScreenerError`.

pub mod catalog;
pub mod resume;
