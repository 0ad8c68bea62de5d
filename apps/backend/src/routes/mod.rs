//! API route handlers.

pub mod quiz;
pub mod reference;
pub mod sessions;
pub mod words;
