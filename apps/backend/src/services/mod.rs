//! External service clients.

pub mod jisho;
