//! finsight-common — Shared types and errors used across all finsight crates.

pub mod error;
pub mod locale;

pub use error::{FinsightError, Result};
pub use locale::Locale;
