//! Simulator-wide error type.
//!
//! Sub-crates define their own error enums and wrap `SlamError` as one
//! variant where they need configuration errors from this crate.

use thiserror::Error;

/// The base error type for `slam-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum SlamError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `slam-core`.
pub type SlamResult<T> = Result<T, SlamError>;
