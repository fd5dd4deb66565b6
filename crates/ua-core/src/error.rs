//! Base error type.
//!
//! Sub-crates define their own error enums; `UaError` covers the failures
//! that can happen in `ua-core` itself (malformed identifiers) and is
//! wrapped by them via `From`.

use thiserror::Error;

/// The error type for `ua-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum UaError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `ua-core`.
pub type UaResult<T> = Result<T, UaError>;
