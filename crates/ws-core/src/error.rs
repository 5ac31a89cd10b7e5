//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `WsError` as one variant
//! where core failures can surface.

use thiserror::Error;

use crate::SubjectId;

/// The base error type shared by the `ws-*` crates.
#[derive(Debug, Error)]
pub enum WsError {
    #[error("subject {0} is not valid")]
    InvalidSubject(SubjectId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ws-core`.
pub type WsResult<T> = Result<T, WsError>;
