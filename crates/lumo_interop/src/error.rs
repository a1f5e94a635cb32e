//! Interop error types

use thiserror::Error;

/// Browser-interop errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteropError {
    /// The browser connection is not established (prerendering) or already torn down
    #[error("Browser bridge unavailable")]
    BridgeUnavailable,

    /// An element-targeted command was given a stale or unresolvable handle
    #[error("Element not found: {handle}")]
    ElementNotFound {
        /// The handle that failed to resolve
        handle: String,
    },

    /// The handler was disposed; no further operations are accepted
    #[error("Handler disposed")]
    HandlerDisposed,

    /// Other bridge-reported failure
    #[error("Bridge error: {0}")]
    Bridge(String),
}

/// Result type for interop operations
pub type Result<T> = std::result::Result<T, InteropError>;
