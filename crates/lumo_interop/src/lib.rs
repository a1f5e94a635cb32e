//! Lumo Browser-Interop Foundation
//!
//! This crate provides the shared boundary types used by Lumo's browser
//! interop services: opaque element references and the common error type
//! surfaced when a bridge call fails.
//!
//! Interop services (document scroll, clipboard, focus, ...) live in their
//! own crates and depend on this one for the types that cross the
//! framework/browser boundary.
//!
//! # Example
//!
//! ```rust
//! use lumo_interop::{ElementHandle, InteropError};
//!
//! let handle = ElementHandle::from_id("sidebar");
//! assert_eq!(handle.as_str(), "sidebar");
//!
//! let err = InteropError::ElementNotFound { handle: handle.to_string() };
//! assert_eq!(err.to_string(), "Element not found: sidebar");
//! ```

mod element;
mod error;

// Re-export all public types
pub use element::ElementHandle;
pub use error::{InteropError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::element::ElementHandle;
    pub use crate::error::{InteropError, Result};
}
