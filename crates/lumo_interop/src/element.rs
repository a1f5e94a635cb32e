//! Opaque element references
//!
//! The framework's element resolver produces `ElementHandle` values that
//! identify renderable elements on the page. Interop services treat them as
//! opaque tokens: they are never inspected, only forwarded to the browser
//! bridge, which resolves them against the live document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a renderable element, owned by the UI framework
///
/// A handle carries no liveness guarantee. If the element it names has been
/// removed from the document, bridge calls taking the handle fail with
/// [`InteropError::ElementNotFound`](crate::InteropError::ElementNotFound).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Create a handle targeting an element by its document id
    pub fn from_id(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw token, as forwarded to the bridge
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementHandle {
    fn from(id: &str) -> Self {
        Self::from_id(id)
    }
}

impl From<String> for ElementHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}
