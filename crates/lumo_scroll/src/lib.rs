//! Lumo Document Scroll Interop
//!
//! This crate lets Lumo components drive and observe the browser
//! document's scroll position through an asynchronous bridge:
//!
//! - **Commands**: scroll an element into view, jump to page top/end, or
//!   set an absolute X/Y offset
//! - **Queries**: sample the current scroll position
//! - **Subscriptions**: register callbacks for document scroll events,
//!   fanned out from a single underlying browser-side listener
//!
//! The browser itself sits behind the [`ScrollBridge`] trait, so the
//! handler runs unchanged against a WebView script channel, a remote
//! session, or a scripted fake in tests.
//!
//! # Example
//!
//! ```ignore
//! use lumo_scroll::prelude::*;
//! use std::sync::Arc;
//!
//! let handler = ScrollHandler::new(Arc::new(webview_bridge));
//!
//! // Guard-based subscription: unsubscribes when `sub` drops
//! let sub = handler
//!     .subscribe(|pos: ScrollPosition| async move {
//!         tracing::info!("document scrolled to y={}", pos.y);
//!         Ok(())
//!     })
//!     .await?;
//!
//! handler.scroll_to_element(&ElementHandle::from_id("footer")).await?;
//!
//! drop(sub);
//! handler.dispose().await;
//! ```

mod bridge;
mod handler;
mod position;
mod subscription;

// Re-export all public types
pub use bridge::{ScrollBridge, ScrollNotify};
pub use handler::{ScrollCallback, ScrollHandler};
pub use position::ScrollPosition;
pub use subscription::ScrollSubscription;

// Boundary types from the interop foundation, for convenience
pub use lumo_interop::{ElementHandle, InteropError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bridge::{ScrollBridge, ScrollNotify};
    pub use crate::handler::{ScrollCallback, ScrollHandler};
    pub use crate::position::ScrollPosition;
    pub use crate::subscription::ScrollSubscription;
    pub use lumo_interop::{ElementHandle, InteropError, Result};
}
