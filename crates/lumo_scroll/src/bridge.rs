//! Browser event bridge boundary
//!
//! `ScrollBridge` is the seam between the scroll handler and whatever
//! mechanism actually moves the document and observes its scroll events: a
//! WebView script channel, a remote-debugging session, or a scripted fake
//! in tests. The handler never touches the document directly; every
//! operation is an asynchronous request through this trait.
//!
//! Listener semantics: the bridge maintains at most one document-scroll
//! listener. `add_scroll_listener` is idempotent (installing twice has the
//! same effect as once) and `remove_scroll_listener` is safe to call with
//! no listener installed. Fan-out to multiple logical subscribers happens
//! above the bridge, in [`ScrollHandler`](crate::ScrollHandler).

use async_trait::async_trait;
use futures::future::BoxFuture;
use lumo_interop::{ElementHandle, Result};
use std::sync::Arc;

use crate::position::ScrollPosition;

/// Notification callback handed to the bridge at listener installation
///
/// Invoked by the bridge once per document scroll event, with the position
/// sampled at firing time.
pub type ScrollNotify = Arc<dyn Fn(ScrollPosition) -> BoxFuture<'static, ()> + Send + Sync>;

/// Asynchronous connection to the browser's scroll capability
///
/// Implementations report [`InteropError::BridgeUnavailable`] while no live
/// document connection exists (e.g. during prerendering) and
/// [`InteropError::ElementNotFound`] for handles that no longer resolve.
///
/// [`InteropError::BridgeUnavailable`]: lumo_interop::InteropError::BridgeUnavailable
/// [`InteropError::ElementNotFound`]: lumo_interop::InteropError::ElementNotFound
#[async_trait]
pub trait ScrollBridge: Send + Sync {
    /// Scroll the given element into the visible viewport
    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<()>;

    /// Set the document scroll offset; `None` leaves that axis unchanged
    ///
    /// No clamping happens above the bridge. Whether out-of-range
    /// coordinates clamp to the document bounds is the bridge's call.
    async fn scroll_to(&self, x: Option<f64>, y: Option<f64>) -> Result<()>;

    /// Set vertical scroll to the document's maximum extent
    ///
    /// The maximum is only knowable where the live document is, so this is
    /// a bridge primitive rather than a `scroll_to` coordinate.
    async fn scroll_to_document_end(&self) -> Result<()>;

    /// Sample the current document scroll offset
    async fn scroll_position(&self) -> Result<ScrollPosition>;

    /// Install the single document-scroll listener (idempotent)
    async fn add_scroll_listener(&self, notify: ScrollNotify) -> Result<()>;

    /// Tear down the document-scroll listener, if one is installed
    async fn remove_scroll_listener(&self) -> Result<()>;
}
