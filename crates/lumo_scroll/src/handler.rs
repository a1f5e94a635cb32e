//! Document scroll handler
//!
//! `ScrollHandler` is the framework-facing scroll service: it forwards
//! scroll commands and position queries to the [`ScrollBridge`], and it
//! owns the subscription registry that fans the bridge's single
//! document-scroll listener out to any number of logical subscribers.
//!
//! # Subscription lifecycle
//!
//! ```text
//! ┌──────────────┐  register_page_scroll   ┌──────────────────┐
//! │  Component   │ ───────────────────────▶│  ScrollHandler   │
//! │  (callback)  │ ◀─────────────────────  │  registry:       │
//! └──────────────┘        "sub-1"          │  id → callback   │
//!                                          └────────┬─────────┘
//!                                                   │ first registration
//!                                                   ▼ installs one listener
//!                                          ┌──────────────────┐
//!                                          │   ScrollBridge   │
//!                                          └──────────────────┘
//! ```
//!
//! The bridge listener is installed on the first registration and torn
//! down eagerly when the last subscription is removed; disposal tears it
//! down unconditionally. Scroll events arriving from the bridge are fanned
//! out to a snapshot of the registry, with each callback isolated so one
//! failure never starves the others.
//!
//! # Example
//!
//! ```ignore
//! use lumo_scroll::{ScrollHandler, ScrollPosition};
//! use std::sync::Arc;
//!
//! let handler = ScrollHandler::new(Arc::new(webview_bridge));
//!
//! let id = handler
//!     .register_page_scroll(|pos: ScrollPosition| async move {
//!         println!("scrolled to {}, {}", pos.x, pos.y);
//!         Ok(())
//!     })
//!     .await?;
//!
//! handler.scroll_to_page_end().await?;
//! handler.remove_page_scroll(&id).await?;
//! handler.dispose().await;
//! ```

use futures::future::BoxFuture;
use futures::FutureExt;
use lumo_interop::{ElementHandle, InteropError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::bridge::{ScrollBridge, ScrollNotify};
use crate::position::ScrollPosition;
use crate::subscription::ScrollSubscription;

/// Subscriber callback invoked once per document scroll event
///
/// Errors are reported and isolated during dispatch; they never abort
/// delivery to other subscribers.
pub type ScrollCallback =
    Arc<dyn Fn(ScrollPosition) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Framework-facing document scroll service
///
/// One handler instance per page session. All operations are asynchronous
/// requests through the bridge; none blocks another caller's operation.
/// After [`dispose`](Self::dispose) every operation fails with
/// [`InteropError::HandlerDisposed`].
pub struct ScrollHandler {
    shared: Arc<HandlerShared>,
}

/// State shared with the bridge-side notify closure and subscription guards
pub(crate) struct HandlerShared {
    bridge: Arc<dyn ScrollBridge>,
    /// Active subscriptions: id -> callback
    registry: RwLock<HashMap<String, ScrollCallback>>,
    /// Monotonic counter backing subscription id generation
    next_id: AtomicU64,
    /// Whether the single bridge listener is currently installed
    listener_installed: AtomicBool,
    /// One-shot disposal latch
    disposed: AtomicBool,
}

impl ScrollHandler {
    /// Create a handler on top of the given bridge
    pub fn new(bridge: Arc<dyn ScrollBridge>) -> Self {
        Self {
            shared: Arc::new(HandlerShared {
                bridge,
                registry: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                listener_installed: AtomicBool::new(false),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    /// Scroll the given element into the visible viewport
    pub async fn scroll_to_element(&self, element: &ElementHandle) -> Result<()> {
        self.shared.ensure_live()?;
        self.shared.bridge.scroll_into_view(element).await
    }

    /// Scroll vertically to the document's maximum extent
    pub async fn scroll_to_page_end(&self) -> Result<()> {
        self.shared.ensure_live()?;
        self.shared.bridge.scroll_to_document_end().await
    }

    /// Scroll vertically to the top of the document
    pub async fn scroll_to_page_top(&self) -> Result<()> {
        self.shared.ensure_live()?;
        self.shared.bridge.scroll_to(None, Some(0.0)).await
    }

    /// Scroll horizontally to an absolute coordinate
    ///
    /// `x` must be finite. No clamping to document bounds happens here;
    /// that is the bridge's call.
    pub async fn scroll_to_page_x(&self, x: f64) -> Result<()> {
        self.shared.ensure_live()?;
        self.shared.bridge.scroll_to(Some(x), None).await
    }

    /// Scroll vertically to an absolute coordinate
    ///
    /// `y` must be finite. No clamping to document bounds happens here;
    /// that is the bridge's call.
    pub async fn scroll_to_page_y(&self, y: f64) -> Result<()> {
        self.shared.ensure_live()?;
        self.shared.bridge.scroll_to(None, Some(y)).await
    }

    /// Query the current document scroll offset
    ///
    /// Returns a fresh [`ScrollPosition`]; before bridge connectivity is
    /// established this fails with `BridgeUnavailable`, never a default
    /// position.
    pub async fn page_scroll_position(&self) -> Result<ScrollPosition> {
        self.shared.ensure_live()?;
        self.shared.bridge.scroll_position().await
    }

    /// Register a callback for document scroll events
    ///
    /// Returns the unique subscription id used to unsubscribe via
    /// [`remove_page_scroll`](Self::remove_page_scroll). The underlying
    /// bridge listener is installed on the first registration and shared
    /// by all subsequent ones.
    pub async fn register_page_scroll<F, Fut>(&self, callback: F) -> Result<String>
    where
        F: Fn(ScrollPosition) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.shared.ensure_live()?;

        let callback: ScrollCallback = Arc::new(move |position| callback(position).boxed());
        let id = self.shared.insert(callback);

        if let Err(err) = self.ensure_listener().await {
            // Roll back so a failed registration leaves no orphan entry
            self.shared.registry.write().unwrap().remove(&id);
            return Err(err);
        }

        tracing::debug!("registered scroll subscription {}", id);
        Ok(id)
    }

    /// Register a callback and get a guard that unsubscribes on drop
    ///
    /// The guard removes its registry entry when dropped; call
    /// [`ScrollSubscription::detach`] to keep the subscription alive past
    /// the guard and fall back to id-based removal.
    pub async fn subscribe<F, Fut>(&self, callback: F) -> Result<ScrollSubscription>
    where
        F: Fn(ScrollPosition) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let id = self.register_page_scroll(callback).await?;
        Ok(ScrollSubscription::new(id, Arc::downgrade(&self.shared)))
    }

    /// Remove the subscription with the given id
    ///
    /// Removing an id that is not currently registered is a no-op. When
    /// the registry becomes empty the bridge listener is torn down.
    pub async fn remove_page_scroll(&self, id: &str) -> Result<()> {
        self.shared.remove_subscription(id).await
    }

    /// Number of currently-active subscriptions
    pub fn subscription_count(&self) -> usize {
        self.shared.registry.read().unwrap().len()
    }

    /// Dispose the handler: drop all subscriptions and tear down the
    /// bridge listener unconditionally
    ///
    /// Idempotent; the second and later calls are no-ops and never
    /// double-release the listener. Safe to call when no registration ever
    /// occurred. A bridge failure during teardown is logged, not surfaced.
    pub async fn dispose(&self) {
        if self.shared.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.shared.registry.write().unwrap().clear();
        self.shared.listener_installed.store(false, Ordering::SeqCst);

        if let Err(err) = self.shared.bridge.remove_scroll_listener().await {
            tracing::debug!("bridge teardown during dispose failed: {}", err);
        }
        tracing::debug!("scroll handler disposed");
    }

    /// Install the bridge listener if this is the first live subscription
    async fn ensure_listener(&self) -> Result<()> {
        if self.shared.listener_installed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // The notify closure holds only a weak reference, so a handler
        // dropped without disposal doesn't keep the registry alive through
        // the bridge.
        let weak = Arc::downgrade(&self.shared);
        let notify: ScrollNotify = Arc::new(move |position| {
            let weak = weak.clone();
            async move {
                if let Some(shared) = weak.upgrade() {
                    shared.dispatch(position).await;
                }
            }
            .boxed()
        });

        match self.shared.bridge.add_scroll_listener(notify).await {
            Ok(()) => {
                tracing::debug!("document scroll listener installed");
                Ok(())
            }
            Err(err) => {
                self.shared.listener_installed.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }
}

impl HandlerShared {
    fn ensure_live(&self) -> Result<()> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(InteropError::HandlerDisposed);
        }
        Ok(())
    }

    /// Store a callback under a freshly generated id
    fn insert(&self, callback: ScrollCallback) -> String {
        let id = format!("sub-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.registry
            .write()
            .unwrap()
            .insert(id.clone(), callback);
        id
    }

    /// Drop the registry entry without touching the bridge
    ///
    /// Used by subscription guards on drop, where no await is possible.
    /// An idle listener left behind here is torn down by the next explicit
    /// removal or by disposal.
    pub(crate) fn remove_entry(&self, id: &str) {
        if self.registry.write().unwrap().remove(id).is_some() {
            tracing::debug!("removed scroll subscription {}", id);
        }
    }

    /// Remove a subscription and apply the empty-registry teardown policy
    pub(crate) async fn remove_subscription(&self, id: &str) -> Result<()> {
        self.ensure_live()?;

        let now_empty = {
            let mut registry = self.registry.write().unwrap();
            if registry.remove(id).is_some() {
                tracing::debug!("removed scroll subscription {}", id);
            }
            registry.is_empty()
        };

        if now_empty && self.listener_installed.swap(false, Ordering::SeqCst) {
            self.bridge.remove_scroll_listener().await?;
            tracing::debug!("document scroll listener torn down");
        }
        Ok(())
    }

    /// Fan a scroll event out to every currently-registered callback
    ///
    /// Iterates over a snapshot so subscribers may register or remove
    /// subscriptions from within their own callbacks. Membership is
    /// re-checked per entry so a callback is never invoked after its
    /// removal was acknowledged.
    pub(crate) async fn dispatch(&self, position: ScrollPosition) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }

        let snapshot: Vec<(String, ScrollCallback)> = {
            let registry = self.registry.read().unwrap();
            registry
                .iter()
                .map(|(id, callback)| (id.clone(), callback.clone()))
                .collect()
        };

        for (id, callback) in snapshot {
            if !self.registry.read().unwrap().contains_key(&id) {
                continue;
            }
            match AssertUnwindSafe(callback(position)).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!("scroll callback {} failed: {:#}", id, err);
                }
                Err(_) => {
                    tracing::error!("scroll callback {} panicked", id);
                }
            }
        }
    }
}
