//! Scroll subscription guards
//!
//! [`ScrollHandler::subscribe`](crate::ScrollHandler::subscribe) returns a
//! guard that removes its registry entry when dropped, so a component that
//! holds the guard for its own lifetime never leaks a subscription. The
//! id-based [`register_page_scroll`](crate::ScrollHandler::register_page_scroll)
//! / [`remove_page_scroll`](crate::ScrollHandler::remove_page_scroll) pair
//! remains available for callers that want to manage removal explicitly.

use lumo_interop::Result;
use std::sync::Weak;

use crate::handler::HandlerShared;

/// Guard for an active scroll subscription
///
/// Dropping the guard removes the subscription's callback from dispatch.
/// Because `Drop` cannot await, drop-removal only clears the registry
/// entry; an idle bridge listener left behind is torn down by the next
/// explicit removal or by handler disposal. Use [`remove`](Self::remove)
/// when eager listener teardown matters.
#[must_use = "dropping the guard removes the subscription"]
pub struct ScrollSubscription {
    id: String,
    shared: Weak<HandlerShared>,
    detached: bool,
}

impl ScrollSubscription {
    pub(crate) fn new(id: String, shared: Weak<HandlerShared>) -> Self {
        Self {
            id,
            shared,
            detached: false,
        }
    }

    /// The subscription id, as returned by registration
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Keep the subscription alive past this guard
    ///
    /// Returns the id; the caller becomes responsible for removal via
    /// [`ScrollHandler::remove_page_scroll`](crate::ScrollHandler::remove_page_scroll).
    pub fn detach(mut self) -> String {
        self.detached = true;
        self.id.clone()
    }

    /// Remove the subscription now, applying the handler's empty-registry
    /// listener teardown policy
    pub async fn remove(mut self) -> Result<()> {
        self.detached = true;
        let id = self.id.clone();
        let shared = self.shared.upgrade();
        drop(self);

        match shared {
            Some(shared) => shared.remove_subscription(&id).await,
            // Handler already gone; nothing left to remove
            None => Ok(()),
        }
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.remove_entry(&self.id);
        }
    }
}
