//! End-to-end scroll handler behavior against a scripted browser bridge

use async_trait::async_trait;
use lumo_scroll::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted in-memory stand-in for a live browser document
///
/// Holds the installed notify callback so tests can fire scroll events,
/// and models a 5000px-tall document for page-end scrolling.
#[derive(Default)]
struct MockBridge {
    notify: Mutex<Option<ScrollNotify>>,
    position: Mutex<ScrollPosition>,
    scrolled_into_view: Mutex<Vec<String>>,
    listener_adds: AtomicUsize,
}

const DOCUMENT_END_Y: f64 = 5000.0;

impl MockBridge {
    fn new() -> Arc<Self> {
        Arc::default()
    }

    /// Simulate a document scroll event at the given position
    async fn fire(&self, position: ScrollPosition) {
        *self.position.lock().unwrap() = position;
        let notify = self.notify.lock().unwrap().clone();
        if let Some(notify) = notify {
            notify(position).await;
        }
    }

    fn listener_active(&self) -> bool {
        self.notify.lock().unwrap().is_some()
    }
}

#[async_trait]
impl ScrollBridge for MockBridge {
    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<()> {
        if element.as_str().starts_with("stale-") {
            return Err(InteropError::ElementNotFound {
                handle: element.to_string(),
            });
        }
        self.scrolled_into_view
            .lock()
            .unwrap()
            .push(element.as_str().to_string());
        Ok(())
    }

    async fn scroll_to(&self, x: Option<f64>, y: Option<f64>) -> Result<()> {
        let mut position = self.position.lock().unwrap();
        if let Some(x) = x {
            position.x = x;
        }
        if let Some(y) = y {
            position.y = y;
        }
        Ok(())
    }

    async fn scroll_to_document_end(&self) -> Result<()> {
        self.position.lock().unwrap().y = DOCUMENT_END_Y;
        Ok(())
    }

    async fn scroll_position(&self) -> Result<ScrollPosition> {
        Ok(*self.position.lock().unwrap())
    }

    async fn add_scroll_listener(&self, notify: ScrollNotify) -> Result<()> {
        self.listener_adds.fetch_add(1, Ordering::SeqCst);
        *self.notify.lock().unwrap() = Some(notify);
        Ok(())
    }

    async fn remove_scroll_listener(&self) -> Result<()> {
        *self.notify.lock().unwrap() = None;
        Ok(())
    }
}

/// Register a callback that appends every received position to `log`
async fn register_recorder(
    handler: &ScrollHandler,
    log: Arc<Mutex<Vec<ScrollPosition>>>,
) -> String {
    handler
        .register_page_scroll(move |position| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(position);
                Ok(())
            }
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn all_subscribers_receive_each_event() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    let seen_a = Arc::new(Mutex::new(Vec::new()));
    let seen_b = Arc::new(Mutex::new(Vec::new()));
    let id_a = register_recorder(&handler, seen_a.clone()).await;
    let id_b = register_recorder(&handler, seen_b.clone()).await;
    assert_eq!(id_a, "sub-1");
    assert_eq!(id_b, "sub-2");

    bridge.fire(ScrollPosition::new(0.0, 120.0)).await;
    assert_eq!(*seen_a.lock().unwrap(), vec![ScrollPosition::new(0.0, 120.0)]);
    assert_eq!(*seen_b.lock().unwrap(), vec![ScrollPosition::new(0.0, 120.0)]);

    handler.remove_page_scroll(&id_a).await.unwrap();

    bridge.fire(ScrollPosition::new(0.0, 240.0)).await;
    assert_eq!(seen_a.lock().unwrap().len(), 1);
    assert_eq!(
        *seen_b.lock().unwrap(),
        vec![
            ScrollPosition::new(0.0, 120.0),
            ScrollPosition::new(0.0, 240.0)
        ]
    );
}

#[tokio::test]
async fn failing_and_panicking_callbacks_are_isolated() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    handler
        .register_page_scroll(|_| async { anyhow::bail!("subscriber bug") })
        .await
        .unwrap();
    handler
        .register_page_scroll(|_| async { panic!("worse subscriber bug") })
        .await
        .unwrap();

    let delivered = Arc::new(AtomicUsize::new(0));
    let counter = delivered.clone();
    handler
        .register_page_scroll(move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await
        .unwrap();

    bridge.fire(ScrollPosition::new(0.0, 10.0)).await;
    bridge.fire(ScrollPosition::new(0.0, 20.0)).await;

    // The healthy subscriber got every event despite its neighbors
    assert_eq!(delivered.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn callback_may_register_during_dispatch() {
    let bridge = MockBridge::new();
    let handler = Arc::new(ScrollHandler::new(bridge.clone()));

    let late_events = Arc::new(AtomicUsize::new(0));
    let registered = Arc::new(AtomicUsize::new(0));

    let handler_for_cb = handler.clone();
    let late_for_cb = late_events.clone();
    let registered_for_cb = registered.clone();
    handler
        .register_page_scroll(move |_| {
            let handler = handler_for_cb.clone();
            let late = late_for_cb.clone();
            let registered = registered_for_cb.clone();
            async move {
                if registered.fetch_add(1, Ordering::SeqCst) == 0 {
                    handler
                        .register_page_scroll(move |_| {
                            let late = late.clone();
                            async move {
                                late.fetch_add(1, Ordering::SeqCst);
                                Ok(())
                            }
                        })
                        .await?;
                }
                Ok(())
            }
        })
        .await
        .unwrap();

    bridge.fire(ScrollPosition::new(0.0, 1.0)).await;
    assert_eq!(handler.subscription_count(), 2);

    bridge.fire(ScrollPosition::new(0.0, 2.0)).await;
    assert_eq!(late_events.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn listener_lifecycle_follows_registrations() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());
    assert!(!bridge.listener_active());

    let id_a = register_recorder(&handler, Arc::new(Mutex::new(Vec::new()))).await;
    let id_b = register_recorder(&handler, Arc::new(Mutex::new(Vec::new()))).await;
    assert!(bridge.listener_active());
    assert_eq!(bridge.listener_adds.load(Ordering::SeqCst), 1);

    handler.remove_page_scroll(&id_a).await.unwrap();
    assert!(bridge.listener_active());

    handler.remove_page_scroll(&id_b).await.unwrap();
    assert!(!bridge.listener_active());

    // A new registration brings the listener back
    register_recorder(&handler, Arc::new(Mutex::new(Vec::new()))).await;
    assert!(bridge.listener_active());
    assert_eq!(bridge.listener_adds.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn subscription_guard_removes_on_drop() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let guard = handler
        .subscribe(move |position| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(position);
                Ok(())
            }
        })
        .await
        .unwrap();

    bridge.fire(ScrollPosition::new(0.0, 50.0)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);

    drop(guard);
    assert_eq!(handler.subscription_count(), 0);

    bridge.fire(ScrollPosition::new(0.0, 60.0)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn detached_subscription_outlives_guard() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let guard = handler
        .subscribe(move |position| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(position);
                Ok(())
            }
        })
        .await
        .unwrap();

    let id = guard.detach();
    bridge.fire(ScrollPosition::new(0.0, 50.0)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);

    handler.remove_page_scroll(&id).await.unwrap();
    bridge.fire(ScrollPosition::new(0.0, 60.0)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn explicit_guard_removal_tears_down_idle_listener() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    let guard = handler.subscribe(|_| async { Ok(()) }).await.unwrap();
    assert!(bridge.listener_active());

    guard.remove().await.unwrap();
    assert!(!bridge.listener_active());
    assert_eq!(handler.subscription_count(), 0);
}

#[tokio::test]
async fn scroll_commands_reach_the_document() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    handler.scroll_to_page_x(80.0).await.unwrap();
    handler.scroll_to_page_y(900.0).await.unwrap();
    assert_eq!(
        handler.page_scroll_position().await.unwrap(),
        ScrollPosition::new(80.0, 900.0)
    );

    handler.scroll_to_page_end().await.unwrap();
    assert_eq!(handler.page_scroll_position().await.unwrap().y, DOCUMENT_END_Y);

    handler.scroll_to_page_top().await.unwrap();
    let position = handler.page_scroll_position().await.unwrap();
    assert_eq!(position.y, 0.0);
    // Horizontal axis untouched by a vertical-only command
    assert_eq!(position.x, 80.0);
}

#[tokio::test]
async fn element_targeting_passes_handles_through() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    handler
        .scroll_to_element(&ElementHandle::from_id("footer"))
        .await
        .unwrap();
    assert_eq!(*bridge.scrolled_into_view.lock().unwrap(), vec!["footer"]);

    let err = handler
        .scroll_to_element(&ElementHandle::from_id("stale-panel"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        InteropError::ElementNotFound {
            handle: "stale-panel".into()
        }
    );
}

#[tokio::test]
async fn dispose_silences_pending_subscriptions() {
    let bridge = MockBridge::new();
    let handler = ScrollHandler::new(bridge.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    register_recorder(&handler, seen.clone()).await;

    handler.dispose().await;
    assert!(!bridge.listener_active());

    // A straggler event from the bridge after disposal reaches nobody
    bridge.fire(ScrollPosition::new(0.0, 999.0)).await;
    assert!(seen.lock().unwrap().is_empty());
}
