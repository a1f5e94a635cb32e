//! Scroll handler walkthrough against a simulated document
//!
//! Run with: cargo run -p lumo_scroll --example page_watcher

use async_trait::async_trait;
use lumo_scroll::prelude::*;
use std::sync::{Arc, Mutex};

/// In-memory document standing in for a real browser bridge
#[derive(Default)]
struct SimulatedDocument {
    position: Mutex<ScrollPosition>,
    notify: Mutex<Option<ScrollNotify>>,
}

impl SimulatedDocument {
    async fn emit(&self, position: ScrollPosition) {
        *self.position.lock().unwrap() = position;
        let notify = self.notify.lock().unwrap().clone();
        if let Some(notify) = notify {
            notify(position).await;
        }
    }
}

#[async_trait]
impl ScrollBridge for SimulatedDocument {
    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<()> {
        tracing::info!("document: scrolling {} into view", element);
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
        self.position.lock().unwrap().y = 4000.0;
        Ok(())
    }

    async fn scroll_position(&self) -> Result<ScrollPosition> {
        Ok(*self.position.lock().unwrap())
    }

    async fn add_scroll_listener(&self, notify: ScrollNotify) -> Result<()> {
        *self.notify.lock().unwrap() = Some(notify);
        Ok(())
    }

    async fn remove_scroll_listener(&self) -> Result<()> {
        *self.notify.lock().unwrap() = None;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lumo_scroll=debug".into()),
        )
        .init();

    let document = Arc::new(SimulatedDocument::default());
    let handler = ScrollHandler::new(document.clone());

    // Watch the page and report every scroll event
    let watcher = handler
        .subscribe(|position: ScrollPosition| async move {
            tracing::info!("page scrolled to x={} y={}", position.x, position.y);
            Ok(())
        })
        .await?;

    handler
        .scroll_to_element(&ElementHandle::from_id("table-of-contents"))
        .await?;

    document.emit(ScrollPosition::new(0.0, 120.0)).await;
    document.emit(ScrollPosition::new(0.0, 240.0)).await;

    handler.scroll_to_page_end().await?;
    let position = handler.page_scroll_position().await?;
    tracing::info!("now at the page end: y={}", position.y);

    watcher.remove().await?;
    handler.dispose().await;
    Ok(())
}
