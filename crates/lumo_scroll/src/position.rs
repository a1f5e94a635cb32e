//! Scroll position value object

use serde::{Deserialize, Serialize};

/// The document's scroll offset at the moment of a query or event firing
///
/// Produced fresh by the bridge on every query and every event; never
/// cached or updated in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    /// Horizontal offset in CSS pixels
    pub x: f64,
    /// Vertical offset in CSS pixels
    pub y: f64,
}

impl ScrollPosition {
    /// Create a position from horizontal and vertical offsets
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
