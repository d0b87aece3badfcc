//! Application state for the HTTP server.

use chrono::FixedOffset;
use std::sync::Arc;

use crate::config::display_offset;
use crate::config::DEFAULT_DISPLAY_OFFSET_HOURS;
use crate::db::FullRepository;
use crate::places::PlacesClient;
use crate::services::PlaceRenderer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FullRepository>,
    pub places: Arc<dyn PlacesClient>,
    /// Offset used when rendering place datetimes.
    pub display_offset: FixedOffset,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>, places: Arc<dyn PlacesClient>) -> Self {
        Self {
            repository,
            places,
            display_offset: display_offset(DEFAULT_DISPLAY_OFFSET_HOURS),
        }
    }

    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn renderer(&self) -> PlaceRenderer<'_> {
        PlaceRenderer::new(self.places.as_ref(), self.display_offset)
    }
}
