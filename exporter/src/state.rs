//! Application state module.
//!
//! Defines the shared state that is passed to route handlers.

use crate::metrics::MetricRegistry;

/// Application state shared across all request handlers.
///
/// Scrape handlers only read from the registry; the poll loop is the single writer.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The registry rendered by the scrape endpoint.
    registry: MetricRegistry,
}

impl AppState {
    /// Creates a new application state serving the given registry.
    #[must_use]
    pub fn new(registry: MetricRegistry) -> Self {
        Self { registry }
    }

    /// Returns a reference to the metric registry.
    #[must_use]
    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }
}
