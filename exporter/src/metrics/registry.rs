//! Metric registry.
//!
//! An explicitly owned registry that the exporter writes into and the scrape
//! endpoint reads from. Independent registries do not share any state.

use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;

/// A cloneable handle to a Prometheus registry.
///
/// Clones share the same underlying registry.
#[derive(Clone, Default)]
pub struct MetricRegistry {
    inner: Arc<Registry>,
}

impl MetricRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying Prometheus registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner
    }

    /// Returns the number of registered metric families.
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.inner.gather().len()
    }

    /// Returns the content type of the text exposition format.
    #[must_use]
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Renders every registered metric in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric families cannot be encoded.
    pub fn gather_text(&self) -> prometheus::Result<String> {
        TextEncoder::new().encode_to_string(&self.inner.gather())
    }
}

impl std::fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("families", &self.family_count())
            .finish()
    }
}
