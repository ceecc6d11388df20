use std::sync::Arc;

use campaign_export_core::export::Exporter;
use campaign_export_core::store::DocumentStore;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    documents: Arc<dyn DocumentStore>,
    exporter: Exporter,
}

impl AppState {
    pub fn new(config: AppConfig, documents: Arc<dyn DocumentStore>, exporter: Exporter) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                documents,
                exporter,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn documents(&self) -> &dyn DocumentStore {
        self.inner.documents.as_ref()
    }

    pub fn exporter(&self) -> &Exporter {
        &self.inner.exporter
    }
}
