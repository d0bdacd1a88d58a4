//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::BarcodeService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Barcode service.
    pub barcode_service: Arc<BarcodeService>,
    /// Prometheus render handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let barcode_service = Arc::new(BarcodeService::new(&config.barcode));

        Self {
            config,
            barcode_service,
            metrics: None,
        }
    }

    /// Attach the handle used to render the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
