use std::sync::Arc;

use common::config::Settings;
use common::remote::RemoteSource;
use common::resolver::Resolver;
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub config: Arc<Settings>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(
        source: Arc<dyn RemoteSource>,
        config: Settings,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            resolver: Resolver::new(source, config.radar.product.clone()),
            config: Arc::new(config),
            metrics,
        }
    }
}
