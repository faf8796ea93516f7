use std::sync::Arc;

use packflow_core::{Config, MarketplaceApi, SanitizedConfig, ZplPrinter};

/// Shared application state
pub struct AppState {
    config: Config,
    marketplace: Arc<dyn MarketplaceApi>,
    printer: Option<Arc<ZplPrinter>>,
}

impl AppState {
    pub fn new(
        config: Config,
        marketplace: Arc<dyn MarketplaceApi>,
        printer: Option<Arc<ZplPrinter>>,
    ) -> Self {
        Self {
            config,
            marketplace,
            printer,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn marketplace(&self) -> &dyn MarketplaceApi {
        self.marketplace.as_ref()
    }

    pub fn printer(&self) -> Option<&ZplPrinter> {
        self.printer.as_deref()
    }
}
