pub mod config;
pub mod marketplace;
pub mod pipeline;
pub mod printer;
pub mod scan;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, MarketplaceConfig,
    PrinterConfig, SanitizedConfig, ServerConfig,
};
pub use marketplace::{
    CreatePassRequest, Environment, HttpMarketplaceClient, LabelBlob, LabelFormat, MarketplaceApi,
    MarketplaceError, MetaKind, Order, OrderMeta, OrdersPage, OrdersQuery, Pass, PassOffice,
    StickerSize, SupplyBox,
};
pub use pipeline::{
    process_scan, PipelineReport, PipelineRequest, PipelineStatus, PipelineStep, SkipReason,
    StepOutcome, StepReport,
};
pub use printer::{PrinterError, ZplPrinter};
pub use scan::{classify, ClassifiedScan, PayloadKind, ScanError, ScanPayload};
