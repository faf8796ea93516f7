use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::marketplace::Environment;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub printer: Option<PrinterConfig>,
}

/// Marketplace supplier API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketplaceConfig {
    /// Marketplace-category API token. May be absent at startup and set
    /// later through the token endpoint.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub environment: Environment,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            token: None,
            environment: Environment::default(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Networked label printer configuration (optional)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrinterConfig {
    pub host: String,
    #[serde(default = "default_printer_port")]
    pub port: u16,
    /// Connect/write timeout in seconds (default: 10)
    #[serde(default = "default_printer_timeout")]
    pub timeout_secs: u32,
}

fn default_printer_port() -> u16 {
    9100
}

fn default_printer_timeout() -> u32 {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub marketplace: SanitizedMarketplaceConfig,
    pub server: ServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer: Option<SanitizedPrinterConfig>,
}

/// Sanitized marketplace config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMarketplaceConfig {
    pub environment: Environment,
    pub token_configured: bool,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPrinterConfig {
    pub host: String,
    pub port: u16,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            marketplace: SanitizedMarketplaceConfig {
                environment: config.marketplace.environment,
                token_configured: config
                    .marketplace
                    .token
                    .as_deref()
                    .is_some_and(|t| !t.trim().is_empty()),
                timeout_secs: config.marketplace.timeout_secs,
            },
            server: config.server.clone(),
            printer: config.printer.as_ref().map(|p| SanitizedPrinterConfig {
                host: p.host.clone(),
                port: p.port,
            }),
        }
    }
}
