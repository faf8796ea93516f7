use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Marketplace section exists (enforced by serde)
/// - Server port is not 0
/// - Timeouts are not 0
/// - Printer host/port when a printer is configured
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.marketplace.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "marketplace.timeout_secs cannot be 0".to_string(),
        ));
    }

    if let Some(printer) = &config.printer {
        if printer.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "printer.host cannot be empty".to_string(),
            ));
        }
        if printer.port == 0 {
            return Err(ConfigError::ValidationError(
                "printer.port cannot be 0".to_string(),
            ));
        }
        if printer.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "printer.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
