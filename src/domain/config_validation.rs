//! Configuration validation.
//!
//! Checks the INI sections before any file is touched.

use crate::domain::error::FolioError;
use crate::ports::config_port::ConfigPort;

pub const REPORT_FORMATS: &[&str] = &["table", "csv"];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), FolioError> {
    validate_holdings_path(config)?;
    validate_price_source(config)?;
    validate_price_config(config)?;
    validate_report_config(config)?;
    Ok(())
}

pub fn validate_holdings_path(config: &dyn ConfigPort) -> Result<(), FolioError> {
    require_non_empty(config, "portfolio", "holdings")
}

pub fn validate_price_source(config: &dyn ConfigPort) -> Result<(), FolioError> {
    require_non_empty(config, "prices", "source")
}

pub fn validate_price_config(config: &dyn ConfigPort) -> Result<(), FolioError> {
    let ticker_column = config.get_int("prices", "ticker_column", 0);
    if ticker_column < 0 {
        return Err(FolioError::ConfigInvalid {
            section: "prices".to_string(),
            key: "ticker_column".to_string(),
            reason: "ticker_column must be non-negative".to_string(),
        });
    }
    let price_column = config.get_int("prices", "price_column", 1);
    if price_column < 0 {
        return Err(FolioError::ConfigInvalid {
            section: "prices".to_string(),
            key: "price_column".to_string(),
            reason: "price_column must be non-negative".to_string(),
        });
    }
    if ticker_column == price_column {
        return Err(FolioError::ConfigInvalid {
            section: "prices".to_string(),
            key: "price_column".to_string(),
            reason: "price_column must differ from ticker_column".to_string(),
        });
    }
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), FolioError> {
    if let Some(format) = config.get_string("report", "format") {
        let format = format.trim().to_lowercase();
        if !REPORT_FORMATS.contains(&format.as_str()) {
            return Err(FolioError::ConfigInvalid {
                section: "report".to_string(),
                key: "format".to_string(),
                reason: format!(
                    "unknown format '{}' (expected one of: {})",
                    format,
                    REPORT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

fn require_non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), FolioError> {
    match config.get_string(section, key) {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(FolioError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}
