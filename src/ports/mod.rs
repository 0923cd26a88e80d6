//! Port traits for configuration, holdings storage, price sources, and reports.

pub mod config_port;
pub mod holdings_port;
pub mod price_port;
pub mod report_port;
