//! Error types for the adapters and CLI.
//!
//! Domain operations (portfolio edits, valuation) never fail; malformed input
//! degrades to safe defaults instead. Only I/O-facing code returns these.

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("holdings error: {reason}")]
    Holdings { reason: String },

    #[error("price source error: {reason}")]
    PriceSource { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FolioError> for std::process::ExitCode {
    fn from(err: &FolioError) -> Self {
        let code: u8 = match err {
            FolioError::Io(_) => 1,
            FolioError::ConfigParse { .. }
            | FolioError::ConfigMissing { .. }
            | FolioError::ConfigInvalid { .. } => 2,
            FolioError::Holdings { .. } => 3,
            FolioError::PriceSource { .. } => 4,
            FolioError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
