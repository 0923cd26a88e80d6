//! Report output port trait.

use std::io::Write;

use crate::domain::error::FolioError;
use crate::domain::valuation::Valuation;

/// Port for writing a valuation in some presentation format.
pub trait ReportPort {
    fn write(&self, valuation: &Valuation, out: &mut dyn Write) -> Result<(), FolioError>;

    /// Default implementation: renders into memory via `write`.
    fn render(&self, valuation: &Valuation) -> Result<String, FolioError> {
        let mut buf = Vec::new();
        self.write(valuation, &mut buf)?;
        String::from_utf8(buf).map_err(|e| FolioError::Report {
            reason: format!("report is not valid UTF-8: {}", e),
        })
    }
}
