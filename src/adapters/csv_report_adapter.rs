//! CSV valuation report.
//!
//! One row per holding followed by a `TOTAL` row. Values are rounded to two
//! decimals; an unresolved price is written as `unavailable`.

use std::io::Write;

use serde::Serialize;

use crate::domain::error::FolioError;
use crate::domain::valuation::{DisplayRow, DisplaySummary, Valuation};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct ReportRecord {
    ticker: String,
    quantity: String,
    buy_price: String,
    current_price: String,
    invested: String,
    current_value: String,
    profit: String,
    change_percent: String,
}

impl From<&DisplayRow> for ReportRecord {
    fn from(row: &DisplayRow) -> Self {
        ReportRecord {
            ticker: row.ticker.clone(),
            quantity: row.quantity.to_string(),
            buy_price: format!("{:.2}", row.buy_price),
            current_price: row
                .current_price
                .map_or_else(|| "unavailable".to_string(), |p| format!("{:.2}", p)),
            invested: format!("{:.2}", row.invested),
            current_value: format!("{:.2}", row.current_value),
            profit: format!("{:.2}", row.profit),
            change_percent: format!("{:.2}", row.change_percent),
        }
    }
}

impl From<&DisplaySummary> for ReportRecord {
    fn from(summary: &DisplaySummary) -> Self {
        ReportRecord {
            ticker: "TOTAL".to_string(),
            quantity: String::new(),
            buy_price: String::new(),
            current_price: String::new(),
            invested: format!("{:.2}", summary.total_invested),
            current_value: format!("{:.2}", summary.total_current_value),
            profit: format!("{:.2}", summary.total_profit),
            change_percent: format!("{:.2}", summary.total_change_percent),
        }
    }
}

#[derive(Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        CsvReportAdapter
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, valuation: &Valuation, out: &mut dyn Write) -> Result<(), FolioError> {
        let display = valuation.display();
        let mut wtr = csv::Writer::from_writer(out);

        let records = display
            .rows
            .iter()
            .map(ReportRecord::from)
            .chain(std::iter::once(ReportRecord::from(&display.summary)));
        for record in records {
            wtr.serialize(record).map_err(|e| FolioError::Report {
                reason: format!("CSV write error: {}", e),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
