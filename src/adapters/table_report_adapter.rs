//! Console table report.

use std::io::Write;

use crate::domain::error::FolioError;
use crate::domain::valuation::{DisplayRow, DisplaySummary, Valuation};
use crate::ports::report_port::ReportPort;

pub const DEFAULT_CURRENCY: &str = "₹";

/// Appended to rows whose quantity or buy price did not parse.
pub const NEEDS_CORRECTION: &str = "(needs correction)";

pub struct TableReportAdapter {
    currency: String,
}

impl TableReportAdapter {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
        }
    }

    pub fn money(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency, value)
    }

    /// Money with an explicit sign, e.g. `+₹1000.00`, `-₹500.00`.
    pub fn signed_money(&self, value: f64) -> String {
        if value > 0.0 {
            format!("+{}{:.2}", self.currency, value)
        } else if value < 0.0 {
            format!("-{}{:.2}", self.currency, value.abs())
        } else {
            self.money(0.0)
        }
    }

    fn format_row(&self, row: &DisplayRow) -> String {
        let current = match row.current_price {
            Some(p) => self.money(p),
            None => "unavailable".to_string(),
        };
        let line = format!(
            "{:<12} {:>8} {:>12} {:>12} {:>14} {:>14} {:>14} {:>9}",
            row.ticker,
            row.quantity,
            self.money(row.buy_price),
            current,
            self.money(row.invested),
            self.money(row.current_value),
            self.signed_money(row.profit),
            signed_percent(row.change_percent),
        );
        if row.needs_correction {
            format!("{}  {}", line, NEEDS_CORRECTION)
        } else {
            line
        }
    }

    fn format_summary(&self, summary: &DisplaySummary) -> String {
        format!(
            "{:<12} {:>8} {:>12} {:>12} {:>14} {:>14} {:>14} {:>9}",
            "TOTAL",
            "",
            "",
            "",
            self.money(summary.total_invested),
            self.money(summary.total_current_value),
            self.signed_money(summary.total_profit),
            signed_percent(summary.total_change_percent),
        )
    }
}

impl Default for TableReportAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

pub fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

fn header() -> String {
    format!(
        "{:<12} {:>8} {:>12} {:>12} {:>14} {:>14} {:>14} {:>9}",
        "Ticker", "Qty", "Buy Price", "Current", "Invested", "Value", "P/L", "Change"
    )
}

impl ReportPort for TableReportAdapter {
    fn write(&self, valuation: &Valuation, out: &mut dyn Write) -> Result<(), FolioError> {
        let display = valuation.display();
        let mut output = String::new();

        let head = header();
        output.push_str(&head);
        output.push('\n');
        output.push_str(&"-".repeat(head.chars().count()));
        output.push('\n');

        if display.rows.is_empty() {
            output.push_str("No holdings.\n");
        }
        for row in &display.rows {
            output.push_str(&self.format_row(row));
            output.push('\n');
        }

        output.push_str(&"-".repeat(head.chars().count()));
        output.push('\n');
        output.push_str(&self.format_summary(&display.summary));
        output.push('\n');

        out.write_all(output.as_bytes())?;
        Ok(())
    }
}
