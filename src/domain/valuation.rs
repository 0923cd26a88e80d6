//! Portfolio valuation and profit/loss.
//!
//! [`valuate`] is a pure function of the portfolio and one price snapshot.
//! All figures are accumulated at full `f64` precision; rounding to two
//! decimals happens only when building the display view, after summing.

use super::portfolio::Portfolio;
use super::price::{PriceLookup, PriceQuote};

/// Rounding applied to money and percentages in the display view.
pub const DISPLAY_DECIMALS: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRow {
    pub ticker: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: PriceQuote,
    pub invested: f64,
    pub current_value: f64,
    pub profit: f64,
    pub change_percent: f64,
    /// Quantity or buy price is still the raw text the user entered.
    pub needs_correction: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    pub total_invested: f64,
    pub total_current_value: f64,
    pub total_profit: f64,
    pub total_change_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    pub rows: Vec<ValuationRow>,
    pub summary: PortfolioSummary,
}

/// Percentage change of `profit` over `invested`; zero when nothing was invested.
pub fn change_percent(profit: f64, invested: f64) -> f64 {
    if invested > 0.0 {
        profit / invested * 100.0
    } else {
        0.0
    }
}

pub fn valuate(portfolio: &Portfolio, prices: &PriceLookup) -> Valuation {
    let rows: Vec<ValuationRow> = portfolio
        .holdings()
        .iter()
        .map(|holding| {
            let quantity = holding.quantity.value();
            let buy_price = holding.buy_price.value();
            let current_price = prices.resolve(&holding.ticker);
            if !current_price.is_available() {
                log::debug!("no current price for {}", holding.ticker);
            }

            let invested = quantity * buy_price;
            let current_value = current_price.price().map_or(0.0, |p| quantity * p);
            let profit = current_value - invested;
            if !(invested.is_finite() && current_value.is_finite()) {
                log::warn!("{}: value out of range, shown as zero", holding.ticker);
            }

            ValuationRow {
                ticker: holding.ticker.clone(),
                quantity,
                buy_price,
                current_price,
                invested,
                current_value,
                profit,
                change_percent: change_percent(profit, invested),
                needs_correction: !(holding.quantity.is_parsed() && holding.buy_price.is_parsed()),
            }
        })
        .collect();

    let total_invested: f64 = rows.iter().map(|r| r.invested).sum();
    let total_current_value: f64 = rows.iter().map(|r| r.current_value).sum();
    let total_profit = total_current_value - total_invested;

    Valuation {
        summary: PortfolioSummary {
            total_invested,
            total_current_value,
            total_profit,
            total_change_percent: change_percent(total_profit, total_invested),
        },
        rows,
    }
}

/// Round to [`DISPLAY_DECIMALS`] places. Negative zero is folded to zero,
/// and a non-finite figure (overflowed arithmetic) is shown as zero.
pub fn round_display(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// A row ready for presentation: money and percentages rounded, and
/// `current_price` is `None` when the price is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub ticker: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: Option<f64>,
    pub invested: f64,
    pub current_value: f64,
    pub profit: f64,
    pub change_percent: f64,
    pub needs_correction: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySummary {
    pub total_invested: f64,
    pub total_current_value: f64,
    pub total_profit: f64,
    pub total_change_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayValuation {
    pub rows: Vec<DisplayRow>,
    pub summary: DisplaySummary,
}

impl From<&ValuationRow> for DisplayRow {
    fn from(row: &ValuationRow) -> Self {
        DisplayRow {
            ticker: row.ticker.clone(),
            quantity: row.quantity,
            buy_price: round_display(row.buy_price),
            current_price: row.current_price.price().map(round_display),
            invested: round_display(row.invested),
            current_value: round_display(row.current_value),
            profit: round_display(row.profit),
            change_percent: round_display(row.change_percent),
            needs_correction: row.needs_correction,
        }
    }
}

impl From<&PortfolioSummary> for DisplaySummary {
    fn from(summary: &PortfolioSummary) -> Self {
        DisplaySummary {
            total_invested: round_display(summary.total_invested),
            total_current_value: round_display(summary.total_current_value),
            total_profit: round_display(summary.total_profit),
            total_change_percent: round_display(summary.total_change_percent),
        }
    }
}

impl Valuation {
    pub fn display(&self) -> DisplayValuation {
        DisplayValuation {
            rows: self.rows.iter().map(DisplayRow::from).collect(),
            summary: DisplaySummary::from(&self.summary),
        }
    }

    pub fn unavailable_tickers(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| !r.current_price.is_available())
            .map(|r| r.ticker.as_str())
            .collect()
    }
}
