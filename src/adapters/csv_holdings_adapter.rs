//! CSV file holdings adapter.
//!
//! File layout: a `ticker,quantity,buy_price` header followed by one row per
//! holding, in portfolio order. Quantity and price are stored as the text the
//! user entered, so unparsed input survives a save/load cycle.

use crate::domain::error::FolioError;
use crate::domain::holding::Holding;
use crate::domain::portfolio::Portfolio;
use crate::ports::holdings_port::HoldingsPort;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct HoldingRecord {
    ticker: String,
    quantity: String,
    buy_price: String,
}

impl From<&Holding> for HoldingRecord {
    fn from(holding: &Holding) -> Self {
        HoldingRecord {
            ticker: holding.ticker.clone(),
            quantity: holding.quantity.to_string(),
            buy_price: holding.buy_price.to_string(),
        }
    }
}

pub struct CsvHoldingsAdapter {
    path: PathBuf,
}

impl CsvHoldingsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl HoldingsPort for CsvHoldingsAdapter {
    fn load(&self) -> Result<Portfolio, FolioError> {
        if !self.path.exists() {
            log::info!(
                "holdings file {} not found, starting empty",
                self.path.display()
            );
            return Ok(Portfolio::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| FolioError::Holdings {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut portfolio = Portfolio::new();

        for (line, result) in rdr.deserialize::<HoldingRecord>().enumerate() {
            let record = result.map_err(|e| FolioError::Holdings {
                reason: format!("CSV parse error: {}", e),
            })?;

            let holding = Holding::from_input(&record.ticker, &record.quantity, &record.buy_price);
            if !portfolio.insert(holding) {
                log::warn!(
                    "skipping holdings row {} ({}): empty or duplicate ticker",
                    line + 2,
                    record.ticker
                );
            }
        }

        Ok(portfolio)
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), FolioError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        if portfolio.is_empty() {
            wtr.write_record(["ticker", "quantity", "buy_price"])
                .map_err(|e| FolioError::Holdings {
                    reason: format!("CSV write error: {}", e),
                })?;
        }
        for holding in portfolio.holdings() {
            wtr.serialize(HoldingRecord::from(holding))
                .map_err(|e| FolioError::Holdings {
                    reason: format!("CSV write error: {}", e),
                })?;
        }
        let bytes = wtr.into_inner().map_err(|e| FolioError::Holdings {
            reason: format!("CSV write error: {}", e),
        })?;

        fs::write(&self.path, bytes).map_err(|e| FolioError::Holdings {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })?;
        log::debug!(
            "saved {} holdings to {}",
            portfolio.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Amount;
    use tempfile::TempDir;

    fn adapter_in(dir: &TempDir) -> CsvHoldingsAdapter {
        CsvHoldingsAdapter::new(dir.path().join("holdings.csv"))
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let portfolio = adapter_in(&dir).load().unwrap();
        assert!(portfolio.is_empty());
    }

    #[test]
    fn load_reads_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let adapter = adapter_in(&dir);
        fs::write(
            adapter.path(),
            "ticker,quantity,buy_price\nreliance, 10 ,2400\nTCS,5,3400.5\n",
        )
        .unwrap();

        let portfolio = adapter.load().unwrap();
        assert_eq!(portfolio.tickers(), vec!["RELIANCE", "TCS"]);
        let tcs = portfolio.get_holding("TCS").unwrap();
        assert_eq!(tcs.buy_price, Amount::Parsed(3400.5));
    }

    #[test]
    fn load_skips_duplicate_tickers() {
        let dir = TempDir::new().unwrap();
        let adapter = adapter_in(&dir);
        fs::write(
            adapter.path(),
            "ticker,quantity,buy_price\nTCS,5,3400\ntcs,1,1\n,2,2\n",
        )
        .unwrap();

        let portfolio = adapter.load().unwrap();
        assert_eq!(portfolio.len(), 1);
        assert_eq!(
            portfolio.get_holding("TCS").unwrap().quantity,
            Amount::Parsed(5.0)
        );
    }

    #[test]
    fn load_rejects_malformed_csv() {
        let dir = TempDir::new().unwrap();
        let adapter = adapter_in(&dir);
        fs::write(adapter.path(), "ticker,quantity,buy_price\nTCS,5\n").unwrap();

        let err = adapter.load().unwrap_err();
        assert!(matches!(err, FolioError::Holdings { .. }));
    }

    #[test]
    fn save_then_load_preserves_raw_input() {
        let dir = TempDir::new().unwrap();
        let adapter = adapter_in(&dir);

        let mut portfolio = Portfolio::new();
        portfolio.add_holding("INFY", "12", "1450.25");
        portfolio.add_holding("HDFC", "lots", "");
        adapter.save(&portfolio).unwrap();

        let loaded = adapter.load().unwrap();
        assert_eq!(loaded, portfolio);
        assert_eq!(
            loaded.get_holding("HDFC").unwrap().quantity,
            Amount::Unparsed("lots".into())
        );
    }

    #[test]
    fn save_empty_writes_header() {
        let dir = TempDir::new().unwrap();
        let adapter = adapter_in(&dir);
        adapter.save(&Portfolio::new()).unwrap();

        let content = fs::read_to_string(adapter.path()).unwrap();
        assert_eq!(content, "ticker,quantity,buy_price\n");
        assert!(adapter.load().unwrap().is_empty());
    }
}
