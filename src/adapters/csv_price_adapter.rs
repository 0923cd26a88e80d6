//! Price sheet CSV adapter.
//!
//! Reads a spreadsheet export with one ticker and one price per row. Rows
//! with an empty ticker or a non-numeric price are skipped, so a partially
//! filled sheet still yields a usable snapshot.

use crate::domain::error::FolioError;
use crate::domain::price::{PriceLookup, PriceQuote};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    path: PathBuf,
    ticker_column: usize,
    price_column: usize,
    has_header: bool,
}

impl CsvPriceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ticker_column: 0,
            price_column: 1,
            has_header: true,
        }
    }

    pub fn with_columns(mut self, ticker_column: usize, price_column: usize) -> Self {
        self.ticker_column = ticker_column;
        self.price_column = price_column;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Build from the `[prices]` section. `source_override` takes precedence
    /// over `prices.source`.
    pub fn from_config(
        config: &dyn ConfigPort,
        source_override: Option<&PathBuf>,
    ) -> Result<Self, FolioError> {
        let path = match source_override {
            Some(p) => p.clone(),
            None => config
                .get_string("prices", "source")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| FolioError::ConfigMissing {
                    section: "prices".into(),
                    key: "source".into(),
                })?,
        };

        let ticker_column = column_index(config, "ticker_column", 0)?;
        let price_column = column_index(config, "price_column", 1)?;

        Ok(Self::new(path)
            .with_columns(ticker_column, price_column)
            .with_header(config.get_bool("prices", "has_header", true)))
    }

    /// 1-based sheet line of the `idx`-th data record.
    fn sheet_line(&self, idx: usize) -> usize {
        if self.has_header { idx + 2 } else { idx + 1 }
    }

    /// Parse price sheet content into a snapshot.
    pub fn parse(&self, content: &str) -> Result<PriceLookup, FolioError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut lookup = PriceLookup::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| FolioError::PriceSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ticker = record.get(self.ticker_column).unwrap_or("").trim();
            if ticker.is_empty() {
                log::warn!("price sheet line {}: empty ticker, skipped", self.sheet_line(idx));
                continue;
            }

            match PriceQuote::parse(record.get(self.price_column).unwrap_or("")) {
                PriceQuote::Resolved(price) => lookup.insert(ticker, price),
                PriceQuote::Unavailable => {
                    log::warn!(
                        "price sheet line {}: no numeric price for {}",
                        self.sheet_line(idx),
                        ticker
                    );
                }
            }
        }

        Ok(lookup)
    }
}

fn column_index(config: &dyn ConfigPort, key: &str, default: i64) -> Result<usize, FolioError> {
    let value = config.get_int("prices", key, default);
    usize::try_from(value).map_err(|_| FolioError::ConfigInvalid {
        section: "prices".into(),
        key: key.into(),
        reason: format!("{} must be non-negative", key),
    })
}

impl PricePort for CsvPriceAdapter {
    fn snapshot(&self) -> Result<PriceLookup, FolioError> {
        let content = fs::read_to_string(&self.path).map_err(|e| FolioError::PriceSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let lookup = self.parse(&content)?;
        log::debug!(
            "loaded {} prices from {}",
            lookup.len(),
            self.path.display()
        );
        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use tempfile::TempDir;

    const SHEET: &str = "Ticker,Price\n\
        RELIANCE,2500\n\
        tcs , 3300.5\n\
        INFY,#N/A\n\
        ,100\n\
        HDFCBANK\n";

    #[test]
    fn sheet_line_accounts_for_header() {
        let adapter = CsvPriceAdapter::new(PathBuf::from("unused.csv"));
        assert_eq!(adapter.sheet_line(0), 2);
        assert_eq!(adapter.sheet_line(3), 5);
        let headerless = adapter.with_header(false);
        assert_eq!(headerless.sheet_line(0), 1);
    }

    #[test]
    fn parse_skips_header_and_bad_rows() {
        let adapter = CsvPriceAdapter::new(PathBuf::from("unused.csv"));
        let lookup = adapter.parse(SHEET).unwrap();

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.resolve("RELIANCE"), PriceQuote::Resolved(2500.0));
        assert_eq!(lookup.resolve("TCS"), PriceQuote::Resolved(3300.5));
        assert_eq!(lookup.resolve("INFY"), PriceQuote::Unavailable);
        assert_eq!(lookup.resolve("HDFCBANK"), PriceQuote::Unavailable);
    }

    #[test]
    fn parse_without_header_keeps_first_row() {
        let adapter = CsvPriceAdapter::new(PathBuf::from("unused.csv")).with_header(false);
        let lookup = adapter.parse("RELIANCE,2500\nTCS,3300\n").unwrap();
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn parse_custom_columns() {
        let adapter = CsvPriceAdapter::new(PathBuf::from("unused.csv")).with_columns(1, 3);
        let lookup = adapter
            .parse("name,symbol,open,close\nReliance Industries,RELIANCE,2450,2500\n")
            .unwrap();
        assert_eq!(lookup.resolve("RELIANCE"), PriceQuote::Resolved(2500.0));
    }

    #[test]
    fn snapshot_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, SHEET).unwrap();

        let lookup = CsvPriceAdapter::new(path).snapshot().unwrap();
        assert_eq!(lookup.resolve("tcs").price(), Some(3300.5));
    }

    #[test]
    fn snapshot_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = CsvPriceAdapter::new(dir.path().join("absent.csv")).snapshot();
        assert!(matches!(result, Err(FolioError::PriceSource { .. })));
    }

    #[test]
    fn from_config_reads_prices_section() {
        let config = FileConfigAdapter::from_string(
            "[prices]\nsource = /tmp/p.csv\nticker_column = 2\nprice_column = 5\nhas_header = false\n",
        )
        .unwrap();
        let adapter = CsvPriceAdapter::from_config(&config, None).unwrap();
        assert_eq!(adapter.path, PathBuf::from("/tmp/p.csv"));
        assert_eq!(adapter.ticker_column, 2);
        assert_eq!(adapter.price_column, 5);
        assert!(!adapter.has_header);
    }

    #[test]
    fn from_config_override_wins() {
        let config = FileConfigAdapter::from_string("[prices]\nsource = a.csv\n").unwrap();
        let override_path = PathBuf::from("b.csv");
        let adapter = CsvPriceAdapter::from_config(&config, Some(&override_path)).unwrap();
        assert_eq!(adapter.path, override_path);
    }

    #[test]
    fn from_config_requires_source() {
        let config = FileConfigAdapter::from_string("[prices]\n").unwrap();
        let err = CsvPriceAdapter::from_config(&config, None).err().unwrap();
        assert!(matches!(err, FolioError::ConfigMissing { key, .. } if key == "source"));
    }

    #[test]
    fn from_config_rejects_negative_column() {
        let config =
            FileConfigAdapter::from_string("[prices]\nsource = a.csv\nprice_column = -1\n").unwrap();
        let err = CsvPriceAdapter::from_config(&config, None).err().unwrap();
        assert!(matches!(err, FolioError::ConfigInvalid { key, .. } if key == "price_column"));
    }
}
