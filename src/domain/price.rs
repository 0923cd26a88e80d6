//! Current-price snapshot supplied by a price source.

use std::collections::HashMap;
use std::fmt;

use super::holding::normalize_ticker;

/// A current price, or the explicit absence of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceQuote {
    Resolved(f64),
    Unavailable,
}

impl PriceQuote {
    /// Interpret a loosely-typed price value from a feed.
    ///
    /// Anything that is not a finite number (`N/A`, `Loading...`, `-`, empty)
    /// is `Unavailable`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => PriceQuote::Resolved(v),
            _ => PriceQuote::Unavailable,
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            PriceQuote::Resolved(v) => Some(*v),
            PriceQuote::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PriceQuote::Resolved(_))
    }
}

impl From<f64> for PriceQuote {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            PriceQuote::Resolved(value)
        } else {
            PriceQuote::Unavailable
        }
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceQuote::Resolved(v) => write!(f, "{:.2}", v),
            PriceQuote::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Ticker to price mapping. Keys are stored normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceLookup {
    quotes: HashMap<String, PriceQuote>,
}

impl PriceLookup {
    pub fn new() -> Self {
        PriceLookup {
            quotes: HashMap::new(),
        }
    }

    pub fn insert(&mut self, ticker: &str, quote: impl Into<PriceQuote>) {
        self.quotes.insert(normalize_ticker(ticker), quote.into());
    }

    pub fn with_price(mut self, ticker: &str, price: f64) -> Self {
        self.insert(ticker, price);
        self
    }

    /// Missing tickers resolve to `Unavailable`.
    pub fn resolve(&self, ticker: &str) -> PriceQuote {
        self.quotes
            .get(&normalize_ticker(ticker))
            .copied()
            .unwrap_or(PriceQuote::Unavailable)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl From<HashMap<String, f64>> for PriceLookup {
    fn from(map: HashMap<String, f64>) -> Self {
        let mut lookup = PriceLookup::new();
        for (ticker, price) in map {
            lookup.insert(&ticker, price);
        }
        lookup
    }
}

impl<'a> FromIterator<(&'a str, f64)> for PriceLookup {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut lookup = PriceLookup::new();
        for (ticker, price) in iter {
            lookup.insert(ticker, price);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_quote() {
        assert_eq!(PriceQuote::parse("2500"), PriceQuote::Resolved(2500.0));
        assert_eq!(PriceQuote::parse(" 12.75 "), PriceQuote::Resolved(12.75));
    }

    #[test]
    fn parse_markers_as_unavailable() {
        for raw in ["N/A", "Loading...", "-", "", "NaN", "inf"] {
            assert_eq!(PriceQuote::parse(raw), PriceQuote::Unavailable, "{raw}");
        }
    }

    #[test]
    fn non_finite_float_is_unavailable() {
        assert_eq!(PriceQuote::from(f64::NAN), PriceQuote::Unavailable);
        assert_eq!(PriceQuote::from(f64::INFINITY), PriceQuote::Unavailable);
    }

    #[test]
    fn display_quote() {
        assert_eq!(PriceQuote::Resolved(3300.0).to_string(), "3300.00");
        assert_eq!(PriceQuote::Unavailable.to_string(), "unavailable");
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let lookup = PriceLookup::new().with_price("reliance", 2500.0);
        assert_eq!(lookup.resolve("RELIANCE"), PriceQuote::Resolved(2500.0));
        assert_eq!(lookup.resolve(" Reliance"), PriceQuote::Resolved(2500.0));
    }

    #[test]
    fn resolve_missing_is_unavailable() {
        let lookup = PriceLookup::new();
        assert_eq!(lookup.resolve("TCS"), PriceQuote::Unavailable);
        assert_eq!(lookup.resolve("TCS").price(), None);
    }

    #[test]
    fn explicit_unavailable_entry() {
        let mut lookup = PriceLookup::new();
        lookup.insert("TCS", PriceQuote::Unavailable);
        assert_eq!(lookup.len(), 1);
        assert!(!lookup.resolve("TCS").is_available());
    }

    #[test]
    fn from_hash_map_normalizes_keys() {
        let mut map = HashMap::new();
        map.insert("tcs ".to_string(), 3300.0);
        let lookup = PriceLookup::from(map);
        assert_eq!(lookup.resolve("TCS"), PriceQuote::Resolved(3300.0));
    }

    #[test]
    fn collect_from_pairs() {
        let lookup: PriceLookup = [("RELIANCE", 2500.0), ("TCS", 3300.0)]
            .into_iter()
            .collect();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.resolve("tcs").price(), Some(3300.0));
    }
}
