//! Portfolio state: an insertion-ordered list of holdings.

use super::amount::Amount;
use super::holding::{normalize_ticker, Holding, HoldingField};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio {
            holdings: Vec::new(),
        }
    }

    /// Add a holding from free-form user input.
    ///
    /// Returns `false` and leaves the portfolio untouched when the ticker is
    /// empty or already held. Duplicates are never merged.
    pub fn add_holding(&mut self, ticker: &str, quantity: &str, buy_price: &str) -> bool {
        self.insert(Holding::from_input(ticker, quantity, buy_price))
    }

    /// Insert a prepared holding under the same rules as [`Portfolio::add_holding`].
    pub fn insert(&mut self, mut holding: Holding) -> bool {
        holding.ticker = normalize_ticker(&holding.ticker);
        if holding.ticker.is_empty() || self.has_holding(&holding.ticker) {
            return false;
        }
        self.holdings.push(holding);
        true
    }

    /// Replace one numeric field of the holding for `ticker`.
    ///
    /// Returns `false` if no such holding exists.
    pub fn update_holding(&mut self, ticker: &str, field: HoldingField, value: &str) -> bool {
        let ticker = normalize_ticker(ticker);
        match self.holdings.iter_mut().find(|h| h.ticker == ticker) {
            Some(holding) => {
                *holding.field_mut(field) = Amount::parse(value);
                true
            }
            None => false,
        }
    }

    pub fn remove_holding(&mut self, ticker: &str) -> Option<Holding> {
        let ticker = normalize_ticker(ticker);
        let idx = self.holdings.iter().position(|h| h.ticker == ticker)?;
        Some(self.holdings.remove(idx))
    }

    pub fn get_holding(&self, ticker: &str) -> Option<&Holding> {
        let ticker = normalize_ticker(ticker);
        self.holdings.iter().find(|h| h.ticker == ticker)
    }

    pub fn has_holding(&self, ticker: &str) -> bool {
        self.get_holding(ticker).is_some()
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn tickers(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.ticker.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

impl FromIterator<Holding> for Portfolio {
    fn from_iter<I: IntoIterator<Item = Holding>>(iter: I) -> Self {
        let mut portfolio = Portfolio::new();
        for holding in iter {
            portfolio.insert(holding);
        }
        portfolio
    }
}
