#![allow(dead_code)]

use std::cell::RefCell;

use stockfolio::domain::error::FolioError;
use stockfolio::domain::portfolio::Portfolio;
use stockfolio::domain::price::PriceLookup;
use stockfolio::ports::holdings_port::HoldingsPort;
use stockfolio::ports::price_port::PricePort;

pub struct MockHoldingsPort {
    pub portfolio: RefCell<Portfolio>,
    pub saves: RefCell<usize>,
    pub error: Option<String>,
}

impl MockHoldingsPort {
    pub fn new(portfolio: Portfolio) -> Self {
        Self {
            portfolio: RefCell::new(portfolio),
            saves: RefCell::new(0),
            error: None,
        }
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl HoldingsPort for MockHoldingsPort {
    fn load(&self) -> Result<Portfolio, FolioError> {
        if let Some(reason) = &self.error {
            return Err(FolioError::Holdings {
                reason: reason.clone(),
            });
        }
        Ok(self.portfolio.borrow().clone())
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), FolioError> {
        *self.portfolio.borrow_mut() = portfolio.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

pub struct MockPricePort {
    pub prices: PriceLookup,
    pub error: Option<String>,
}

impl MockPricePort {
    pub fn new(prices: PriceLookup) -> Self {
        Self {
            prices,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            prices: PriceLookup::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl PricePort for MockPricePort {
    fn snapshot(&self) -> Result<PriceLookup, FolioError> {
        match &self.error {
            Some(reason) => Err(FolioError::PriceSource {
                reason: reason.clone(),
            }),
            None => Ok(self.prices.clone()),
        }
    }
}

/// RELIANCE 10 @ 2400, TCS 5 @ 3400.
pub fn nse_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new();
    portfolio.add_holding("RELIANCE", "10", "2400");
    portfolio.add_holding("TCS", "5", "3400");
    portfolio
}

pub fn nse_prices() -> PriceLookup {
    PriceLookup::new()
        .with_price("RELIANCE", 2500.0)
        .with_price("TCS", 3300.0)
}
