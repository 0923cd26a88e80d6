//! A single portfolio line.

use std::fmt;
use std::str::FromStr;

use super::amount::Amount;

/// Trim and upper-case a ticker so lookups are case-insensitive.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub ticker: String,
    pub quantity: Amount,
    pub buy_price: Amount,
}

impl Holding {
    /// Build a holding from user input. The ticker is normalized.
    pub fn from_input(ticker: &str, quantity: &str, buy_price: &str) -> Self {
        Holding {
            ticker: normalize_ticker(ticker),
            quantity: Amount::parse(quantity),
            buy_price: Amount::parse(buy_price),
        }
    }

    pub fn new(ticker: &str, quantity: f64, buy_price: f64) -> Self {
        Holding {
            ticker: normalize_ticker(ticker),
            quantity: Amount::from(quantity),
            buy_price: Amount::from(buy_price),
        }
    }

    pub fn invested(&self) -> f64 {
        self.quantity.value() * self.buy_price.value()
    }

    pub fn field_mut(&mut self, field: HoldingField) -> &mut Amount {
        match field {
            HoldingField::Quantity => &mut self.quantity,
            HoldingField::BuyPrice => &mut self.buy_price,
        }
    }
}

/// An editable numeric field of a [`Holding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingField {
    Quantity,
    BuyPrice,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown holding field: {0} (expected quantity or buy_price)")]
pub struct UnknownField(pub String);

impl FromStr for HoldingField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quantity" | "qty" => Ok(HoldingField::Quantity),
            "buy_price" | "buyprice" | "buy-price" | "price" => Ok(HoldingField::BuyPrice),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for HoldingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldingField::Quantity => write!(f, "quantity"),
            HoldingField::BuyPrice => write!(f, "buy_price"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_ticker("  reliance "), "RELIANCE");
        assert_eq!(normalize_ticker("Tcs"), "TCS");
        assert_eq!(normalize_ticker("   "), "");
    }

    #[test]
    fn from_input_parses_fields() {
        let h = Holding::from_input("infy", "12", "1450.5");
        assert_eq!(h.ticker, "INFY");
        assert_eq!(h.quantity, Amount::Parsed(12.0));
        assert_eq!(h.buy_price, Amount::Parsed(1450.5));
    }

    #[test]
    fn from_input_keeps_bad_fields_raw() {
        let h = Holding::from_input("INFY", "a dozen", "");
        assert_eq!(h.quantity, Amount::Unparsed("a dozen".into()));
        assert_eq!(h.buy_price, Amount::Unparsed(String::new()));
        assert_eq!(h.invested(), 0.0);
    }

    #[test]
    fn invested_multiplies_quantity_by_price() {
        let h = Holding::new("RELIANCE", 10.0, 2400.0);
        assert_eq!(h.invested(), 24000.0);
    }

    #[test]
    fn field_mut_selects_field() {
        let mut h = Holding::new("TCS", 5.0, 3400.0);
        *h.field_mut(HoldingField::Quantity) = Amount::Parsed(6.0);
        *h.field_mut(HoldingField::BuyPrice) = Amount::Parsed(3300.0);
        assert_eq!(h.quantity, Amount::Parsed(6.0));
        assert_eq!(h.buy_price, Amount::Parsed(3300.0));
    }

    #[test]
    fn parse_field_names() {
        assert_eq!("quantity".parse::<HoldingField>(), Ok(HoldingField::Quantity));
        assert_eq!("QTY".parse::<HoldingField>(), Ok(HoldingField::Quantity));
        assert_eq!("buy_price".parse::<HoldingField>(), Ok(HoldingField::BuyPrice));
        assert_eq!("buyPrice".parse::<HoldingField>(), Ok(HoldingField::BuyPrice));
        assert_eq!(
            "ticker".parse::<HoldingField>(),
            Err(UnknownField("ticker".into()))
        );
    }

    #[test]
    fn field_display() {
        assert_eq!(HoldingField::Quantity.to_string(), "quantity");
        assert_eq!(HoldingField::BuyPrice.to_string(), "buy_price");
    }
}
