//! Free-form numeric input for holding fields.

use std::fmt;

/// A number typed in by the user.
///
/// Input that does not parse to a finite number is kept verbatim as
/// `Unparsed` so it can be shown and corrected later. It counts as zero
/// in arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Parsed(f64),
    Unparsed(String),
}

impl Amount {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Amount::Parsed(v),
            _ => Amount::Unparsed(trimmed.to_string()),
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Amount::Parsed(v) => *v,
            Amount::Unparsed(_) => 0.0,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Amount::Parsed(_))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Amount::Parsed(value)
        } else {
            Amount::Unparsed(value.to_string())
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Parsed(v) => write!(f, "{}", v),
            Amount::Unparsed(raw) => write!(f, "{}", raw),
        }
    }
}
