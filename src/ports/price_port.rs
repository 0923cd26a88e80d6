//! Price source port trait.

use crate::domain::error::FolioError;
use crate::domain::price::PriceLookup;

/// Supplies a snapshot of current prices.
///
/// Each call returns an independent snapshot; valuation never caches it.
pub trait PricePort {
    fn snapshot(&self) -> Result<PriceLookup, FolioError>;
}
