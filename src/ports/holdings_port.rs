//! Holdings storage port trait.

use crate::domain::error::FolioError;
use crate::domain::portfolio::Portfolio;

pub trait HoldingsPort {
    fn load(&self) -> Result<Portfolio, FolioError>;

    fn save(&self, portfolio: &Portfolio) -> Result<(), FolioError>;
}
