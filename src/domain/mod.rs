//! Core domain types and logic.

pub mod amount;
pub mod holding;
pub mod portfolio;
pub mod price;
pub mod valuation;
pub mod config_validation;
pub mod error;
