//! The module contains the errors the ledger can throw.
//!
//! All variants are validation errors: they are returned before any state is
//! mutated, so a caller can surface the message and retry with corrected
//! input.

use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// Description or amount missing from an add-transaction request.
    #[error("Missing description or amount")]
    MissingFields,
    /// Amount parsed but is not strictly greater than zero.
    #[error("Amount must exceed zero")]
    NonPositiveAmount,
    /// Amount string did not parse as money.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    /// Category id is not part of the registry for the transaction kind.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),
    /// Savings goal target must be strictly greater than zero.
    #[error("Goal target must exceed zero")]
    InvalidGoal,
    /// Display name is empty or whitespace-only.
    #[error("Display name must not be empty")]
    EmptyName,
}
