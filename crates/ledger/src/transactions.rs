//! Transaction primitives.
//!
//! A `Transaction` is a single recorded income or expense event. It is
//! created only through [`Ledger::add_transaction`], immutable afterwards,
//! and removed only by an explicit delete.
//!
//! [`Ledger::add_transaction`]: crate::Ledger::add_transaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, MoneyCents, categories};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub kind: TransactionKind,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Validates and builds a transaction.
    ///
    /// Invariants checked here and never re-validated afterwards:
    /// - `description` non-empty after trimming
    /// - `amount` strictly positive
    /// - `category` present in the registry for `kind`
    pub fn new(
        description: &str,
        amount: MoneyCents,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Self, LedgerError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::MissingFields);
        }
        if !amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount);
        }
        let category = categories::find_category(kind, category)
            .ok_or_else(|| LedgerError::UnknownCategory(category.to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            description: description.to_string(),
            amount,
            kind,
            category: category.id.to_string(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_description() {
        let err = Transaction::new("   ", MoneyCents::new(100), TransactionKind::Expense, "food")
            .unwrap_err();
        assert_eq!(err, LedgerError::MissingFields);
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for cents in [0, -1, -10_00] {
            let err = Transaction::new(
                "lunch",
                MoneyCents::new(cents),
                TransactionKind::Expense,
                "food",
            )
            .unwrap_err();
            assert_eq!(err, LedgerError::NonPositiveAmount);
        }
    }

    #[test]
    fn rejects_category_from_the_other_kind() {
        let err = Transaction::new(
            "lunch",
            MoneyCents::new(100),
            TransactionKind::Expense,
            "salary",
        )
        .unwrap_err();
        assert_eq!(err, LedgerError::UnknownCategory("salary".to_string()));
    }

    #[test]
    fn trims_description() {
        let tx = Transaction::new(
            "  lunch  ",
            MoneyCents::new(100),
            TransactionKind::Expense,
            "food",
        )
        .unwrap();
        assert_eq!(tx.description, "lunch");
    }

    #[test]
    fn ids_are_unique_even_in_the_same_instant() {
        let a = Transaction::new("a", MoneyCents::new(1), TransactionKind::Income, "salary")
            .unwrap();
        let b = Transaction::new("b", MoneyCents::new(1), TransactionKind::Income, "salary")
            .unwrap();
        assert_ne!(a.id, b.id);
    }
}
