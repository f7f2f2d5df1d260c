//! In-memory personal-finance ledger.
//!
//! The [`Ledger`] owns the ordered transaction sequence (newest first) and
//! the single savings goal; [`Session`] tracks the display name and active
//! screen. Aggregates are recomputed on every read. Nothing is persisted;
//! state lives only for the lifetime of the process.

use serde::Serialize;
use uuid::Uuid;

pub use aggregates::{Aggregates, CategoryTotal, Totals};
pub use categories::{
    Category, ColorToken, EXPENSE_CATEGORIES, INCOME_CATEGORIES, categories_for, default_category,
    find_category,
};
pub use error::LedgerError;
pub use goal::SavingsGoal;
pub use money::MoneyCents;
pub use session::{Screen, Session};
pub use transactions::{Transaction, TransactionKind};

mod aggregates;
mod categories;
mod error;
mod goal;
mod money;
mod session;
mod transactions;

type ResultLedger<T> = Result<T, LedgerError>;

/// Owner of all transaction records and the savings goal.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Newest first: additions are prepended. Ordering is purely
    /// insertion-derived; nothing sorts on `created_at`.
    transactions: Vec<Transaction>,
    goal: SavingsGoal,
}

/// Point-in-time copy of the ledger used to ground an AI Gateway call.
///
/// Taken at call time; later ledger mutations do not affect an in-flight
/// request.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    pub transactions: Vec<Transaction>,
    pub net_balance: MoneyCents,
    pub goal: SavingsGoal,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions, newest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn goal(&self) -> &SavingsGoal {
        &self.goal
    }

    /// Validates and records a new transaction, prepending it to the
    /// sequence, and returns the created record.
    ///
    /// On a validation error nothing changes; the caller keeps its input and
    /// may retry.
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: MoneyCents,
        kind: TransactionKind,
        category: &str,
    ) -> ResultLedger<&Transaction> {
        let tx = Transaction::new(description, amount, kind, category)?;
        self.transactions.insert(0, tx);
        Ok(&self.transactions[0])
    }

    /// Removes the transaction with the given id.
    ///
    /// Idempotent: an absent id is a no-op, not an error.
    pub fn delete_transaction(&mut self, id: Uuid) {
        self.transactions.retain(|tx| tx.id != id);
    }

    /// Updates the savings-goal target.
    ///
    /// A non-positive target is rejected and the previous goal stays in
    /// place.
    pub fn set_savings_goal(&mut self, target: MoneyCents) -> ResultLedger<()> {
        if !target.is_positive() {
            return Err(LedgerError::InvalidGoal);
        }
        self.goal.target = target;
        Ok(())
    }

    /// Recomputes all derived aggregates from the current transaction set.
    #[must_use]
    pub fn aggregates(&self) -> Aggregates {
        aggregates::compute(&self.transactions, &self.goal)
    }

    /// Snapshot for the AI Gateway: full transaction list plus the computed
    /// net balance.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            transactions: self.transactions.clone(),
            net_balance: self.aggregates().totals.net,
            goal: self.goal.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends_newest_first() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("first", MoneyCents::new(100), TransactionKind::Expense, "food")
            .unwrap();
        ledger
            .add_transaction("second", MoneyCents::new(200), TransactionKind::Expense, "food")
            .unwrap();
        let descriptions: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|tx| tx.description.as_str())
            .collect();
        assert_eq!(descriptions, ["second", "first"]);
    }

    #[test]
    fn failed_add_leaves_sequence_untouched() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("lunch", MoneyCents::new(100), TransactionKind::Expense, "food")
            .unwrap();
        assert!(
            ledger
                .add_transaction("", MoneyCents::new(100), TransactionKind::Expense, "food")
                .is_err()
        );
        assert!(
            ledger
                .add_transaction("x", MoneyCents::ZERO, TransactionKind::Expense, "food")
                .is_err()
        );
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutations() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("lunch", MoneyCents::new(100), TransactionKind::Expense, "food")
            .unwrap();
        let snapshot = ledger.snapshot();
        ledger
            .add_transaction("dinner", MoneyCents::new(200), TransactionKind::Expense, "food")
            .unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.net_balance, MoneyCents::new(-100));
    }
}
