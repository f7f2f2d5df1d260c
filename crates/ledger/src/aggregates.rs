//! Derived aggregates.
//!
//! Everything here is a pure function of the current transaction sequence.
//! Nothing is cached or stored, so the values can never go stale.

use crate::{Category, MoneyCents, SavingsGoal, Transaction, TransactionKind, categories};

/// Income/expense totals and the resulting net balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub income: MoneyCents,
    pub expense: MoneyCents,
    /// `income - expense`; may be negative.
    pub net: MoneyCents,
}

/// Sum of expense amounts for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: &'static Category,
    pub total: MoneyCents,
}

/// All aggregates derived from one ledger read.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub totals: Totals,
    /// Per-category expense sums, sorted by total descending. Ties keep the
    /// order in which the categories were first encountered while grouping.
    pub expense_breakdown: Vec<CategoryTotal>,
    /// `min(net / target * 100, 100)` when a goal is set; `None` otherwise.
    ///
    /// Clamped above only: a negative balance yields a negative percentage.
    pub savings_progress_percent: Option<f64>,
}

pub(crate) fn compute(transactions: &[Transaction], goal: &SavingsGoal) -> Aggregates {
    let totals = compute_totals(transactions);
    Aggregates {
        totals,
        expense_breakdown: expense_breakdown(transactions),
        savings_progress_percent: savings_progress_percent(totals.net, goal.target),
    }
}

fn compute_totals(transactions: &[Transaction]) -> Totals {
    let income: MoneyCents = transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Income)
        .map(|tx| tx.amount)
        .sum();
    let expense: MoneyCents = transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
        .map(|tx| tx.amount)
        .sum();
    Totals {
        income,
        expense,
        net: income - expense,
    }
}

fn expense_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    // Group in stored (newest-first) order so tie order is deterministic,
    // then sort on total only; the sort is stable.
    let mut breakdown: Vec<CategoryTotal> = Vec::new();
    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        match breakdown
            .iter_mut()
            .find(|entry| entry.category.id == tx.category)
        {
            Some(entry) => entry.total += tx.amount,
            None => {
                let Some(category) =
                    categories::find_category(TransactionKind::Expense, &tx.category)
                else {
                    // Unreachable: membership is enforced at creation.
                    continue;
                };
                breakdown.push(CategoryTotal {
                    category,
                    total: tx.amount,
                });
            }
        }
    }
    breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    breakdown
}

fn savings_progress_percent(net: MoneyCents, target: MoneyCents) -> Option<f64> {
    if !target.is_positive() {
        return None;
    }
    let percent = net.cents() as f64 / target.cents() as f64 * 100.0;
    Some(percent.min(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TransactionKind, category: &str, cents: i64) -> Transaction {
        Transaction::new("test", MoneyCents::new(cents), kind, category).unwrap()
    }

    #[test]
    fn breakdown_ties_keep_first_appearance_order() {
        // Stored newest-first; "travel" appears before "food" in traversal.
        let transactions = vec![
            tx(TransactionKind::Expense, "travel", 500_00),
            tx(TransactionKind::Expense, "food", 500_00),
        ];
        let breakdown = expense_breakdown(&transactions);
        assert_eq!(breakdown[0].category.id, "travel");
        assert_eq!(breakdown[1].category.id, "food");
    }

    #[test]
    fn breakdown_sums_per_category_and_sorts_descending() {
        let transactions = vec![
            tx(TransactionKind::Expense, "food", 200_00),
            tx(TransactionKind::Expense, "travel", 900_00),
            tx(TransactionKind::Expense, "food", 300_00),
            tx(TransactionKind::Income, "salary", 5000_00),
        ];
        let breakdown = expense_breakdown(&transactions);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category.id, "travel");
        assert_eq!(breakdown[0].total, MoneyCents::new(900_00));
        assert_eq!(breakdown[1].category.id, "food");
        assert_eq!(breakdown[1].total, MoneyCents::new(500_00));
    }

    #[test]
    fn progress_is_none_without_a_goal() {
        assert_eq!(
            savings_progress_percent(MoneyCents::new(100), MoneyCents::ZERO),
            None
        );
    }

    #[test]
    fn progress_clamps_above_but_not_below() {
        let target = MoneyCents::new(5000_00);
        assert_eq!(
            savings_progress_percent(MoneyCents::new(6000_00), target),
            Some(100.0)
        );
        assert_eq!(
            savings_progress_percent(MoneyCents::new(-2500_00), target),
            Some(-50.0)
        );
    }
}
