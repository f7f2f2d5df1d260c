//! System-instruction assembly for grounded chat.

use ledger::LedgerSnapshot;

/// Builds the system instruction that grounds the assistant in the current
/// ledger: full transaction list as JSON, the net balance, and the savings
/// goal when one is set.
pub(crate) fn system_context(snapshot: &LedgerSnapshot) -> String {
    let transactions =
        serde_json::to_string(&snapshot.transactions).unwrap_or_else(|_| "[]".to_string());
    let goal = if snapshot.goal.is_set() {
        format!(
            "Savings Goal: {} (target {})\n",
            snapshot.goal.name, snapshot.goal.target
        )
    } else {
        String::new()
    };
    format!(
        "You are a financial assistant for an app called \"Gruzzolo\".\n\
         Current User Data:\n\
         Transactions: {transactions}\n\
         Total Balance: {balance}\n\
         {goal}\n\
         Answer user queries professionally and helpfully.",
        balance = snapshot.net_balance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::{Ledger, MoneyCents, TransactionKind};

    #[test]
    fn context_carries_transactions_and_balance() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("salary", MoneyCents::new(500_000), TransactionKind::Income, "salary")
            .unwrap();
        ledger
            .add_transaction("lunch", MoneyCents::new(12_000), TransactionKind::Expense, "food")
            .unwrap();

        let context = system_context(&ledger.snapshot());
        assert!(context.contains("\"salary\""));
        assert!(context.contains("\"lunch\""));
        assert!(context.contains("฿4880.00"));
    }

    #[test]
    fn empty_ledger_still_produces_valid_context() {
        let context = system_context(&Ledger::new().snapshot());
        assert!(context.contains("Transactions: []"));
        assert!(context.contains("฿0.00"));
        assert!(!context.contains("Savings Goal"));
    }

    #[test]
    fn context_includes_goal_only_when_set() {
        let mut ledger = Ledger::new();
        ledger.set_savings_goal(MoneyCents::new(500_000)).unwrap();

        let context = system_context(&ledger.snapshot());
        assert!(context.contains("Savings Goal: My savings (target ฿5000.00)"));
    }
}
