use ledger::{Ledger, LedgerError, MoneyCents, Session, TransactionKind};

fn baht(value: i64) -> MoneyCents {
    MoneyCents::new(value * 100)
}

#[test]
fn totals_identity_holds_for_any_mix() {
    let mut ledger = Ledger::new();
    ledger
        .add_transaction("salary", baht(5000), TransactionKind::Income, "salary")
        .unwrap();
    ledger
        .add_transaction("groceries", baht(1200), TransactionKind::Expense, "food")
        .unwrap();
    ledger
        .add_transaction("bonus", baht(750), TransactionKind::Income, "bonus")
        .unwrap();
    ledger
        .add_transaction("taxi", baht(90), TransactionKind::Expense, "travel")
        .unwrap();

    let totals = ledger.aggregates().totals;
    assert_eq!(totals.income - totals.expense, totals.net);
    assert_eq!(totals.income, baht(5750));
    assert_eq!(totals.expense, baht(1290));
    assert_eq!(totals.net, baht(4460));
}

#[test]
fn invalid_adds_return_errors_and_change_nothing() {
    let mut ledger = Ledger::new();

    let err = ledger
        .add_transaction("", baht(100), TransactionKind::Expense, "food")
        .unwrap_err();
    assert_eq!(err, LedgerError::MissingFields);

    let err = ledger
        .add_transaction("lunch", MoneyCents::ZERO, TransactionKind::Expense, "food")
        .unwrap_err();
    assert_eq!(err, LedgerError::NonPositiveAmount);

    let err = ledger
        .add_transaction("lunch", baht(-5), TransactionKind::Expense, "food")
        .unwrap_err();
    assert_eq!(err, LedgerError::NonPositiveAmount);

    assert!(ledger.transactions().is_empty());
}

#[test]
fn delete_is_idempotent() {
    let mut ledger = Ledger::new();
    let id = ledger
        .add_transaction("lunch", baht(100), TransactionKind::Expense, "food")
        .unwrap()
        .id;

    ledger.delete_transaction(id);
    assert!(ledger.transactions().is_empty());

    // Second delete of the same id: no-op, no error.
    ledger.delete_transaction(id);
    assert!(ledger.transactions().is_empty());
}

#[test]
fn breakdown_totals_sum_to_total_expense() {
    let mut ledger = Ledger::new();
    ledger
        .add_transaction("lunch", baht(320), TransactionKind::Expense, "food")
        .unwrap();
    ledger
        .add_transaction("train", baht(45), TransactionKind::Expense, "travel")
        .unwrap();
    ledger
        .add_transaction("movie", baht(180), TransactionKind::Expense, "entertainment")
        .unwrap();
    ledger
        .add_transaction("dinner", baht(410), TransactionKind::Expense, "food")
        .unwrap();

    let aggregates = ledger.aggregates();
    let breakdown_sum: MoneyCents = aggregates
        .expense_breakdown
        .iter()
        .map(|entry| entry.total)
        .sum();
    assert_eq!(breakdown_sum, aggregates.totals.expense);
}

#[test]
fn totals_are_insertion_order_independent() {
    let entries = [
        ("salary", baht(5000), TransactionKind::Income, "salary"),
        ("lunch", baht(1200), TransactionKind::Expense, "food"),
        ("train", baht(300), TransactionKind::Expense, "travel"),
    ];

    let mut forward = Ledger::new();
    for (description, amount, kind, category) in entries {
        forward
            .add_transaction(description, amount, kind, category)
            .unwrap();
    }

    let mut reversed = Ledger::new();
    for (description, amount, kind, category) in entries.into_iter().rev() {
        reversed
            .add_transaction(description, amount, kind, category)
            .unwrap();
    }

    assert_eq!(forward.aggregates().totals, reversed.aggregates().totals);
    // Display order differs: newest first by insertion.
    assert_eq!(forward.transactions()[0].description, "train");
    assert_eq!(reversed.transactions()[0].description, "salary");
}

#[test]
fn sample_scenario_matches_expected_aggregates() {
    let mut ledger = Ledger::new();
    ledger
        .add_transaction("salary", baht(5000), TransactionKind::Income, "salary")
        .unwrap();
    ledger
        .add_transaction("groceries", baht(1200), TransactionKind::Expense, "food")
        .unwrap();
    ledger
        .add_transaction("bus pass", baht(300), TransactionKind::Expense, "travel")
        .unwrap();

    let aggregates = ledger.aggregates();
    assert_eq!(aggregates.totals.income, baht(5000));
    assert_eq!(aggregates.totals.expense, baht(1500));
    assert_eq!(aggregates.totals.net, baht(3500));

    let ids: Vec<(&str, MoneyCents)> = aggregates
        .expense_breakdown
        .iter()
        .map(|entry| (entry.category.id, entry.total))
        .collect();
    assert_eq!(ids, [("food", baht(1200)), ("travel", baht(300))]);
}

#[test]
fn negative_goal_is_rejected_and_previous_value_kept() {
    let mut ledger = Ledger::new();
    assert_eq!(ledger.goal().target, MoneyCents::ZERO);

    let parsed = "-100".parse::<MoneyCents>().unwrap();
    assert_eq!(ledger.set_savings_goal(parsed), Err(LedgerError::InvalidGoal));
    assert_eq!(ledger.goal().target, MoneyCents::ZERO);

    ledger.set_savings_goal(baht(5000)).unwrap();
    assert_eq!(ledger.set_savings_goal(MoneyCents::ZERO), Err(LedgerError::InvalidGoal));
    assert_eq!(ledger.goal().target, baht(5000));
}

#[test]
fn progress_scenarios() {
    let mut ledger = Ledger::new();
    ledger.set_savings_goal(baht(5000)).unwrap();
    ledger
        .add_transaction("salary", baht(3500), TransactionKind::Income, "salary")
        .unwrap();
    assert_eq!(ledger.aggregates().savings_progress_percent, Some(70.0));

    ledger
        .add_transaction("bonus", baht(2500), TransactionKind::Income, "bonus")
        .unwrap();
    // 6000 / 5000 clamps at 100.
    assert_eq!(ledger.aggregates().savings_progress_percent, Some(100.0));
}

#[test]
fn logout_then_login_keeps_transactions() {
    let mut ledger = Ledger::new();
    let mut session = Session::new();

    session.login("Alice").unwrap();
    ledger
        .add_transaction("salary", baht(5000), TransactionKind::Income, "salary")
        .unwrap();

    session.logout();
    session.login("Alice").unwrap();

    // Deliberate non-reset-on-logout policy.
    assert_eq!(ledger.transactions().len(), 1);
}
