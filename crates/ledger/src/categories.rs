//! Static category registry.
//!
//! Two disjoint ordered lists, one per transaction kind, fixed at process
//! start. The first entry of each list is the default selection for its kind.
//! Colors are abstract tokens; the presentation layer maps them to whatever
//! palette it has.

use crate::TransactionKind;

/// Abstract display color for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Rose,
    Orange,
    Pink,
    Yellow,
    Purple,
    Slate,
    Emerald,
    Teal,
    Cyan,
    Sky,
}

/// One named spending or income category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub color: ColorToken,
}

pub const EXPENSE_CATEGORIES: &[Category] = &[
    Category { id: "food", name: "Food & Drinks", color: ColorToken::Rose },
    Category { id: "travel", name: "Travel", color: ColorToken::Orange },
    Category { id: "shopping", name: "Shopping", color: ColorToken::Pink },
    Category { id: "bills", name: "Bills & Utilities", color: ColorToken::Yellow },
    Category { id: "entertainment", name: "Entertainment", color: ColorToken::Purple },
    Category { id: "others", name: "Others", color: ColorToken::Slate },
];

pub const INCOME_CATEGORIES: &[Category] = &[
    Category { id: "salary", name: "Salary", color: ColorToken::Emerald },
    Category { id: "bonus", name: "Bonus", color: ColorToken::Teal },
    Category { id: "investment", name: "Investment", color: ColorToken::Cyan },
    Category { id: "others", name: "Other Income", color: ColorToken::Sky },
];

/// Returns the registry for the given transaction kind.
#[must_use]
pub fn categories_for(kind: TransactionKind) -> &'static [Category] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Returns the default category for the given kind (first registry entry).
#[must_use]
pub fn default_category(kind: TransactionKind) -> &'static Category {
    &categories_for(kind)[0]
}

/// Looks up a category by id within the registry for `kind`.
#[must_use]
pub fn find_category(kind: TransactionKind, id: &str) -> Option<&'static Category> {
    categories_for(kind).iter().find(|category| category.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_are_disjoint_per_kind() {
        assert!(find_category(TransactionKind::Expense, "food").is_some());
        assert!(find_category(TransactionKind::Income, "food").is_none());
        assert!(find_category(TransactionKind::Income, "salary").is_some());
        assert!(find_category(TransactionKind::Expense, "salary").is_none());
    }

    #[test]
    fn others_exists_in_both_registries() {
        // Same id on both sides is fine: ids are scoped to their kind.
        assert!(find_category(TransactionKind::Expense, "others").is_some());
        assert!(find_category(TransactionKind::Income, "others").is_some());
    }

    #[test]
    fn defaults_are_first_entries() {
        assert_eq!(default_category(TransactionKind::Expense).id, "food");
        assert_eq!(default_category(TransactionKind::Income).id, "salary");
    }
}
