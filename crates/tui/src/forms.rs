//! Input forms for the transactions section: add entry and savings goal.

use ledger::{Category, LedgerError, MoneyCents, TransactionKind, categories_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Amount,
    Description,
    Category,
}

#[derive(Debug)]
pub struct AddForm {
    pub kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub category_index: usize,
    pub focus: AddField,
    pub message: Option<String>,
}

impl AddForm {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            amount: String::new(),
            description: String::new(),
            category_index: 0,
            focus: AddField::Amount,
            message: None,
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        categories_for(self.kind)
    }

    pub fn category(&self) -> &'static Category {
        let categories = self.categories();
        &categories[self.category_index.min(categories.len() - 1)]
    }

    pub fn advance_focus(&mut self) {
        self.focus = match self.focus {
            AddField::Amount => AddField::Description,
            AddField::Description => AddField::Category,
            AddField::Category => AddField::Amount,
        };
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let len = self.categories().len();
        self.category_index = if forward {
            (self.category_index + 1) % len
        } else {
            (self.category_index + len - 1) % len
        };
    }

    pub fn push_char(&mut self, ch: char) {
        match self.focus {
            AddField::Amount => self.amount.push(ch),
            AddField::Description => self.description.push(ch),
            AddField::Category => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            AddField::Amount => {
                self.amount.pop();
            }
            AddField::Description => {
                self.description.pop();
            }
            AddField::Category => {}
        }
    }

    /// Validates the form into submit-ready values. Field contents are left
    /// untouched on error so the user can correct in place.
    pub fn parsed(&self) -> Result<(String, MoneyCents), String> {
        let description = self.description.trim();
        if description.is_empty() || self.amount.trim().is_empty() {
            return Err("Fill in description and amount.".to_string());
        }
        let amount = parse_amount(&self.amount)?;
        Ok((description.to_string(), amount))
    }
}

#[derive(Debug, Default)]
pub struct GoalForm {
    pub amount: String,
    pub message: Option<String>,
}

impl GoalForm {
    pub fn parsed(&self) -> Result<MoneyCents, String> {
        if self.amount.trim().is_empty() {
            return Err("Enter a target amount.".to_string());
        }
        parse_amount(&self.amount)
    }
}

/// Parses a user-typed amount into money, mapping errors to display text.
pub fn parse_amount(input: &str) -> Result<MoneyCents, String> {
    input
        .trim()
        .parse::<MoneyCents>()
        .map_err(|err| match err {
            LedgerError::InvalidAmount(raw) => format!("Invalid amount: {raw}"),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_requires_description_and_amount() {
        let mut form = AddForm::new(TransactionKind::Expense);
        assert!(form.parsed().is_err());

        form.amount = "12.50".to_string();
        assert!(form.parsed().is_err());

        form.description = "lunch".to_string();
        let (description, amount) = form.parsed().unwrap();
        assert_eq!(description, "lunch");
        assert_eq!(amount, MoneyCents::new(1250));
    }

    #[test]
    fn add_form_rejects_garbage_amount() {
        let mut form = AddForm::new(TransactionKind::Expense);
        form.description = "lunch".to_string();
        form.amount = "12.3.4".to_string();
        assert!(form.parsed().is_err());
    }

    #[test]
    fn category_cycling_wraps_both_ways() {
        let mut form = AddForm::new(TransactionKind::Expense);
        let len = form.categories().len();

        form.cycle_category(false);
        assert_eq!(form.category_index, len - 1);
        form.cycle_category(true);
        assert_eq!(form.category_index, 0);
    }

    #[test]
    fn focus_cycle_covers_all_fields() {
        let mut form = AddForm::new(TransactionKind::Income);
        assert_eq!(form.focus, AddField::Amount);
        form.advance_focus();
        assert_eq!(form.focus, AddField::Description);
        form.advance_focus();
        assert_eq!(form.focus, AddField::Category);
        form.advance_focus();
        assert_eq!(form.focus, AddField::Amount);
    }

    #[test]
    fn goal_form_parses_comma_decimals() {
        let form = GoalForm {
            amount: "5000,00".to_string(),
            message: None,
        };
        assert_eq!(form.parsed().unwrap(), MoneyCents::new(500_000));
    }
}
