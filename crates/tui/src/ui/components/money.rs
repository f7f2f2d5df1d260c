use ledger::{MoneyCents, TransactionKind};
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A ledger-entry amount span: income green with `+`, expense red with `-`.
///
/// Amounts are stored positive; the sign comes from the kind.
#[must_use]
pub fn styled_entry_amount(
    amount: MoneyCents,
    kind: TransactionKind,
    theme: &Theme,
) -> Span<'static> {
    let (sign, color) = match kind {
        TransactionKind::Income => ("+", theme.positive),
        TransactionKind::Expense => ("-", theme.negative),
    };
    Span::styled(format!("{sign}{amount}"), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_follows_kind() {
        let theme = Theme::default();
        let amount = MoneyCents::new(123_45);
        let income = styled_entry_amount(amount, TransactionKind::Income, &theme);
        let expense = styled_entry_amount(amount, TransactionKind::Expense, &theme);
        assert_eq!(income.content, "+฿123.45");
        assert_eq!(expense.content, "-฿123.45");
    }
}
