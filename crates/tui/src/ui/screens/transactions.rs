use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use ledger::TransactionKind;

use crate::{
    app::{AppState, TransactionsMode},
    forms::{AddField, AddForm, GoalForm},
    ui::{
        components::{card::Card, money::styled_entry_amount},
        theme::{Theme, category_color},
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let form_height = match state.transactions.mode {
        TransactionsMode::List => 0,
        TransactionsMode::Add(_) => 8,
        TransactionsMode::Goal(_) => 6,
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(form_height)])
        .split(area);

    render_list(frame, layout[0], state, &theme);

    match &state.transactions.mode {
        TransactionsMode::List => {}
        TransactionsMode::Add(form) => render_add_form(frame, layout[1], form, &theme),
        TransactionsMode::Goal(form) => render_goal_form(frame, layout[1], form, &theme),
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let in_list = matches!(state.transactions.mode, TransactionsMode::List);
    let card = Card::new("Transactions", theme).focused(in_list);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let transactions = state.ledger.transactions();
    if transactions.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nothing recorded yet. Press a for an expense, i for income.",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let visible = inner.height as usize;
    let selected = state.transactions.selected.min(transactions.len() - 1);
    // Keep the selection in view.
    let offset = selected.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line<'_>> = transactions
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, tx)| {
            let marker = if i == selected { "▸ " } else { "  " };
            let mut amount = styled_entry_amount(tx.amount, tx.kind, theme);
            let category = ledger::find_category(tx.kind, &tx.category)
                .map(|c| (c.name, category_color(c.color)))
                .unwrap_or(("?", theme.dim));

            let mut style = Style::default();
            if i == selected {
                style = style.add_modifier(Modifier::BOLD);
                amount.style = amount.style.add_modifier(Modifier::BOLD);
            }

            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(theme.accent)),
                Span::styled(
                    tx.created_at.format("%Y-%m-%d ").to_string(),
                    style.fg(theme.dim),
                ),
                Span::styled(format!("{:<24} ", truncate(&tx.description, 24)), style.fg(theme.text)),
                Span::styled(format!("{:<14} ", category.0), style.fg(category.1)),
                amount,
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_add_form(frame: &mut Frame<'_>, area: Rect, form: &AddForm, theme: &Theme) {
    let title = match form.kind {
        TransactionKind::Expense => "add expense",
        TransactionKind::Income => "add income",
    };
    let card = Card::new(title, theme).focused(true);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Description
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Amount",
        &form.amount,
        form.focus == AddField::Amount,
        theme,
    );
    render_field(
        frame,
        rows[1],
        "What for",
        &form.description,
        form.focus == AddField::Description,
        theme,
    );

    let category = form.category();
    let category_style = if form.focus == AddField::Category {
        Style::default().fg(category_color(category.color)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(category_color(category.color))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Category  ", Style::default().fg(theme.dim)),
            Span::styled("◂ ", Style::default().fg(theme.accent)),
            Span::styled(category.name.to_string(), category_style),
            Span::styled(" ▸", Style::default().fg(theme.accent)),
        ])),
        rows[2],
    );

    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[4],
        );
    }
}

fn render_goal_form(frame: &mut Frame<'_>, area: Rect, form: &GoalForm, theme: &Theme) {
    let card = Card::new("savings goal", theme).focused(true);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Target
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
        ])
        .split(inner);

    render_field(frame, rows[0], "Target", &form.amount, true, theme);

    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[2],
        );
    }
}

fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{label:<9} "), Style::default().fg(theme.dim)),
            Span::styled(format!("{value}{cursor}"), value_style),
        ])),
        area,
    );
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
