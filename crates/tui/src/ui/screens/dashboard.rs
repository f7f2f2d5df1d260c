use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use ledger::{Aggregates, MoneyCents};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, percentage_bar},
        },
        theme::{Theme, category_color},
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let aggregates = state.ledger.aggregates();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Headline stats
            Constraint::Length(5), // Savings goal
            Constraint::Min(5),    // Expense breakdown
        ])
        .split(area);

    render_stats(frame, layout[0], &aggregates, &theme);
    render_goal(frame, layout[1], state, &aggregates, &theme);
    render_breakdown(frame, layout[2], &aggregates, &theme);
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, aggregates: &Aggregates, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let net = aggregates.totals.net;
    let (net_color, status) = if net.is_positive() {
        (theme.positive, "surplus")
    } else if net.is_negative() {
        (theme.negative, "deficit")
    } else {
        (theme.text, "balanced")
    };
    StatCard::new("Net Balance", net.to_string(), theme)
        .value_style(Style::default().fg(net_color))
        .subtitle(status)
        .render(frame, cols[0]);

    StatCard::new("Total Income", format!("+{}", aggregates.totals.income), theme)
        .value_style(Style::default().fg(theme.positive))
        .render(frame, cols[1]);

    StatCard::new("Total Expense", format!("-{}", aggregates.totals.expense), theme)
        .value_style(Style::default().fg(theme.negative))
        .render(frame, cols[2]);
}

fn render_goal(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    aggregates: &Aggregates,
    theme: &Theme,
) {
    let goal = state.ledger.goal();
    let card = Card::new(&goal.name, theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let lines = match aggregates.savings_progress_percent {
        None => vec![
            Line::from(Span::styled(
                "No goal set.",
                Style::default().fg(theme.dim),
            )),
            Line::from(Span::styled(
                "Press g to set a target.",
                Style::default().fg(theme.dim),
            )),
        ],
        Some(percent) => {
            let bar_width = (inner.width as usize).saturating_sub(6).max(10);
            let bar = percentage_bar(percent, bar_width);
            let bar_color = if percent >= 100.0 {
                theme.positive
            } else if percent < 0.0 {
                theme.negative
            } else {
                theme.accent
            };

            let remaining = goal.target - aggregates.totals.net;
            let detail = if percent >= 100.0 {
                format!("Goal of {} reached!", goal.target)
            } else {
                format!("{remaining} to go (target {})", goal.target)
            };

            vec![
                Line::from(Span::styled(bar, Style::default().fg(bar_color))),
                Line::from(Span::styled(detail, Style::default().fg(theme.dim))),
            ]
        }
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_breakdown(frame: &mut Frame<'_>, area: Rect, aggregates: &Aggregates, theme: &Theme) {
    let card = Card::new("Expenses by Category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if aggregates.expense_breakdown.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expenses recorded yet.",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let max = aggregates
        .expense_breakdown
        .first()
        .map(|entry| entry.total)
        .unwrap_or(MoneyCents::ZERO);

    let name_width = aggregates
        .expense_breakdown
        .iter()
        .map(|entry| entry.category.name.len())
        .max()
        .unwrap_or(0);
    let bar_width = (inner.width as usize)
        .saturating_sub(name_width + 16)
        .clamp(8, 30);

    let lines: Vec<Line<'_>> = aggregates
        .expense_breakdown
        .iter()
        .map(|entry| {
            let bar = ascii_bar(entry.total.cents() as u64, max.cents() as u64, bar_width);
            Line::from(vec![
                Span::styled(
                    format!("{:<name_width$} ", entry.category.name),
                    Style::default().fg(category_color(entry.category.color)),
                ),
                Span::styled(bar, Style::default().fg(category_color(entry.category.color))),
                Span::styled(
                    format!(" {}", entry.total),
                    Style::default().fg(theme.text),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
