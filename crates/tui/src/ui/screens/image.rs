use gateway::SizeTier;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{app::AppState, ui::components::card::Card, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Prompt
            Constraint::Length(1), // Size selector
            Constraint::Min(3),    // Status
        ])
        .split(area);

    render_prompt(frame, layout[0], state, &theme);
    render_size(frame, layout[1], state, &theme);
    render_status(frame, layout[2], state, &theme);
}

fn render_prompt(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.image.busy {
        "prompt (generating)"
    } else {
        "prompt"
    };
    let card = Card::new(title, theme).focused(!state.image.busy);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let cursor = if state.image.busy { "" } else { "│" };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}{cursor}", state.image.prompt),
            Style::default().fg(theme.text),
        )),
        inner,
    );
}

fn render_size(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::styled(" Size  ", Style::default().fg(theme.dim))];
    for (i, tier) in [SizeTier::OneK, SizeTier::TwoK, SizeTier::FourK]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        if tier == state.image.size {
            spans.push(Span::styled(
                format!("[{}]", tier.as_str()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                tier.as_str().to_string(),
                Style::default().fg(theme.dim),
            ));
        }
    }
    spans.push(Span::styled(
        "   Tab to change",
        Style::default().fg(theme.dim),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(status) = &state.image.status else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " Describe your savings goal and press Enter.",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    };

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {status}"),
            Style::default().fg(theme.text),
        ))
        .wrap(Wrap { trim: false }),
        area,
    );
}
