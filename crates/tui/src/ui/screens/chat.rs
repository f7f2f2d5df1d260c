use gateway::ChatRole;
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
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    render_history(frame, layout[0], state, &theme);
    render_input(frame, layout[1], state, &theme);
}

fn render_history(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Assistant", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut lines: Vec<Line<'_>> = Vec::new();
    for turn in &state.chat.turns {
        let (label, color) = match turn.role {
            ChatRole::User => ("you", theme.accent),
            ChatRole::Model => ("ai", theme.positive),
        };
        let text = if turn.text.is_empty() && state.chat.busy {
            "…"
        } else {
            turn.text.as_str()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{label:>3}  "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(text.to_string(), Style::default().fg(theme.text)),
        ]));
        lines.push(Line::default());
    }

    // Pin the tail of the conversation into view.
    let height = inner.height as usize;
    let scroll = lines.len().saturating_sub(height) as u16;

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}

fn render_input(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.chat.busy {
        "message (waiting for reply)"
    } else {
        "message"
    };
    let card = Card::new(title, theme).focused(!state.chat.busy);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let cursor = if state.chat.busy { "" } else { "│" };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}{cursor}", state.chat.input),
            Style::default().fg(theme.text),
        )),
        inner,
    );
}
