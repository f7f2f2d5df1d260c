pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use ledger::Screen;

use crate::app::{AppState, Section, TransactionsMode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.session.active_screen() {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Dashboard => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let content = layout[2];
    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, content, state),
        Section::Transactions => screens::transactions::render(frame, content, state),
        Section::Chat => screens::chat::render(frame, content, state),
        Section::Image => screens::image::render(frame, content, state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.session.display_name();
    let goal = state.ledger.goal();
    let goal_text = if goal.is_set() {
        goal.target.to_string()
    } else {
        "-".to_string()
    };

    let line = Line::from(vec![
        Span::styled("Gruzzolo", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("User", Style::default().fg(theme.dim)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Goal", Style::default().fg(theme.dim)),
        Span::raw(format!(": {goal_text}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("L", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" logout  "));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if !matches!(state.transactions.mode, TransactionsMode::List) {
        return vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("←/→", Style::default().fg(theme.accent)),
            Span::raw(" category  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ];
    }

    match state.section {
        Section::Dashboard => vec![
            Span::styled("t", Style::default().fg(theme.accent)),
            Span::raw(" transactions  "),
            Span::styled("g", Style::default().fg(theme.accent)),
            Span::raw(" goal"),
        ],
        Section::Transactions => vec![
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" expense  "),
            Span::styled("i", Style::default().fg(theme.accent)),
            Span::raw(" income  "),
            Span::styled("g", Style::default().fg(theme.accent)),
            Span::raw(" goal  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" delete  "),
            Span::styled("j/k", Style::default().fg(theme.accent)),
            Span::raw(" move"),
        ],
        Section::Chat => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" send  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" back"),
        ],
        Section::Image => vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" size  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" generate  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" back"),
        ],
    }
}
