use ledger::ColorToken;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(80, 180, 120),
            negative: Color::Rgb(200, 80, 80),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

/// Terminal color for a category's palette token.
pub fn category_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Rose => Color::Rgb(244, 63, 94),
        ColorToken::Orange => Color::Rgb(249, 115, 22),
        ColorToken::Pink => Color::Rgb(236, 72, 153),
        ColorToken::Yellow => Color::Rgb(234, 179, 8),
        ColorToken::Purple => Color::Rgb(168, 85, 247),
        ColorToken::Slate => Color::Rgb(100, 116, 139),
        ColorToken::Emerald => Color::Rgb(16, 185, 129),
        ColorToken::Teal => Color::Rgb(20, 184, 166),
        ColorToken::Cyan => Color::Rgb(6, 182, 212),
        ColorToken::Sky => Color::Rgb(14, 165, 233),
    }
}
