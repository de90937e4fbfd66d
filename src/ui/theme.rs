use ratatui::style::Color;

/// Unified color theme for the widget
pub struct Theme;

impl Theme {
    /// Primary branding color
    pub fn primary() -> Color {
        Color::Magenta
    }

    /// Borders and section titles
    pub fn secondary() -> Color {
        Color::Cyan
    }

    pub fn success() -> Color {
        Color::Green
    }

    /// Running timer
    pub fn active() -> Color {
        Color::LightGreen
    }

    pub fn warn() -> Color {
        Color::Yellow
    }

    pub fn error() -> Color {
        Color::LightRed
    }

    /// Selection/highlight
    pub fn highlight() -> Color {
        Color::Cyan
    }

    /// Pane with keyboard focus
    pub fn focused() -> Color {
        Color::LightMagenta
    }

    /// Dimmed/inactive text
    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    /// Accent for numbers/durations
    pub fn accent() -> Color {
        Color::LightBlue
    }
}
