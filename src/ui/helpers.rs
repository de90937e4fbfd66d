use ratatui::style::Color;

use super::theme::Theme;
use crate::tracker::NoticeLevel;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

pub fn hex_to_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn hours_label(hours: f64) -> String {
    format!("{hours:.2}h")
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Theme::accent(),
        NoticeLevel::Success => Theme::success(),
        NoticeLevel::Warning => Theme::warn(),
        NoticeLevel::Error => Theme::error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_padded_or_trimmed() {
        assert_eq!(clamp_name("Work", 6), "Work  ");
        assert_eq!(clamp_name("Exercise", 6), "Exer..");
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(hex_to_color("#FF6B6B"), Some(Color::Rgb(0xFF, 0x6B, 0x6B)));
        assert_eq!(hex_to_color("4ECDC4"), Some(Color::Rgb(0x4E, 0xCD, 0xC4)));
        assert_eq!(hex_to_color("#FFF"), None);
        assert_eq!(hex_to_color("#ÿÿÿ"), None);
    }

    #[test]
    fn hours_label_keeps_two_decimals() {
        assert_eq!(hours_label(1.5), "1.50h");
        assert_eq!(hours_label(0.0), "0.00h");
    }
}
