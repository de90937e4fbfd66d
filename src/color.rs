/// Color utilities for the category chart.

/// Default chart palette, assigned to categories by position.
pub const CHART_PALETTE: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98FB98", "#ADD8E6", "#FFD700", "#DA70D6",
    "#32CD32", "#6A5ACD", "#FFC0CB", "#F0E68C",
];

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn default_palette() -> Vec<String> {
    CHART_PALETTE.iter().map(|color| color.to_string()).collect()
}

/// Color for the category at `index`, cycling once the palette runs out.
/// An empty palette falls back to the first default color.
pub fn palette_color(palette: &[String], index: usize) -> &str {
    if palette.is_empty() {
        return CHART_PALETTE[0];
    }
    &palette[index % palette.len()]
}
