//! Render style configuration for terminal output.

use crossterm::style::Color;

/// Render style configuration.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub title_color: Color,
    pub label_color: Color,
    pub sentinel_color: Color,
    pub error_color: Color,
    pub item_color: Color,
    pub signal_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            title_color: Color::Cyan,
            label_color: Color::White,
            sentinel_color: Color::DarkGrey,
            error_color: Color::Red,
            item_color: Color::Green,
            signal_color: Color::Yellow,
        }
    }
}
