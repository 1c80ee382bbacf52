//! Colour themes

mod deep_space;
mod tokyo_night;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A color theme for the lesson screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub badge: Color,
}

impl Theme {
    /// Names accepted by [`Theme::by_name`]
    pub const NAMES: &'static [&'static str] = &["Deep Space", "Tokyo Night"];

    /// Look up a built-in theme, case-insensitively
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "deep space" | "deep-space" => Some(Self::deep_space()),
            "tokyo night" | "tokyo-night" => Some(Self::tokyo_night()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::deep_space()
    }
}
