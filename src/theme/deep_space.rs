//! Deep Space theme: indigo and purple night sky with bright accents

use ratatui::style::Color;

use super::Theme;

impl Theme {
    pub fn deep_space() -> Self {
        Theme {
            name: "Deep Space".to_string(),

            bg_primary: Color::Rgb(30, 27, 75),    // #1e1b4b
            bg_secondary: Color::Rgb(49, 46, 129), // #312e81
            bg_tertiary: Color::Rgb(88, 28, 135),  // #581c87

            fg_primary: Color::Rgb(229, 231, 235),   // #e5e7eb
            fg_secondary: Color::Rgb(243, 244, 246), // #f3f4f6
            fg_muted: Color::Rgb(156, 163, 175),     // #9ca3af

            accent_primary: Color::Rgb(96, 165, 250),   // #60a5fa
            accent_secondary: Color::Rgb(147, 51, 234), // #9333ea

            success: Color::Rgb(74, 222, 128), // #4ade80
            warning: Color::Rgb(250, 204, 21), // #facc15
            error: Color::Rgb(248, 113, 113),  // #f87171
            info: Color::Rgb(147, 197, 253),   // #93c5fd

            border: Color::Rgb(99, 102, 241),         // #6366f1
            border_focused: Color::Rgb(96, 165, 250), // #60a5fa
            selection: Color::Rgb(59, 130, 246),      // #3b82f6
            badge: Color::Rgb(251, 191, 36),          // #fbbf24
        }
    }
}
