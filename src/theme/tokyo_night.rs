//! Tokyo Night theme implementation

use ratatui::style::Color;

use super::Theme;

impl Theme {
    pub fn tokyo_night() -> Self {
        Theme {
            name: "Tokyo Night".to_string(),

            bg_primary: Color::Rgb(26, 27, 38),   // #1a1b26
            bg_secondary: Color::Rgb(36, 40, 59), // #24283b
            bg_tertiary: Color::Rgb(65, 72, 104), // #414868

            fg_primary: Color::Rgb(169, 177, 214),   // #a9b1d6
            fg_secondary: Color::Rgb(192, 202, 245), // #c0caf5
            fg_muted: Color::Rgb(86, 95, 137),       // #565f89

            accent_primary: Color::Rgb(122, 162, 247),   // #7aa2f7
            accent_secondary: Color::Rgb(187, 154, 247), // #bb9af7

            success: Color::Rgb(158, 206, 106), // #9ece6a
            warning: Color::Rgb(224, 175, 104), // #e0af68
            error: Color::Rgb(247, 118, 142),   // #f7768e
            info: Color::Rgb(125, 207, 255),    // #7dcfff

            border: Color::Rgb(65, 72, 104),           // #414868
            border_focused: Color::Rgb(122, 162, 247), // #7aa2f7
            selection: Color::Rgb(40, 52, 87),         // #283457
            badge: Color::Rgb(255, 158, 100),          // #ff9e64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokyo_night_colors_are_rgb() {
        let theme = Theme::tokyo_night();
        assert!(matches!(theme.bg_primary, Color::Rgb(_, _, _)));
        assert!(matches!(theme.badge, Color::Rgb(_, _, _)));
    }
}
