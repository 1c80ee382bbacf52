//! Captain Cosmo

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AvatarAnimation;
use crate::theme::Theme;

/// Rows the avatar needs, including the bounce row and indicator
pub const HEIGHT: u16 = 6;

const HELMET_TOP: &str = "╭─────╮";
const HELMET_BOTTOM: &str = "╰──┬──╯";
const BODY: &str = "╱▔▔▔╲";

/// Face for the given beat; the mouth moves while speaking
fn face(speaking: bool, beat: usize) -> &'static str {
    match (speaking, beat % 2) {
        (true, 0) => "│ ◕o◕ │",
        _ => "│ ◕‿◕ │",
    }
}

/// Avatar lines for the given beat
pub fn lines(speaking: bool, beat: usize, theme: &Theme) -> Vec<Line<'static>> {
    let outline = if speaking && beat % 2 == 0 {
        Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent_primary)
    };
    let face_style = Style::default().fg(theme.fg_primary);

    let mut lines = Vec::with_capacity(HEIGHT as usize);
    // Bounce by shifting down a row every other beat
    let bounced = speaking && beat % 2 == 1;
    if !bounced {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(HELMET_TOP, outline)));
    lines.push(Line::from(Span::styled(face(speaking, beat), face_style)));
    lines.push(Line::from(Span::styled(HELMET_BOTTOM, outline)));
    lines.push(Line::from(Span::styled(BODY, outline)));
    if bounced {
        lines.push(Line::from(""));
    }

    lines.push(if speaking {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.success)),
            Span::styled("Captain Cosmo", Style::default().fg(theme.fg_secondary)),
        ])
    } else {
        Line::from(Span::styled("Captain Cosmo", Style::default().fg(theme.fg_muted)))
    });
    lines
}

/// Draw the avatar centered in `area`
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    speaking: bool,
    animation: &AvatarAnimation,
    theme: &Theme,
) {
    let para = Paragraph::new(lines(speaking, animation.beat(), theme))
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}
