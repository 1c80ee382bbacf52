//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme::Theme;

/// Fill the whole area with the background colour
pub fn fill_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);
}

/// Rounded card with a bold title
pub fn card<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary))
}

/// A row of `[key] label` hints
pub fn key_hints(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(theme.accent_secondary)));
        spans.push(Span::styled(format!(" {}", label), Style::default().fg(theme.fg_muted)));
    }
    Line::from(spans)
}

/// Render a single centered line at row `y` of `area`, if it fits
pub fn centered_line(frame: &mut Frame, area: Rect, y: u16, line: Line<'_>) {
    if y >= area.bottom() {
        return;
    }
    let row = Rect { x: area.x, y, width: area.width, height: 1 };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(80, 50, outer);
        assert_eq!(inner.width, 80);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 10);
        assert_eq!(inner.y, 10);
    }

    #[test]
    fn key_hints_separate_entries() {
        let theme = Theme::default();
        let line = key_hints(&[("r", "Take Lesson Again"), ("h", "Back to Home")], &theme);
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.spans[0].content, "[r]");
    }
}
