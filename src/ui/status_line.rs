//! Status line at the bottom of the screen

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{StatusKind, StatusLine};
use crate::lesson::Phase;
use crate::theme::Theme;

/// Draw the status line
pub fn draw(frame: &mut Frame, area: Rect, status: &StatusLine, phase: Phase, theme: &Theme) {
    let line = build_line(status, phase, theme);
    let para = Paragraph::new(line).style(Style::default().bg(theme.bg_tertiary));
    frame.render_widget(para, area);
}

fn build_line(status: &StatusLine, phase: Phase, theme: &Theme) -> Line<'static> {
    let Some(ref msg) = status.message else {
        // Show the phase when there is nothing to say
        return Line::from(Span::styled(
            format!(" {} ", phase),
            Style::default().fg(theme.fg_muted),
        ));
    };

    let style = match status.kind {
        StatusKind::Info => Style::default().fg(theme.fg_secondary),
        StatusKind::Advisory => Style::default().fg(theme.warning),
        StatusKind::Error => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
    };
    Line::from(Span::styled(format!(" {}", msg), style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_shows_phase() {
        let theme = Theme::default();
        let line = build_line(&StatusLine::default(), Phase::Quiz, &theme);
        assert_eq!(line.spans[0].content, " quiz ");
    }

    #[test]
    fn advisory_uses_warning_colour() {
        let theme = Theme::default();
        let mut status = StatusLine::default();
        status.set_advisory("no camera");
        let line = build_line(&status, Phase::Welcome, &theme);
        assert_eq!(line.spans[0].style.fg, Some(theme.warning));
        assert_eq!(line.spans[0].content, " no camera");
    }
}
