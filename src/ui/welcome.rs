//! Welcome screen with the satellite assembling itself

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{centered_line, fill_background, key_hints};
use crate::app::state::IntroAnimation;
use crate::lesson::LessonFlowController;
use crate::theme::Theme;

/// The satellite, revealed left to right, top to bottom
const SATELLITE: [&str; 6] = [
    "┌──┬──┬──┐        ┌──┬──┬──┐",
    "├──┼──┼──┤ ╭────╮ ├──┼──┼──┤",
    "├──┼──┼──┼─┤ ◉◉ ├─┼──┼──┼──┤",
    "└──┴──┴──┘ ╰─┬──╯ └──┴──┴──┘",
    "             │              ",
    "           ╰═══╯            ",
];

const TITLE: &str = "Build Your Own Satellite!";
const TAGLINE: &str =
    "Join Captain Cosmo on an exciting journey to learn about satellites and space exploration!";
const CAMERA_READY: &str = "Webcam Ready!";
const CAMERA_COMPLIMENT: &str = "Looking great, space explorer!";

/// Build the satellite art with `progress` (0.0 to 1.0) of its pieces drawn
fn build_satellite(progress: f32) -> String {
    let pieces: usize =
        SATELLITE.iter().map(|row| row.chars().filter(|c| *c != ' ').count()).sum();
    let mut remaining = ((pieces as f32) * progress.clamp(0.0, 1.0)) as usize;

    let mut rows = Vec::with_capacity(SATELLITE.len());
    for row in SATELLITE {
        let drawn: String = row
            .chars()
            .map(|c| {
                if c == ' ' {
                    ' '
                } else if remaining > 0 {
                    remaining -= 1;
                    c
                } else {
                    ' '
                }
            })
            .collect();
        rows.push(drawn);
    }
    rows.join("\n")
}

/// Draw the welcome screen
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    animation: &IntroAnimation,
    controller: &LessonFlowController,
    theme: &Theme,
) {
    fill_background(frame, area, theme);

    let art_height = SATELLITE.len() as u16;
    let art_y = area.y + (area.height / 5).min(area.height.saturating_sub(art_height + 12));
    let art_area = Rect {
        x: area.x,
        y: art_y,
        width: area.width,
        height: art_height.min(area.bottom().saturating_sub(art_y)),
    };
    let art = Paragraph::new(build_satellite(animation.art_progress()))
        .style(Style::default().fg(theme.accent_primary))
        .alignment(Alignment::Center);
    frame.render_widget(art, art_area);

    let mut y = art_area.bottom() + 2;

    // Title types itself out once the satellite is built
    let title_len = TITLE.chars().count();
    let shown = animation.title_chars(title_len);
    if shown > 0 {
        let visible: String = TITLE.chars().take(shown).collect();
        let padded = format!("{}{}", visible, " ".repeat(title_len - shown));
        let style = Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD);
        centered_line(frame, area, y, Line::from(Span::styled(padded, style)));
    }
    y += 2;

    if !animation.show_tagline() {
        return;
    }

    centered_line(
        frame,
        area,
        y,
        Line::from(Span::styled(TAGLINE, Style::default().fg(theme.fg_secondary))),
    );
    y += 3;

    let state = controller.state();
    let camera_line = if state.camera_enabled {
        Line::from(Span::styled(
            format!("● {}", CAMERA_READY),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ))
    } else if controller.camera_pending() {
        Line::from(Span::styled("Requesting webcam...", Style::default().fg(theme.info)))
    } else {
        key_hints(&[("c", "Enable Webcam (Optional)")], theme)
    };
    centered_line(frame, area, y, camera_line);
    y += 1;

    if state.camera_enabled {
        centered_line(
            frame,
            area,
            y,
            Line::from(Span::styled(CAMERA_COMPLIMENT, Style::default().fg(theme.fg_muted))),
        );
    }
    y += 2;

    // Blink the start prompt once the intro is over
    let blink_on = !animation.complete
        || (animation.start_time.elapsed().as_millis() / 500) % 2 == 0;
    if blink_on {
        centered_line(frame, area, y, key_hints(&[("Enter", "Start Space Adventure!")], theme));
    }
}
