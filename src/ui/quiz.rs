//! Quiz screen: every question at once, answered with the keyboard

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::avatar;
use super::layout::{card, fill_background, key_hints};
use super::lesson::camera_indicator;
use crate::app::state::{AvatarAnimation, QuizCursor};
use crate::lesson::LessonFlowController;
use crate::theme::Theme;

/// Lines per question: the question, its options and a blank separator
const LINES_PER_QUESTION: usize = 6;

/// Draw the quiz screen
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    cursor: &QuizCursor,
    avatar_animation: &AvatarAnimation,
    controller: &LessonFlowController,
    theme: &Theme,
) {
    fill_background(frame, area, theme);

    let block = card("Quiz Time!", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header, body, submit_area, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);
    let [avatar_area, questions_area] =
        Layout::horizontal([Constraint::Length(16), Constraint::Min(10)]).areas(body);

    frame.render_widget(Paragraph::new(camera_indicator(controller, theme)), header);
    let speaking = controller.state().narration_active;
    avatar::draw(frame, avatar_area, speaking, avatar_animation, theme);

    let lines = question_lines(cursor, controller, theme);
    let offset = scroll_offset(cursor.question, questions_area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), questions_area);

    frame.render_widget(
        Paragraph::new(submit_line(controller, theme)).wrap(Wrap { trim: true }),
        submit_area,
    );

    let hints = key_hints(
        &[("j/k", "Question"), ("1-4", "Answer"), ("h/l Space", "Pick"), ("q", "Quit")],
        theme,
    );
    frame.render_widget(Paragraph::new(hints), hints_area);
}

/// Numbered questions with their options; the cursor row is highlighted
fn question_lines(
    cursor: &QuizCursor,
    controller: &LessonFlowController,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let state = controller.state();
    let mut lines = Vec::new();

    for (qi, question) in controller.curriculum().questions().iter().enumerate() {
        let focused = qi == cursor.question;
        let title_style = if focused {
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        lines.push(Line::from(Span::styled(
            format!("{}. {}", qi + 1, question.question),
            title_style,
        )));

        let answer = state.answer(question.id);
        for (oi, option) in question.options.iter().enumerate() {
            let chosen = answer == Some(oi);
            let marker = if chosen { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
            let letter = (b'A' + oi as u8) as char;

            let mut style = if chosen {
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };
            if focused && oi == cursor.option {
                style = style.bg(theme.selection);
            }

            lines.push(Line::from(Span::styled(
                format!("   {} {}) {}", marker, letter, option),
                style,
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// First visible row so the focused question stays on screen
fn scroll_offset(question: usize, height: usize) -> u16 {
    let end = (question + 1) * LINES_PER_QUESTION;
    end.saturating_sub(height).min(question * LINES_PER_QUESTION) as u16
}

fn submit_line(controller: &LessonFlowController, theme: &Theme) -> Line<'static> {
    let answered = controller.state().answered();
    let total = controller.curriculum().question_count();

    if controller.can_submit() {
        Line::from(vec![
            Span::styled(
                "[Enter] ",
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Submit Quiz",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!("Submit Quiz ({} of {} answered)", answered, total),
            Style::default().fg(theme.fg_muted),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scroll_when_question_fits() {
        assert_eq!(scroll_offset(0, 20), 0);
        assert_eq!(scroll_offset(2, 18), 0);
    }

    #[test]
    fn scrolls_to_keep_focused_question_visible() {
        // Question 3 occupies rows 18..24
        assert_eq!(scroll_offset(3, 12), 12);
        // Never past the question's first row
        assert_eq!(scroll_offset(3, 4), 18);
    }
}
