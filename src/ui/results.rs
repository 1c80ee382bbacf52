//! Results screen

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::avatar;
use super::layout::{card, centered_rect, fill_background, key_hints};
use crate::app::state::AvatarAnimation;
use crate::content::satellites::BADGE_NAME;
use crate::lesson::LessonFlowController;
use crate::theme::Theme;

/// Draw the results screen
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    avatar_animation: &AvatarAnimation,
    controller: &LessonFlowController,
    theme: &Theme,
) {
    fill_background(frame, area, theme);

    let panel = centered_rect(80, 80, area);
    let block = card("Mission Complete!", theme);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let [avatar_area, summary] =
        Layout::vertical([Constraint::Length(avatar::HEIGHT), Constraint::Min(1)]).areas(inner);
    let speaking = controller.state().narration_active;
    avatar::draw(frame, avatar_area, speaking, avatar_animation, theme);

    let para = Paragraph::new(result_lines(controller, theme))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, summary);
}

fn result_lines(controller: &LessonFlowController, theme: &Theme) -> Vec<Line<'static>> {
    let state = controller.state();
    let questions = controller.curriculum().questions();
    let total = questions.len();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{}", state.score, total),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Questions Correct", Style::default().fg(theme.fg_secondary))),
        Line::from(""),
    ];

    // Per-question marks
    let mut marks = Vec::with_capacity(total);
    for (i, question) in questions.iter().enumerate() {
        let correct = state.answer(question.id).is_some_and(|a| question.is_correct(a));
        let (marker, style) = if correct {
            ("\u{2713}", Style::default().fg(theme.success)) // ✓
        } else {
            ("\u{2717}", Style::default().fg(theme.error)) // ✗
        };
        marks.push(Span::styled(format!(" Q{} {} ", i + 1, marker), style));
    }
    lines.push(Line::from(marks));
    lines.push(Line::from(""));

    if state.badge_earned {
        let badge = Style::default().fg(theme.badge).add_modifier(Modifier::BOLD);
        lines.push(Line::from(Span::styled(format!("★ {} Badge Earned! ★", BADGE_NAME), badge)));
        lines.push(Line::from(Span::styled(
            "You're now a certified satellite expert!",
            Style::default().fg(theme.fg_primary),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!(
                "Get {} of {} right to earn the {} badge.",
                controller.required_correct(),
                total,
                BADGE_NAME
            ),
            Style::default().fg(theme.fg_muted),
        )));
    }
    lines.push(Line::from(""));

    if state.camera_enabled {
        lines.push(Line::from(Span::styled(
            "Great job, space explorer!",
            Style::default().fg(theme.info),
        )));
        lines.push(Line::from(""));
    }

    lines.push(key_hints(&[("r", "Take Lesson Again"), ("h", "Back to Home")], theme));
    lines
}
