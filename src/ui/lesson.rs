//! Lesson screen: progress, Captain Cosmo and the current step

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
};

use super::avatar;
use super::layout::{card, fill_background, key_hints};
use crate::app::state::AvatarAnimation;
use crate::lesson::LessonFlowController;
use crate::theme::Theme;

/// Draw the lesson screen
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    avatar_animation: &AvatarAnimation,
    controller: &LessonFlowController,
    theme: &Theme,
) {
    fill_background(frame, area, theme);

    let block = card("Space Lesson", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header, gauge, _, body, dots, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(avatar::HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let state = controller.state();
    let total = controller.curriculum().step_count();

    frame.render_widget(Paragraph::new(camera_indicator(controller, theme)), header);

    let ratio = f64::from(state.progress_percent.clamp(0.0, 100.0)) / 100.0;
    let progress = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_primary).bg(theme.bg_tertiary))
        .label(format!("Step {} of {}", state.current_step + 1, total))
        .ratio(ratio);
    frame.render_widget(progress, gauge);

    let [avatar_area, step_area] =
        Layout::horizontal([Constraint::Length(16), Constraint::Min(10)]).areas(body);
    avatar::draw(frame, avatar_area, state.narration_active, avatar_animation, theme);

    if let Some(step) = controller.current_step() {
        let text = vec![
            Line::from(Span::styled(
                step.title.clone(),
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(step.content.clone(), Style::default().fg(theme.fg_primary))),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), step_area);
    }

    frame.render_widget(
        Paragraph::new(step_dots(state.current_step, total, theme)).alignment(Alignment::Center),
        dots,
    );
    frame.render_widget(Paragraph::new(key_hints(&[("q", "Quit")], theme)), hints);
}

/// One dot per step, filled up to and including the current one
pub fn step_dots(current: usize, total: usize, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = (0..total)
        .map(|i| {
            if i <= current {
                Span::styled("● ", Style::default().fg(theme.accent_primary))
            } else {
                Span::styled("○ ", Style::default().fg(theme.fg_muted))
            }
        })
        .collect();
    Line::from(spans)
}

/// Recording marker and device while the camera is on
pub fn camera_indicator(controller: &LessonFlowController, theme: &Theme) -> Line<'static> {
    match controller.camera_device() {
        Some(device) => Line::from(vec![
            Span::styled("◉ ", Style::default().fg(theme.error)),
            Span::styled(
                format!("camera on {}", device.display()),
                Style::default().fg(theme.fg_muted),
            ),
        ]),
        None => Line::from(""),
    }
}
