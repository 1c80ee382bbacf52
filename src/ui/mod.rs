//! UI rendering components

pub mod avatar;
pub mod layout;
pub mod lesson;
pub mod quiz;
pub mod results;
pub mod status_line;
pub mod welcome;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::app::state::AppState;
use crate::lesson::{LessonFlowController, Phase};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, controller: &LessonFlowController, theme: &Theme) {
    let [screen, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    match controller.phase() {
        Phase::Welcome => welcome::draw(frame, screen, &state.intro, controller, theme),
        Phase::Lesson => lesson::draw(frame, screen, &state.avatar, controller, theme),
        Phase::Quiz => quiz::draw(frame, screen, &state.quiz, &state.avatar, controller, theme),
        Phase::Results => results::draw(frame, screen, &state.avatar, controller, theme),
    }

    status_line::draw(frame, status, &state.status, controller.phase(), theme);
}
