//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::camera;
use crate::config::Config;
use crate::content::Curriculum;
use crate::lesson::{FlowError, FlowSettings, LessonFlowController, Phase};
use crate::narration;
use crate::theme::Theme;
use crate::ui;
use input::{Action, key_to_action};
use state::AppState;

/// Redraw interval for animations
const TICK: Duration = Duration::from_millis(50);

/// The main application
pub struct App {
    /// UI state
    state: AppState,

    /// Lesson session
    controller: LessonFlowController,

    /// Resolved colour theme
    theme: Theme,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create the app with narrator and camera built from `config`
    pub fn new(config: Config, curriculum: Curriculum) -> Result<Self> {
        let controller = LessonFlowController::new(
            curriculum,
            FlowSettings::from_config(&config),
            narration::from_config(&config.narration),
            camera::from_config(&config.camera),
        );
        Self::with_controller(&config, controller)
    }

    /// Create the app around an existing controller
    pub fn with_controller(config: &Config, controller: LessonFlowController) -> Result<Self> {
        let theme = config.active_theme();
        let terminal = Self::setup_terminal()?;

        Ok(Self { state: AppState::default(), controller, theme, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::info!(
            steps = self.controller.curriculum().step_count(),
            questions = self.controller.curriculum().question_count(),
            narration = self.controller.narration_available(),
            "session started"
        );

        loop {
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &self.controller, &self.theme);
            })?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key) {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(e) => tracing::error!("Error handling key: {}", e),
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => tracing::error!("Error reading terminal event: {}", e),
                    None => break,
                },
                Some(event) = self.controller.next_event() => {
                    self.controller.handle_event(event);
                }
                _ = tick.tick() => {
                    if self.controller.phase() == Phase::Welcome {
                        self.state.intro.tick();
                    }
                }
            }

            if let Some(advisory) = self.controller.take_advisory() {
                self.state.status.set_advisory(advisory);
            }
        }

        self.controller.dispose();
        self.restore_terminal()?;
        tracing::info!("session ended");
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(action) = key_to_action(self.controller.phase(), key.code, key.modifiers) else {
            return Ok(false);
        };
        Ok(apply_action(&mut self.state, &mut self.controller, action))
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.controller.dispose();
        let _ = self.restore_terminal();
    }
}

/// Apply an action to the session and UI state, returns true if should exit
///
/// Rejected operations are reported on the status line; the session is
/// left as it was.
pub fn apply_action(
    state: &mut AppState,
    controller: &mut LessonFlowController,
    action: Action,
) -> bool {
    let result = match action {
        Action::Quit => return true,
        Action::EnableCamera => controller.enable_camera().map(|()| {
            if controller.camera_pending() {
                state.status.set_message("Requesting camera...");
            }
        }),
        Action::StartLesson => controller.start_lesson().map(|()| {
            state.status.clear();
            state.quiz.reset();
        }),
        Action::NextQuestion => {
            let total = controller.curriculum().question_count();
            state.quiz.next_question(total, |i| recorded_answer(&*controller, i));
            Ok(())
        }
        Action::PrevQuestion => {
            state.quiz.prev_question(|i| recorded_answer(&*controller, i));
            Ok(())
        }
        Action::NextOption => {
            state.quiz.next_option();
            Ok(())
        }
        Action::PrevOption => {
            state.quiz.prev_option();
            Ok(())
        }
        Action::Choose(option) => choose(state, controller, option),
        Action::ChooseHighlighted => {
            let option = state.quiz.option;
            choose(state, controller, option)
        }
        Action::Submit => controller.submit_quiz().map(|outcome| {
            state.status.set_message(format!(
                "{}/{} questions correct",
                outcome.score, outcome.total
            ));
        }),
        Action::Retake => controller.restart_lesson().map(|()| {
            state.status.clear();
            state.quiz.reset();
        }),
        Action::Home => controller.return_home().map(|()| {
            state.status.clear();
            state.quiz.reset();
            state.intro.restart();
        }),
    };

    match result {
        Ok(()) => {}
        Err(e @ FlowError::QuizIncomplete { .. }) => state.status.set_message(capitalize(&e)),
        Err(e) => {
            tracing::warn!(?action, error = %e, "action rejected");
            state.status.set_error(capitalize(&e));
        }
    }
    false
}

fn choose(
    state: &mut AppState,
    controller: &mut LessonFlowController,
    option: usize,
) -> Result<(), FlowError> {
    let Some(id) = state.quiz.question(controller.curriculum().questions()).map(|q| q.id) else {
        return Ok(());
    };
    controller.record_answer(id, option)?;
    state.quiz.option = option;
    state.status.clear();
    Ok(())
}

fn recorded_answer(controller: &LessonFlowController, index: usize) -> Option<usize> {
    let question = controller.curriculum().questions().get(index)?;
    controller.state().answer(question.id)
}

fn capitalize(e: &FlowError) -> String {
    let text = e.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}
