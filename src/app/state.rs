//! UI-only state
//!
//! Session state lives in the lesson controller; this is what the screens
//! need on top of it: where the quiz cursor is, what the status line says,
//! and animation clocks.

use std::time::Instant;

use crate::content::{OPTION_COUNT, QuizQuestion};

/// Quiz cursor: highlighted question and option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizCursor {
    /// Index of the highlighted question
    pub question: usize,
    /// Index of the highlighted option within that question
    pub option: usize,
}

impl QuizCursor {
    /// Move to the next question, keeping the option on its recorded answer
    pub fn next_question(&mut self, total: usize, answer: impl Fn(usize) -> Option<usize>) {
        if self.question + 1 < total {
            self.question += 1;
            self.option = answer(self.question).unwrap_or(0);
        }
    }

    /// Move to the previous question
    pub fn prev_question(&mut self, answer: impl Fn(usize) -> Option<usize>) {
        if self.question > 0 {
            self.question -= 1;
            self.option = answer(self.question).unwrap_or(0);
        }
    }

    pub fn next_option(&mut self) {
        if self.option + 1 < OPTION_COUNT {
            self.option += 1;
        }
    }

    pub fn prev_option(&mut self) {
        self.option = self.option.saturating_sub(1);
    }

    /// The highlighted question, if the index is valid
    pub fn question<'a>(&self, questions: &'a [QuizQuestion]) -> Option<&'a QuizQuestion> {
        questions.get(self.question)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Severity of a status line message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    /// Something optional did not work out
    Advisory,
    Error,
}

/// Message shown on the bottom line
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Current message (if any)
    pub message: Option<String>,
    /// How the message should be styled
    pub kind: StatusKind,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.set(msg, StatusKind::Info);
    }

    /// Set an advisory message
    pub fn set_advisory(&mut self, msg: impl Into<String>) {
        self.set(msg, StatusKind::Advisory);
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.set(msg, StatusKind::Error);
    }

    fn set(&mut self, msg: impl Into<String>, kind: StatusKind) {
        self.message = Some(msg.into());
        self.kind = kind;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
        self.kind = StatusKind::Info;
    }
}

/// Intro animation on the welcome screen
#[derive(Debug, Clone)]
pub struct IntroAnimation {
    /// When the animation started
    pub start_time: Instant,

    /// Current animation frame (40ms per frame)
    pub current_frame: usize,

    /// Whether the animation has finished
    pub complete: bool,
}

impl Default for IntroAnimation {
    fn default() -> Self {
        Self { start_time: Instant::now(), current_frame: 0, complete: false }
    }
}

impl IntroAnimation {
    /// Frame timing constants
    pub const MS_PER_FRAME: u128 = 40;
    pub const ART_END_FRAME: usize = 25;
    pub const TITLE_END_FRAME: usize = 45;
    pub const TAGLINE_END_FRAME: usize = 55;

    /// Advance the animation based on elapsed time
    pub fn tick(&mut self) {
        let elapsed_ms = self.start_time.elapsed().as_millis();
        self.set_frame((elapsed_ms / Self::MS_PER_FRAME) as usize);
    }

    fn set_frame(&mut self, frame: usize) {
        self.current_frame = frame;
        self.complete = self.current_frame >= Self::TAGLINE_END_FRAME;
    }

    /// Restart from the first frame
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// How much of the satellite art is drawn (0.0 to 1.0)
    pub fn art_progress(&self) -> f32 {
        (self.current_frame as f32 / Self::ART_END_FRAME as f32).min(1.0)
    }

    /// How many characters of a title of `len` characters to show
    pub fn title_chars(&self, len: usize) -> usize {
        if self.current_frame < Self::ART_END_FRAME {
            0
        } else if self.current_frame >= Self::TITLE_END_FRAME {
            len
        } else {
            let span = (Self::TITLE_END_FRAME - Self::ART_END_FRAME) as f32;
            let typed = (self.current_frame - Self::ART_END_FRAME) as f32 / span;
            ((typed * len as f32) as usize).min(len)
        }
    }

    /// Whether to show the tagline and buttons
    pub fn show_tagline(&self) -> bool {
        self.current_frame >= Self::TITLE_END_FRAME
    }
}

/// Captain Cosmo's idle and speaking animation
#[derive(Debug, Clone)]
pub struct AvatarAnimation {
    pub start_time: Instant,
}

impl Default for AvatarAnimation {
    fn default() -> Self {
        Self { start_time: Instant::now() }
    }
}

impl AvatarAnimation {
    /// Bounce/pulse period
    pub const MS_PER_BEAT: u128 = 300;

    /// Beat counter, advancing every [`Self::MS_PER_BEAT`]
    pub fn beat(&self) -> usize {
        (self.start_time.elapsed().as_millis() / Self::MS_PER_BEAT) as usize
    }
}

/// Full UI state
#[derive(Debug, Default)]
pub struct AppState {
    /// Quiz cursor
    pub quiz: QuizCursor,

    /// Bottom status line
    pub status: StatusLine,

    /// Welcome screen animation
    pub intro: IntroAnimation,

    /// Avatar animation clock
    pub avatar: AvatarAnimation,
}
