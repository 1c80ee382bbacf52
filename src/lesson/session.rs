//! Session state for one run through the lesson

use std::collections::BTreeMap;
use std::fmt;

/// Which part of the lesson flow is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Welcome,
    Lesson,
    Quiz,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Welcome => "welcome",
            Phase::Lesson => "lesson",
            Phase::Quiz => "quiz",
            Phase::Results => "results",
        };
        f.write_str(name)
    }
}

/// Everything the screens render, owned and mutated by the controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Current phase
    pub phase: Phase,

    /// Index of the lesson step on screen
    pub current_step: usize,

    /// Lesson progress, 0 to 100
    pub progress_percent: f32,

    /// Selected option per question id
    pub answers: BTreeMap<u32, usize>,

    /// Correct answers in the last submitted quiz
    pub score: usize,

    /// Whether the last quiz met the passing threshold
    pub badge_earned: bool,

    /// Whether narration audio is playing right now
    pub narration_active: bool,

    /// Whether a camera stream is held
    pub camera_enabled: bool,
}

impl SessionState {
    /// Clear lesson and quiz progress, keeping collaborator flags
    pub fn reset_progress(&mut self) {
        self.current_step = 0;
        self.progress_percent = 0.0;
        self.answers.clear();
        self.score = 0;
        self.badge_earned = false;
    }

    /// Number of questions with a recorded answer
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Selected option for a question, if any
    pub fn answer(&self, question_id: u32) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }
}
