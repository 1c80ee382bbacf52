//! Content model for lessons
//!
//! A curriculum is an ordered list of timed lesson steps followed by a set of
//! multiple-choice questions. Both are immutable once validated.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// Number of options every quiz question offers
pub const OPTION_COUNT: usize = 4;

/// One unit of narrated lesson content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStep {
    /// Heading shown above the content
    pub title: String,
    /// Text displayed and narrated
    pub content: String,
    /// How long the step stays on screen, in milliseconds
    pub duration_ms: u64,
}

impl LessonStep {
    pub fn new(title: impl Into<String>, content: impl Into<String>, duration_ms: u64) -> Self {
        Self { title: title.into(), content: content.into(), duration_ms }
    }

    /// On-screen dwell time
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Unique identifier within a curriculum
    pub id: u32,
    /// Question text
    pub question: String,
    /// Answer options, in display order
    pub options: [String; OPTION_COUNT],
    /// Index into `options` of the correct answer
    pub correct_index: usize,
}

impl QuizQuestion {
    pub fn new(
        id: u32,
        question: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_index: usize,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            options: options.map(String::from),
            correct_index,
        }
    }

    /// Whether the given option index is the correct one
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

/// A validated lesson plus quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCurriculum", into = "RawCurriculum")]
pub struct Curriculum {
    steps: Vec<LessonStep>,
    questions: Vec<QuizQuestion>,
}

/// Unvalidated on-disk shape of a curriculum
#[derive(Serialize, Deserialize)]
struct RawCurriculum {
    steps: Vec<LessonStep>,
    questions: Vec<QuizQuestion>,
}

impl TryFrom<RawCurriculum> for Curriculum {
    type Error = ContentError;

    fn try_from(raw: RawCurriculum) -> Result<Self, Self::Error> {
        Curriculum::new(raw.steps, raw.questions)
    }
}

impl From<Curriculum> for RawCurriculum {
    fn from(curriculum: Curriculum) -> Self {
        Self { steps: curriculum.steps, questions: curriculum.questions }
    }
}

impl Curriculum {
    /// Build a curriculum, checking every structural rule
    pub fn new(steps: Vec<LessonStep>, questions: Vec<QuizQuestion>) -> Result<Self, ContentError> {
        if steps.is_empty() {
            return Err(ContentError::NoSteps);
        }
        if questions.is_empty() {
            return Err(ContentError::NoQuestions);
        }

        for (index, step) in steps.iter().enumerate() {
            if step.title.trim().is_empty() || step.content.trim().is_empty() {
                return Err(ContentError::EmptyStep { index });
            }
            if step.duration_ms == 0 {
                return Err(ContentError::ZeroDuration { index });
            }
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(ContentError::DuplicateQuestionId { id: question.id });
            }
            if question.question.trim().is_empty() {
                return Err(ContentError::EmptyQuestion { id: question.id });
            }
            if question.correct_index >= OPTION_COUNT {
                return Err(ContentError::CorrectIndexOutOfRange {
                    id: question.id,
                    index: question.correct_index,
                });
            }
        }

        Ok(Self { steps, questions })
    }

    /// Load and validate a curriculum from a JSON file
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ContentError::Read { path: path.to_path_buf(), source })?;
        serde_json::from_str(&contents)
            .map_err(|source| ContentError::Parse { path: path.to_path_buf(), source })
    }

    /// Lesson steps in order
    pub fn steps(&self) -> &[LessonStep] {
        &self.steps
    }

    /// Quiz questions in display order
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn step(&self, index: usize) -> Option<&LessonStep> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Look up a question by its id
    pub fn question(&self, id: u32) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Total lesson running time
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(LessonStep::duration).sum()
    }
}
