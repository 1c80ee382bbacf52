//! Lesson and quiz content

pub mod error;
pub mod model;
pub mod outline;
pub mod satellites;

pub use error::ContentError;
pub use model::{Curriculum, LessonStep, OPTION_COUNT, QuizQuestion};
