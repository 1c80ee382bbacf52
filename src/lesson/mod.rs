//! Lesson flow: phases, timed steps, quiz scoring

pub mod controller;
pub mod error;
pub mod scoring;
pub mod session;
pub mod timer;

pub use controller::{CAMERA_ADVISORY, FlowEvent, FlowSettings, LessonFlowController, QuizOutcome};
pub use error::FlowError;
pub use scoring::PassingThreshold;
pub use session::{Phase, SessionState};
