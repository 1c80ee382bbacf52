//! Cosmo - a narrated terminal lesson about satellites
//!
//! Captain Cosmo walks the learner through a short timed lesson, then a
//! quiz; scoring well earns the Satellite Builder badge. Narration runs
//! through a speech program and an optional camera can be switched on.

pub mod app;
pub mod camera;
pub mod config;
pub mod content;
pub mod lesson;
pub mod narration;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use content::Curriculum;
pub use lesson::LessonFlowController;
pub use theme::Theme;
