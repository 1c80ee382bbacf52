//! Built-in satellite lesson, presented by Captain Cosmo

use super::model::{Curriculum, LessonStep, QuizQuestion};

/// Name of the badge awarded for passing the quiz
pub const BADGE_NAME: &str = "Satellite Builder";

/// Narrated when the last lesson step finishes
pub const QUIZ_TRANSITION: &str =
    "Great job listening! Now let's test what you've learned with a fun quiz!";

/// Narrated on the results screen when the badge is earned
pub fn congratulation(score: usize, total: usize) -> String {
    format!(
        "Congratulations! You scored {} out of {}! You've earned the {} badge!",
        score, total, BADGE_NAME
    )
}

/// Narrated on the results screen when the badge is missed
pub fn encouragement(score: usize, total: usize) -> String {
    format!("Good try! You scored {} out of {}. Keep learning about satellites!", score, total)
}

fn lesson_steps() -> Vec<LessonStep> {
    vec![
        LessonStep::new(
            "Welcome to Satellite Building!",
            "Hi there, space explorer! I'm Captain Cosmo, and today we're going to learn how to \
             build our very own satellite! Are you ready for an amazing space adventure?",
            4000,
        ),
        LessonStep::new(
            "What is a Satellite?",
            "A satellite is like a super cool robot that orbits around Earth in space! It can \
             take pictures, help with GPS, and even let us talk to people far away. Think of it \
             as Earth's helpful space friend!",
            6000,
        ),
        LessonStep::new(
            "Satellite Components",
            "Every satellite needs four main parts: Solar panels for power - like giving it \
             energy from the sun! An antenna to communicate with Earth, cameras or sensors to do \
             its job, and a strong body to protect everything inside.",
            7000,
        ),
        LessonStep::new(
            "How Satellites Stay in Space",
            "Satellites don't fall down because they're moving super fast around Earth! It's \
             like when you spin a ball on a string - the faster it goes, the more it wants to fly \
             away, but Earth's gravity keeps pulling it back. Perfect balance!",
            8000,
        ),
        LessonStep::new(
            "Real Satellite Missions",
            "Some satellites help predict the weather, others take amazing photos of space, and \
             some even help scientists study climate change! The Hubble Space Telescope is a \
             famous satellite that shows us beautiful pictures of distant galaxies!",
            7000,
        ),
    ]
}

fn quiz_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new(
            1,
            "What keeps satellites from falling back to Earth?",
            ["Magic", "Earth's gravity and their speed", "Rocket fuel", "Air balloons"],
            1,
        ),
        QuizQuestion::new(
            2,
            "What do satellites use to get power in space?",
            ["Batteries only", "Solar panels", "Wind power", "Nuclear reactors"],
            1,
        ),
        QuizQuestion::new(
            3,
            "Which of these is NOT a main component of a satellite?",
            ["Solar panels", "Antenna", "Wheels", "Camera or sensors"],
            2,
        ),
        QuizQuestion::new(
            4,
            "What is the Hubble Space Telescope famous for?",
            ["Weather prediction", "Taking pictures of space", "GPS navigation", "Phone calls"],
            1,
        ),
    ]
}

impl Curriculum {
    /// The built-in satellite curriculum
    pub fn satellites() -> Self {
        Self::new(lesson_steps(), quiz_questions())
            .unwrap_or_else(|e| unreachable!("built-in curriculum is invalid: {e}"))
    }
}
