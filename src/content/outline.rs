//! Plain-text outline of a curriculum, for the `outline` subcommand

use std::fmt::Write;

use textwrap::Options;

use super::model::Curriculum;

/// Render the steps and questions as wrapped plain text
pub fn render(curriculum: &Curriculum, width: usize) -> String {
    let mut out = String::new();
    let body = Options::new(width).initial_indent("    ").subsequent_indent("    ");

    let _ = writeln!(
        out,
        "Lesson: {} steps, {}s",
        curriculum.step_count(),
        curriculum.total_duration().as_secs()
    );
    for (i, step) in curriculum.steps().iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {} ({}ms)", i + 1, step.title, step.duration_ms);
        let _ = writeln!(out, "{}", textwrap::fill(&step.content, &body));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Quiz: {} questions", curriculum.question_count());
    let question = Options::new(width).subsequent_indent("    ");
    for (i, q) in curriculum.questions().iter().enumerate() {
        let title = format!("{:>2}. {}", i + 1, q.question);
        let _ = writeln!(out, "{}", textwrap::fill(&title, &question));
        for (oi, option) in q.options.iter().enumerate() {
            let marker = if q.is_correct(oi) { '*' } else { ' ' };
            let letter = (b'A' + oi as u8) as char;
            let _ = writeln!(out, "   {} {}) {}", marker, letter, option);
        }
    }
    out
}
