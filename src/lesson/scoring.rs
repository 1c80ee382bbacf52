//! Quiz scoring and badge eligibility

use std::collections::BTreeMap;

use crate::content::QuizQuestion;

/// Share of questions that must be correct to earn the badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassingThreshold {
    ratio: f64,
}

impl Default for PassingThreshold {
    fn default() -> Self {
        Self { ratio: 0.75 }
    }
}

impl PassingThreshold {
    /// Create a threshold; the ratio is clamped to [0, 1]
    pub fn new(ratio: f64) -> Self {
        if ratio.is_nan() {
            return Self::default();
        }
        Self { ratio: ratio.clamp(0.0, 1.0) }
    }

    /// Correct answers needed out of `total`
    pub fn required(&self, total: usize) -> usize {
        // Tolerance keeps 0.7 * 10 at 7 rather than 7.000000000000001
        let exact = self.ratio * total as f64;
        ((exact - 1e-9).ceil().max(0.0) as usize).min(total)
    }

    pub fn is_met(&self, score: usize, total: usize) -> bool {
        score >= self.required(total)
    }
}

/// Count questions whose recorded answer is the correct option
pub fn score(questions: &[QuizQuestion], answers: &BTreeMap<u32, usize>) -> usize {
    questions.iter().filter(|q| answers.get(&q.id).is_some_and(|&a| q.is_correct(a))).count()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::content::Curriculum;

    #[test]
    fn three_of_four_required_by_default() {
        assert_eq!(PassingThreshold::default().required(4), 3);
    }

    #[test]
    fn threshold_scales_with_question_count() {
        let threshold = PassingThreshold::default();
        assert_eq!(threshold.required(8), 6);
        assert_eq!(threshold.required(5), 4);
        assert_eq!(threshold.required(1), 1);
        assert_eq!(PassingThreshold::new(0.7).required(10), 7);
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(PassingThreshold::new(2.0).required(4), 4);
        assert_eq!(PassingThreshold::new(-1.0).required(4), 0);
        assert_eq!(PassingThreshold::new(f64::NAN), PassingThreshold::default());
    }

    #[test]
    fn unanswered_questions_score_nothing() {
        let curriculum = Curriculum::satellites();
        assert_eq!(score(curriculum.questions(), &BTreeMap::new()), 0);
    }

    proptest! {
        #[test]
        fn score_counts_matching_answers(choices in proptest::collection::vec(0usize..4, 4)) {
            let curriculum = Curriculum::satellites();
            let questions = curriculum.questions();
            let answers: BTreeMap<u32, usize> =
                questions.iter().zip(&choices).map(|(q, &c)| (q.id, c)).collect();

            let expected =
                questions.iter().zip(&choices).filter(|(q, c)| q.correct_index == **c).count();
            let total = score(questions, &answers);

            prop_assert_eq!(total, expected);
            prop_assert_eq!(PassingThreshold::default().is_met(total, questions.len()), total >= 3);
        }
    }
}
