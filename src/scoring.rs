use crate::models::{AnswerMap, Quiz};

/// Points subtracted per wrong answer when negative marking is on.
pub const NEGATIVE_MARKING_PENALTY: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub final_score: f64,
}

impl ScoreResult {
    pub fn unanswered_count(&self, total: usize) -> usize {
        total.saturating_sub(self.correct_count + self.incorrect_count)
    }

    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.correct_count as f64 * 100.0 / total as f64
        }
    }
}

/// Answers keyed past the end of the quiz are ignored; unanswered questions
/// count towards neither total. The score is not clamped at zero.
pub fn score(quiz: &Quiz, answers: &AnswerMap, negative_marking: bool) -> ScoreResult {
    let mut correct_count = 0;
    let mut incorrect_count = 0;

    for (i, question) in quiz.questions().iter().enumerate() {
        match answers.get(&i) {
            Some(answer) if answer == question.correct_answer() => correct_count += 1,
            Some(_) => incorrect_count += 1,
            None => {}
        }
    }

    let final_score = if negative_marking {
        correct_count as f64 - NEGATIVE_MARKING_PENALTY * incorrect_count as f64
    } else {
        correct_count as f64
    };

    ScoreResult {
        correct_count,
        incorrect_count,
        final_score,
    }
}
