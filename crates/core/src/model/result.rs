use crate::model::{AnswerValue, QuestionId, UnitId};

/// Backend-scored outcome of a submission. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    /// Band score on the 0-9 scale, when the backend computed one.
    pub band_score: Option<f64>,
    pub correct: u32,
    pub total: u32,
    pub percentage: f64,
    pub time_spent_secs: Option<u32>,
    /// Per-part rows; only present when the backend sent a breakdown.
    pub parts: Option<Vec<PartBreakdown>>,
    pub reviews: Vec<QuestionReview>,
}

impl ScoredResult {
    /// `correct / total` as a rounded percentage; zero when there were no questions.
    #[must_use]
    pub fn percentage_of(correct: u32, total: u32) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (f64::from(correct) / f64::from(total) * 100.0).round()
    }
}

/// Score for one part of a full test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartBreakdown {
    pub part_id: Option<UnitId>,
    pub label: String,
    pub correct: u32,
    pub total: u32,
}

/// Per-question feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub question_id: Option<QuestionId>,
    pub prompt: Option<String>,
    pub is_correct: bool,
    pub user_answer: Option<AnswerValue>,
    pub correct_answer: Option<AnswerValue>,
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest_whole() {
        assert_eq!(ScoredResult::percentage_of(2, 3), 67.0);
        assert_eq!(ScoredResult::percentage_of(13, 13), 100.0);
        assert_eq!(ScoredResult::percentage_of(0, 0), 0.0);
    }
}
