use prep_core::model::ScoredResult;

use crate::vm::format::format_timer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreTone {
    High,
    Medium,
    Low,
}

impl ScoreTone {
    /// High from 70%, medium from 50%.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 70.0 {
            Self::High
        } else if percentage >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// High from band 7, medium from band 5.5.
    #[must_use]
    pub fn from_band(band: f64) -> Self {
        if band >= 7.0 {
            Self::High
        } else if band >= 5.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::High => "score-high",
            Self::Medium => "score-medium",
            Self::Low => "score-low",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PartRowVm {
    pub label: String,
    pub score_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewRowVm {
    pub number_label: String,
    pub prompt: Option<String>,
    pub is_correct: bool,
    pub verdict: &'static str,
    pub user_answer: String,
    /// Only shown for incorrect answers.
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    pub band_label: String,
    pub score_label: String,
    pub percentage_label: String,
    pub tone: ScoreTone,
    pub time_spent_label: Option<String>,
    pub parts: Vec<PartRowVm>,
    pub reviews: Vec<ReviewRowVm>,
}

#[must_use]
pub fn map_results(result: &ScoredResult) -> ResultsVm {
    let band_label = result
        .band_score
        .map_or_else(|| "-".to_string(), format_band);

    let parts = result
        .parts
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, part)| PartRowVm {
            label: format!("Part {}: {}", index + 1, part.label),
            score_label: format!("{} / {}", part.correct, part.total),
        })
        .collect();

    let reviews = result
        .reviews
        .iter()
        .enumerate()
        .map(|(index, review)| ReviewRowVm {
            number_label: format!("Q{}", index + 1),
            prompt: review.prompt.clone(),
            is_correct: review.is_correct,
            verdict: if review.is_correct {
                "Correct"
            } else {
                "Incorrect"
            },
            user_answer: review
                .user_answer
                .as_ref()
                .map_or_else(|| "Not answered".to_string(), ToString::to_string),
            correct_answer: if review.is_correct {
                None
            } else {
                review.correct_answer.as_ref().map(ToString::to_string)
            },
            explanation: review.explanation.clone(),
        })
        .collect();

    ResultsVm {
        band_label,
        score_label: format!("{} / {}", result.correct, result.total),
        percentage_label: format!("{}%", result.percentage.round()),
        tone: ScoreTone::from_percentage(result.percentage),
        time_spent_label: result.time_spent_secs.map(format_timer),
        parts,
        reviews,
    }
}

/// Bands print with one decimal only when needed: `7`, `6.5`.
#[must_use]
pub fn format_band(band: f64) -> String {
    if band.fract() == 0.0 {
        format!("{band:.0}")
    } else {
        format!("{band:.1}")
    }
}
