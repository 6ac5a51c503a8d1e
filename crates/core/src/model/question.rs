use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Fixed choices shown for true/false/not-given questions.
pub const TRUE_FALSE_NOT_GIVEN: [&str; 3] = ["TRUE", "FALSE", "NOT GIVEN"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "fill-blank", alias = "fill-in-blank")]
    FillBlank,
    #[serde(rename = "true-false-notgiven", alias = "true-false-not-given")]
    TrueFalseNotGiven,
}

/// A single question as delivered by the backend. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question", alias = "prompt", alias = "text", default)]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    /// Choices to present, in order. Empty for fill-in-the-blank questions.
    #[must_use]
    pub fn choices(&self) -> Vec<&str> {
        match self.kind {
            QuestionKind::FillBlank => Vec::new(),
            QuestionKind::TrueFalseNotGiven if self.options.is_empty() => {
                TRUE_FALSE_NOT_GIVEN.to_vec()
            }
            QuestionKind::MultipleChoice | QuestionKind::TrueFalseNotGiven => {
                self.options.iter().map(String::as_str).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_question_shapes() {
        let json = r#"[
            {"id": "q1", "question": "Where is the library?", "type": "multiple-choice",
             "options": ["North", "South"]},
            {"id": 2, "question": "The bridge opened in ____.", "type": "fill-blank"},
            {"id": "q3", "text": "Bees can see red.", "type": "true-false-not-given"}
        ]"#;
        let questions: Vec<Question> = serde_json::from_str(json).unwrap();

        assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(questions[0].choices(), vec!["North", "South"]);
        assert_eq!(questions[1].id, QuestionId::new("2"));
        assert!(questions[1].choices().is_empty());
        assert_eq!(questions[2].prompt, "Bees can see red.");
        assert_eq!(questions[2].choices(), TRUE_FALSE_NOT_GIVEN.to_vec());
    }

    #[test]
    fn unknown_question_type_is_rejected() {
        let json = r#"{"id": "q1", "question": "?", "type": "matching-headings"}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
