use serde::{Deserialize, Serialize};

use crate::model::{PracticeMode, Question, UnitId};

/// Listing entry for a unit or a full test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub id: UnitId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Part titles of a full test; empty for single units.
    #[serde(
        rename = "passages",
        alias = "sections",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parts: Vec<UnitSummary>,
}

/// A practice unit with its questions. Read-only to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeUnit {
    pub id: UnitId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reading passage text, or the listening transcript that is read aloud.
    #[serde(
        rename = "passage",
        alias = "transcript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl PracticeUnit {
    /// Paragraphs of the body, split on blank lines.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<&str> {
        self.body
            .as_deref()
            .map(|body| {
                body.split("\n\n")
                    .map(str::trim)
                    .filter(|paragraph| !paragraph.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A multi-part test answered under one timer and scored together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTest {
    pub id: UnitId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "passages", alias = "sections", default)]
    pub parts: Vec<PracticeUnit>,
    #[serde(
        rename = "totalQuestions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub declared_total: Option<u32>,
}

impl FullTest {
    /// Question count as declared by the backend, or summed over parts.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.declared_total.unwrap_or_else(|| {
            let sum: usize = self.parts.iter().map(|part| part.questions.len()).sum();
            u32::try_from(sum).unwrap_or(u32::MAX)
        })
    }
}

/// Content of a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionContent {
    Single(PracticeUnit),
    Full(FullTest),
}

impl SessionContent {
    /// Identifier sent back on submit.
    #[must_use]
    pub fn id(&self) -> &UnitId {
        match self {
            Self::Single(unit) => &unit.id,
            Self::Full(test) => &test.id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Single(unit) => &unit.title,
            Self::Full(test) => &test.title,
        }
    }

    #[must_use]
    pub fn mode(&self) -> PracticeMode {
        match self {
            Self::Single(_) => PracticeMode::SingleUnit,
            Self::Full(_) => PracticeMode::FullTest,
        }
    }

    /// Units answered in this session; a single unit is its own only part.
    #[must_use]
    pub fn parts(&self) -> &[PracticeUnit] {
        match self {
            Self::Single(unit) => std::slice::from_ref(unit),
            Self::Full(test) => &test.parts,
        }
    }

    #[must_use]
    pub fn part(&self, index: usize) -> Option<&PracticeUnit> {
        self.parts().get(index)
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        match self {
            Self::Single(unit) => u32::try_from(unit.questions.len()).unwrap_or(u32::MAX),
            Self::Full(test) => test.total_questions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_TEST: &str = r#"{
        "id": "t1",
        "title": "Academic Test 1",
        "passages": [
            {"id": "p1", "title": "Bees", "passage": "First.\n\nSecond.",
             "questions": [{"id": "q1", "question": "?", "type": "fill-blank"}]},
            {"id": "p2", "title": "Bridges", "passage": "Only.",
             "questions": [
                {"id": "q1", "question": "?", "type": "fill-blank"},
                {"id": "q2", "question": "?", "type": "true-false-notgiven"}
             ]}
        ]
    }"#;

    #[test]
    fn full_test_total_falls_back_to_part_sum() {
        let test: FullTest = serde_json::from_str(FULL_TEST).unwrap();
        assert_eq!(test.total_questions(), 3);

        let declared = FullTest {
            declared_total: Some(40),
            ..test
        };
        assert_eq!(declared.total_questions(), 40);
    }

    #[test]
    fn listening_transcript_lands_in_body() {
        let json = r#"{"id": "sec-3", "title": "Campus tour", "transcript": "Welcome.",
                       "questions": []}"#;
        let unit: PracticeUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.body.as_deref(), Some("Welcome."));
    }

    #[test]
    fn single_content_is_its_own_part() {
        let test: FullTest = serde_json::from_str(FULL_TEST).unwrap();
        let unit = test.parts[0].clone();
        let content = SessionContent::Single(unit.clone());

        assert_eq!(content.parts(), std::slice::from_ref(&unit));
        assert_eq!(content.total_questions(), 1);
        assert_eq!(unit.paragraphs(), vec!["First.", "Second."]);
        assert_eq!(SessionContent::Full(test).mode(), PracticeMode::FullTest);
    }

    #[test]
    fn full_test_summary_lists_part_titles() {
        let json = r#"{"id": 7, "title": "Test 7",
                       "sections": [{"id": "s1", "title": "Part 1"}, {"id": "s2", "title": "Part 2"}]}"#;
        let summary: UnitSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, UnitId::new("7"));
        assert_eq!(summary.parts.len(), 2);
    }
}
