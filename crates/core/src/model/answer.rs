use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::model::{QuestionId, UnitId};

/// A user's current answer: an option index or free text.
///
/// Serialized untagged, so the backend sees a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(u32),
    Text(String),
}

impl AnswerValue {
    #[must_use]
    pub fn as_choice(&self) -> Option<u32> {
        match self {
            Self::Choice(index) => Some(*index),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Choice(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choice(index) => write!(f, "{index}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Composite key of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerKey {
    pub unit: UnitId,
    pub question: QuestionId,
}

impl AnswerKey {
    #[must_use]
    pub fn new(unit: UnitId, question: QuestionId) -> Self {
        Self { unit, question }
    }

    /// Key used in the submitted `answers` object, e.g. `"sec-3-q1"`.
    #[must_use]
    pub fn wire(&self) -> String {
        format!("{}-{}", self.unit, self.question)
    }
}

/// Answers collected during a session, keyed by unit and question.
///
/// Values are not checked against the question type; the backend validates on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    by_unit: HashMap<UnitId, HashMap<QuestionId, AnswerValue>>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, overwriting any prior value. Returns the previous value.
    pub fn set(
        &mut self,
        unit: UnitId,
        question: QuestionId,
        value: AnswerValue,
    ) -> Option<AnswerValue> {
        self.by_unit.entry(unit).or_default().insert(question, value)
    }

    /// Current answer, or `None` when unanswered.
    #[must_use]
    pub fn get(&self, unit: &UnitId, question: &QuestionId) -> Option<&AnswerValue> {
        self.by_unit.get(unit).and_then(|answers| answers.get(question))
    }

    /// Number of distinct answered keys.
    #[must_use]
    pub fn count(&self) -> usize {
        self.by_unit.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear(&mut self) {
        self.by_unit.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnswerKey, &AnswerValue)> + '_ {
        self.by_unit.iter().flat_map(|(unit, answers)| {
            answers
                .iter()
                .map(move |(question, value)| (AnswerKey::new(unit.clone(), question.clone()), value))
        })
    }

    /// Flattened `{"unit-question": value}` object for the submit body.
    #[must_use]
    pub fn to_wire(&self) -> BTreeMap<String, AnswerValue> {
        self.iter()
            .map(|(key, value)| (key.wire(), value.clone()))
            .collect()
    }
}
