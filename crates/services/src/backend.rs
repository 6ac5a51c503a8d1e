//! Content loading and submission against the practice REST API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};

use prep_core::model::{
    AnswerValue, FullTest, HistoryEntry, PartBreakdown, PracticeModule, PracticeUnit,
    QuestionId, QuestionReview, ScoredResult, SessionContent, SessionKind, UnitId, UnitSummary,
};
use prep_core::session::SubmitRequest;

use crate::api::ApiClient;
use crate::error::ServiceError;

/// Remote operations a practice session depends on.
#[async_trait]
pub trait PracticeBackend: Send + Sync {
    /// Units (or full tests) available for `kind`.
    async fn list_units(&self, kind: SessionKind) -> Result<Vec<UnitSummary>, ServiceError>;

    async fn load_content(
        &self,
        kind: SessionKind,
        id: &UnitId,
    ) -> Result<SessionContent, ServiceError>;

    /// Send answers for scoring. The backend owns scoring and band computation.
    async fn submit(&self, request: &SubmitRequest) -> Result<ScoredResult, ServiceError>;

    async fn history(&self, module: PracticeModule) -> Result<Vec<HistoryEntry>, ServiceError>;
}

/// `PracticeBackend` over HTTP.
#[derive(Clone, Debug)]
pub struct HttpPracticeBackend {
    api: ApiClient,
}

impl HttpPracticeBackend {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PracticeBackend for HttpPracticeBackend {
    async fn list_units(&self, kind: SessionKind) -> Result<Vec<UnitSummary>, ServiceError> {
        let module = kind.module;
        let (path, key) = if kind.is_full_test() {
            (format!("{module}/full-tests"), "tests")
        } else {
            (
                format!("{module}/{}", module.unit_collection()),
                module.unit_collection(),
            )
        };
        let body: Value = self.api.get_json(&path).await?;
        take_field(body, key)
    }

    async fn load_content(
        &self,
        kind: SessionKind,
        id: &UnitId,
    ) -> Result<SessionContent, ServiceError> {
        let module = kind.module;
        if kind.is_full_test() {
            let body: Value = self.api.get_json(&format!("{module}/full-tests/{id}")).await?;
            let test: FullTest = take_field(body, "test")?;
            Ok(SessionContent::Full(test))
        } else {
            let path = format!("{module}/{}/{id}", module.unit_collection());
            let body: Value = self.api.get_json(&path).await?;
            let unit: PracticeUnit = take_field(body, module.unit_noun())?;
            Ok(SessionContent::Single(unit))
        }
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<ScoredResult, ServiceError> {
        let module = request.kind.module;
        if request.kind.is_full_test() {
            let body: Value = self
                .api
                .post_json(&format!("{module}/full-tests/submit"), &submit_body(request))
                .await?;
            let score: ScoreBody = take_field(body, "results")?;
            Ok(score.into_result(request))
        } else {
            let body: Value = self
                .api
                .post_json(&format!("{module}/submit"), &submit_body(request))
                .await?;
            let score: ScoreBody = decode(body)?;
            Ok(score.into_result(request))
        }
    }

    async fn history(&self, module: PracticeModule) -> Result<Vec<HistoryEntry>, ServiceError> {
        let body: Value = self.api.get_json(&format!("{module}/history")).await?;
        take_field(body, "sessions")
    }
}

/// `{sectionId|passageId|testId, answers, timeSpent}`.
#[must_use]
pub fn submit_body(request: &SubmitRequest) -> Value {
    let id_field = if request.kind.is_full_test() {
        "testId"
    } else {
        request.kind.module.submit_id_field()
    };
    let mut body = Map::new();
    body.insert(id_field.into(), Value::String(request.unit_id.to_string()));
    body.insert("answers".into(), json!(request.answers));
    body.insert("timeSpent".into(), Value::from(request.time_spent_secs));
    Value::Object(body)
}

fn take_field<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T, ServiceError> {
    let field = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ServiceError::Decode(format!("missing `{key}` in response")))?;
    decode(field)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|err| ServiceError::Decode(err.to_string()))
}

// ─── Wire shapes ───────────────────────────────────────────────────────────

/// Score payload of both submit endpoints. Single-unit responses use `score` and
/// a per-question `results` array; full tests use `totalCorrect` and part rows.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    #[serde(alias = "band", default, deserialize_with = "lenient_band")]
    band_score: Option<f64>,
    #[serde(default)]
    score: Option<u32>,
    #[serde(default)]
    total_correct: Option<u32>,
    #[serde(default)]
    total_questions: Option<u32>,
    #[serde(default)]
    percentage: Option<f64>,
    #[serde(default)]
    time_spent: Option<u32>,
    #[serde(alias = "passageResults", alias = "sectionResults", default)]
    part_results: Option<Vec<PartBody>>,
    #[serde(default)]
    results: Vec<ReviewBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartBody {
    #[serde(alias = "passageId", alias = "sectionId", default)]
    part_id: Option<UnitId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    correct: u32,
    #[serde(default)]
    total: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewBody {
    #[serde(alias = "id", default)]
    question_id: Option<QuestionId>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    is_correct: bool,
    #[serde(default, deserialize_with = "lenient_answer")]
    user_answer: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient_answer")]
    correct_answer: Option<AnswerValue>,
    #[serde(default)]
    explanation: Option<String>,
}

impl ScoreBody {
    fn into_result(self, request: &SubmitRequest) -> ScoredResult {
        let correct = self.total_correct.or(self.score).unwrap_or(0);
        let total = self.total_questions.unwrap_or_else(|| {
            u32::try_from(self.results.len()).unwrap_or(u32::MAX)
        });
        let percentage = self
            .percentage
            .unwrap_or_else(|| ScoredResult::percentage_of(correct, total));
        let parts = self.part_results.map(|rows| {
            rows.into_iter()
                .map(|row| PartBreakdown {
                    part_id: row.part_id,
                    label: row.title.unwrap_or_default(),
                    correct: row.correct,
                    total: row.total,
                })
                .collect()
        });
        let reviews = self
            .results
            .into_iter()
            .map(|row| QuestionReview {
                question_id: row.question_id,
                prompt: row.question,
                is_correct: row.is_correct,
                user_answer: row.user_answer,
                correct_answer: row.correct_answer,
                explanation: row.explanation,
            })
            .collect();

        ScoredResult {
            band_score: self.band_score,
            correct,
            total,
            percentage,
            time_spent_secs: self.time_spent.or(Some(request.time_spent_secs)),
            parts,
            reviews,
        }
    }
}

/// Accept a band as a number, a numeric string, or null.
fn lenient_band<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBand {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawBand>::deserialize(deserializer)? {
        Some(RawBand::Number(band)) => Some(band),
        Some(RawBand::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Review answers are display-only: any JSON scalar is kept, rendered as text when it is
/// not an option index, so an odd row never discards the score.
fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<AnswerValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(AnswerValue::Text(text)),
        Value::Number(number) => Some(
            number
                .as_u64()
                .and_then(|index| u32::try_from(index).ok())
                .map_or_else(|| AnswerValue::Text(number.to_string()), AnswerValue::Choice),
        ),
        Value::Bool(flag) => Some(AnswerValue::Text(flag.to_string())),
        other @ (Value::Array(_) | Value::Object(_)) => Some(AnswerValue::Text(other.to_string())),
    })
}
