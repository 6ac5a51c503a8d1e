#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use prep_core::model::{
    FullTest, HistoryEntry, PracticeModule, PracticeUnit, Question, QuestionId, QuestionKind,
    ScoredResult, SessionContent, SessionKind, UnitId, UnitSummary,
};
use prep_core::session::SubmitRequest;
use reqwest::StatusCode;
use services::{
    AuthSession, PracticeBackend, PracticeSessionService, ServiceError, SessionDriver,
    SpeechCapability, SpeechError, speech::SpeechResultCallback,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Server,
    Unauthorized,
}

impl Failure {
    fn into_error(self) -> ServiceError {
        match self {
            Self::Server => ServiceError::Status(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Unauthorized => ServiceError::Unauthorized,
        }
    }
}

/// In-memory backend: serves fixed content and records submissions.
#[derive(Default)]
pub struct FakeBackend {
    pub load_failure: Mutex<Option<Failure>>,
    pub submit_failure: Mutex<Option<Failure>>,
    pub submissions: Mutex<Vec<SubmitRequest>>,
    pub history: Mutex<Vec<HistoryEntry>>,
    pub delay: Mutex<Option<Duration>>,
}

impl FakeBackend {
    pub fn fail_load(&self, failure: Failure) {
        *self.load_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_submit(&self, failure: Failure) {
        *self.submit_failure.lock().unwrap() = Some(failure);
    }

    pub fn submissions(&self) -> Vec<SubmitRequest> {
        self.submissions.lock().unwrap().clone()
    }

    /// Hold every load and submit for `delay` before answering.
    pub fn slow_down(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    async fn wait(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

pub fn question(id: &str, kind: QuestionKind) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: format!("Question {id}"),
        kind,
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
    }
}

pub fn unit(id: &str) -> PracticeUnit {
    PracticeUnit {
        id: UnitId::new(id),
        title: format!("Unit {id}"),
        topic: Some("Travel".into()),
        difficulty: Some("Medium".into()),
        description: None,
        body: Some(format!("Transcript for {id}.")),
        questions: vec![
            question("q1", QuestionKind::MultipleChoice),
            question("q2", QuestionKind::FillBlank),
        ],
    }
}

fn summary(id: &str) -> UnitSummary {
    UnitSummary {
        id: UnitId::new(id),
        title: format!("Unit {id}"),
        topic: None,
        difficulty: None,
        description: None,
        parts: Vec::new(),
    }
}

#[async_trait]
impl PracticeBackend for FakeBackend {
    async fn list_units(&self, kind: SessionKind) -> Result<Vec<UnitSummary>, ServiceError> {
        Ok(if kind.is_full_test() {
            vec![summary("test-1")]
        } else {
            vec![summary("sec-1"), summary("sec-3")]
        })
    }

    async fn load_content(
        &self,
        kind: SessionKind,
        id: &UnitId,
    ) -> Result<SessionContent, ServiceError> {
        self.wait().await;
        if let Some(failure) = *self.load_failure.lock().unwrap() {
            return Err(failure.into_error());
        }
        Ok(if kind.is_full_test() {
            SessionContent::Full(FullTest {
                id: id.clone(),
                title: "Full test".into(),
                parts: vec![unit("part-1"), unit("part-2")],
                declared_total: None,
            })
        } else {
            SessionContent::Single(unit(id.as_str()))
        })
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<ScoredResult, ServiceError> {
        self.wait().await;
        if let Some(failure) = *self.submit_failure.lock().unwrap() {
            return Err(failure.into_error());
        }
        self.submissions.lock().unwrap().push(request.clone());
        let correct = u32::try_from(request.answers.len()).unwrap();
        Ok(ScoredResult {
            band_score: Some(6.0),
            correct,
            total: 2,
            percentage: ScoredResult::percentage_of(correct, 2),
            time_spent_secs: Some(request.time_spent_secs),
            parts: None,
            reviews: Vec::new(),
        })
    }

    async fn history(&self, _module: PracticeModule) -> Result<Vec<HistoryEntry>, ServiceError> {
        Ok(self.history.lock().unwrap().clone())
    }
}

/// Speech engine that records calls and stays active until stopped.
#[derive(Default)]
pub struct RecordingSpeech {
    pub active: AtomicBool,
    pub plays: AtomicUsize,
    pub stops: AtomicUsize,
}

impl SpeechCapability for RecordingSpeech {
    fn play(&self, _text: &str) -> Result<(), SpeechError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
    }

    fn on_result(&self, _callback: SpeechResultCallback) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

pub fn signed_in() -> AuthSession {
    AuthSession::with_token("test-token")
}

pub fn driver(module: PracticeModule, backend: &Arc<FakeBackend>) -> (SessionDriver, AuthSession) {
    let auth = signed_in();
    let service = PracticeSessionService::new(backend.clone(), auth.clone());
    (service.start(module), auth)
}

/// Deliver the next `count` driver events, countdown callbacks and backend replies alike.
pub async fn pump(driver: &mut SessionDriver, count: usize) {
    for _ in 0..count {
        let event = driver.next_event().await.unwrap();
        driver.on_event(event);
    }
}

/// Run until every backend request the driver started has answered.
pub async fn settle(driver: &mut SessionDriver) {
    while driver.has_requests_in_flight() {
        let event = driver.next_event().await.unwrap();
        driver.on_event(event);
    }
}
