use chrono::Duration;
use prep_core::model::{
    AnswerValue, HistoryEntry, PartBreakdown, PracticeMode, PracticeModule, QuestionId, QuestionReview,
    ScoredResult, SessionContent, SessionKind, UnitId, UnitSummary,
};
use prep_core::session::SessionState;
use prep_core::time::fixed_now;
use services::{ServiceError, SessionSnapshot};

use super::test_harness::{FakeBackend, ViewKind, setup_view_harness, unit};

fn snapshot(state: SessionState) -> SessionSnapshot {
    SessionSnapshot {
        state,
        ..SessionSnapshot::idle(PracticeModule::Listening)
    }
}

#[tokio::test(flavor = "current_thread")]
async fn hub_lists_both_modules() {
    let mut harness = setup_view_harness(ViewKind::Hub, FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Listening"), "missing listening in {html}");
    assert!(html.contains("Start Reading"), "missing reading in {html}");
    assert!(!html.contains("You are signed out"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mode_select_offers_single_and_full() {
    let view = ViewKind::Screen(snapshot(SessionState::ModeSelect));
    let mut harness = setup_view_harness(view, FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Single section"), "missing single mode in {html}");
    assert!(html.contains("Full test"), "missing full mode in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unit_list_renders_titles() {
    let mut state = snapshot(SessionState::ContentSelect {
        kind: SessionKind::new(PracticeModule::Listening, PracticeMode::SingleUnit),
        loading: false,
    });
    state.units = vec![UnitSummary {
        id: UnitId::new("sec-3"),
        title: "Hotel booking".into(),
        topic: Some("Travel".into()),
        difficulty: Some("Easy".into()),
        description: None,
        parts: Vec::new(),
    }];
    let mut harness = setup_view_harness(ViewKind::Screen(state), FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Hotel booking"), "missing title in {html}");
    assert!(html.contains("Travel | Easy"), "missing meta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn collecting_shows_timer_progress_and_questions() {
    let state = snapshot(SessionState::Collecting {
        content: SessionContent::Single(unit("sec-3")),
        remaining_secs: 600,
        part_index: 0,
    });
    let mut harness = setup_view_harness(ViewKind::Screen(state), FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("10:00"), "missing timer in {html}");
    assert!(html.contains("Answered: 0 / 2"), "missing progress in {html}");
    assert!(html.contains("Where is the hotel?"), "missing prompt in {html}");
    assert!(html.contains("Play Audio"), "missing audio control in {html}");
    assert!(html.contains("Submit Answers"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn collecting_reading_shows_passage_instead_of_audio() {
    let mut state = snapshot(SessionState::Collecting {
        content: SessionContent::Single(unit("p-1")),
        remaining_secs: 45,
        part_index: 0,
    });
    state.module = PracticeModule::Reading;
    state.answers.set(
        UnitId::new("p-1"),
        QuestionId::new("q2"),
        AnswerValue::Text("Smith".into()),
    );
    let mut harness = setup_view_harness(ViewKind::Screen(state), FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Second paragraph."), "missing passage in {html}");
    assert!(!html.contains("Play Audio"), "unexpected audio in {html}");
    assert!(html.contains("0:45"), "missing timer in {html}");
    assert!(html.contains("Answered: 1 / 2"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_render_parts_and_review() {
    let state = snapshot(SessionState::Results(ScoredResult {
        band_score: None,
        correct: 1,
        total: 2,
        percentage: 50.0,
        time_spent_secs: Some(412),
        parts: Some(vec![PartBreakdown {
            part_id: None,
            label: "Hotel booking".into(),
            correct: 1,
            total: 2,
        }]),
        reviews: vec![QuestionReview {
            question_id: Some(QuestionId::new("q1")),
            prompt: None,
            is_correct: false,
            user_answer: None,
            correct_answer: Some(AnswerValue::Text("Smith".into())),
            explanation: Some("Spelled out in the recording.".into()),
        }],
    }));
    let mut harness = setup_view_harness(ViewKind::Screen(state), FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Your Results"), "missing heading in {html}");
    assert!(html.contains("Part 1: Hotel booking"), "missing part row in {html}");
    assert!(html.contains("1 / 2"), "missing score in {html}");
    assert!(html.contains("6:52"), "missing time in {html}");
    assert!(html.contains("Not answered"), "missing unanswered in {html}");
    assert!(html.contains("Correct answer: Smith"), "missing correct answer in {html}");
    assert!(html.contains("Practice Again"), "missing practice again in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn error_banner_is_dismissable() {
    let mut state = snapshot(SessionState::ModeSelect);
    state.error = Some("Failed to submit answers: network error: timed out".into());
    let mut harness = setup_view_harness(ViewKind::Screen(state), FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Failed to submit answers"), "missing banner in {html}");
    assert!(html.contains("Dismiss"), "missing dismiss in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_renders_stats_and_rows() {
    let backend = FakeBackend::default();
    *backend.history.lock().unwrap() = vec![
        HistoryEntry {
            id: None,
            title: Some("Coral reefs".into()),
            band_score: Some(7.0),
            score: Some(11),
            total_questions: Some(13),
            time_spent: Some(900),
            created_at: Some(fixed_now() - Duration::days(1)),
        },
        HistoryEntry {
            id: None,
            title: None,
            band_score: Some(6.0),
            score: None,
            total_questions: None,
            time_spent: None,
            created_at: Some(fixed_now() - Duration::days(30)),
        },
    ];
    let mut harness = setup_view_harness(ViewKind::History(PracticeModule::Reading), backend);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Reading History"), "missing title in {html}");
    assert!(html.contains("Coral reefs"), "missing row in {html}");
    assert!(html.contains("Band 7"), "missing band in {html}");
    assert!(html.contains("6.5"), "missing average in {html}");
    assert!(html.contains("1 this week"), "missing recent count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_redirects_to_login_when_unauthorized() {
    let backend = FakeBackend::default();
    *backend.history_failure.lock().unwrap() = Some(ServiceError::Unauthorized);
    let mut harness = setup_view_harness(ViewKind::History(PracticeModule::Listening), backend);
    harness.rebuild();
    // Resource resolves, the effect navigates, then the router re-renders.
    for _ in 0..4 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Login screen"), "expected login route in {html}");
    assert!(!html.contains("Listening History"), "history still rendered in {html}");
}
