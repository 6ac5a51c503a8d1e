use std::collections::BTreeMap;

use crate::error::PracticeError;
use crate::model::{
    AnswerValue, PracticeMode, QuestionId, ScoredResult, SessionContent, SessionKind, UnitId,
    UnitSummary,
};

/// Inputs to `SessionMachine`: user actions, timer callbacks and network completions.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Mount,
    ChooseMode(PracticeMode),
    UnitsLoaded {
        kind: SessionKind,
        result: Result<Vec<UnitSummary>, PracticeError>,
    },
    ChooseUnit(UnitId),
    ContentLoaded {
        id: UnitId,
        result: Result<SessionContent, PracticeError>,
    },
    Answer {
        unit: UnitId,
        question: QuestionId,
        value: AnswerValue,
    },
    SelectPart(usize),
    Tick(u32),
    TimerExpired,
    SubmitRequested,
    SubmitCompleted(Result<ScoredResult, PracticeError>),
    /// "Practice again" from the results screen.
    PracticeAgain,
    /// Leave unit selection or an unfinished session for the mode picker.
    Exit,
    /// Surface a non-fatal problem (e.g. audio unavailable) in the banner.
    Notify(String),
    DismissError,
    Unmount,
    SignedOut,
}

/// Side effects requested by `SessionMachine`, executed by the caller in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    ListUnits(SessionKind),
    LoadContent { kind: SessionKind, id: UnitId },
    StartTimer(u32),
    StopTimer,
    Submit(SubmitRequest),
    StopAudio,
}

/// Everything needed to post a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub kind: SessionKind,
    pub unit_id: UnitId,
    /// Flattened `{"unit-question": value}` map; unanswered questions are omitted.
    pub answers: BTreeMap<String, AnswerValue>,
    pub time_spent_secs: u32,
}
