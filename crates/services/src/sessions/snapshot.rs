use prep_core::model::{AnswerMap, PracticeMode, PracticeModule, UnitSummary};
use prep_core::session::SessionState;

use crate::speech::AudioStatus;

/// Everything a practice screen renders, captured after each driver step.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub module: PracticeModule,
    pub mode: Option<PracticeMode>,
    pub state: SessionState,
    pub units: Vec<UnitSummary>,
    pub answers: AnswerMap,
    pub error: Option<String>,
    pub requires_login: bool,
    pub audio: AudioStatus,
    pub loading: bool,
}

impl SessionSnapshot {
    /// Snapshot of a screen that has not mounted yet.
    #[must_use]
    pub fn idle(module: PracticeModule) -> Self {
        Self {
            module,
            mode: None,
            state: SessionState::Idle,
            units: Vec::new(),
            answers: AnswerMap::new(),
            error: None,
            requires_login: false,
            audio: AudioStatus::Idle,
            loading: false,
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.state.remaining_secs()
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.count()
    }

    /// Questions in the loaded content, zero outside a session.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.state
            .content()
            .map_or(0, prep_core::model::SessionContent::total_questions)
    }
}
