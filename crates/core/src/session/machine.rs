use crate::error::PracticeError;
use crate::model::{
    AnswerMap, PracticeMode, PracticeModule, SessionContent, SessionKind, UnitId, UnitSummary,
};

use super::event::{SessionCommand, SessionEvent, SubmitRequest};
use super::state::SessionState;

/// Timed practice flow for one screen: mode → unit → timed answers → submit → results.
///
/// The machine performs no I/O. Every event returns the commands the caller must run
/// (fetch, start/stop the timer, submit), and their outcomes come back as events.
/// Events that do not apply to the current state are ignored, which is what makes late
/// network responses and stale timer callbacks harmless.
#[derive(Debug, Clone)]
pub struct SessionMachine {
    module: PracticeModule,
    state: SessionState,
    answers: AnswerMap,
    units: Vec<UnitSummary>,
    kind: Option<SessionKind>,
    pending_unit: Option<UnitId>,
    duration_secs: u32,
    submission_in_flight: bool,
    error: Option<String>,
    requires_login: bool,
}

impl SessionMachine {
    #[must_use]
    pub fn new(module: PracticeModule) -> Self {
        Self {
            module,
            state: SessionState::Idle,
            answers: AnswerMap::new(),
            units: Vec::new(),
            kind: None,
            pending_unit: None,
            duration_secs: 0,
            submission_in_flight: false,
            error: None,
            requires_login: false,
        }
    }

    #[must_use]
    pub fn module(&self) -> PracticeModule {
        self.module
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Units listed for the chosen mode.
    #[must_use]
    pub fn units(&self) -> &[UnitSummary] {
        &self.units
    }

    #[must_use]
    pub fn kind(&self) -> Option<SessionKind> {
        self.kind
    }

    #[must_use]
    pub fn mode(&self) -> Option<PracticeMode> {
        self.kind.map(|kind| kind.mode)
    }

    /// Countdown length of the current session, zero before a unit is loaded.
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn requires_login(&self) -> bool {
        self.requires_login
    }

    #[must_use]
    pub fn submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::ContentSelect { loading: true, .. })
    }

    /// Apply one event and return the commands it requires.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionCommand> {
        match event {
            SessionEvent::Mount => self.mount(),
            SessionEvent::ChooseMode(mode) => self.choose_mode(mode),
            SessionEvent::UnitsLoaded { kind, result } => self.units_loaded(kind, result),
            SessionEvent::ChooseUnit(id) => self.choose_unit(id),
            SessionEvent::ContentLoaded { id, result } => self.content_loaded(&id, result),
            SessionEvent::Answer {
                unit,
                question,
                value,
            } => {
                if matches!(self.state, SessionState::Collecting { .. }) {
                    self.answers.set(unit, question, value);
                }
                Vec::new()
            }
            SessionEvent::SelectPart(index) => {
                if let SessionState::Collecting {
                    content,
                    part_index,
                    ..
                } = &mut self.state
                    && index < content.parts().len()
                {
                    *part_index = index;
                }
                Vec::new()
            }
            SessionEvent::Tick(remaining) => {
                if let SessionState::Collecting { remaining_secs, .. }
                | SessionState::Submitting { remaining_secs, .. } = &mut self.state
                {
                    *remaining_secs = remaining;
                }
                Vec::new()
            }
            SessionEvent::TimerExpired => {
                if let SessionState::Collecting { remaining_secs, .. } = &mut self.state {
                    *remaining_secs = 0;
                    return self.begin_submit();
                }
                Vec::new()
            }
            SessionEvent::SubmitRequested => self.begin_submit(),
            SessionEvent::SubmitCompleted(result) => self.submit_completed(result),
            SessionEvent::PracticeAgain => {
                if matches!(self.state, SessionState::Results(_)) {
                    return self.reset(SessionState::ModeSelect);
                }
                Vec::new()
            }
            SessionEvent::Exit => {
                if matches!(
                    self.state,
                    SessionState::ContentSelect { .. } | SessionState::Collecting { .. }
                ) {
                    return self.reset(SessionState::ModeSelect);
                }
                Vec::new()
            }
            SessionEvent::Notify(message) => {
                self.error = Some(message);
                Vec::new()
            }
            SessionEvent::DismissError => {
                self.error = None;
                Vec::new()
            }
            SessionEvent::Unmount => self.reset(SessionState::Idle),
            SessionEvent::SignedOut => self.sign_out(),
        }
    }

    fn mount(&mut self) -> Vec<SessionCommand> {
        if matches!(self.state, SessionState::Idle) {
            self.requires_login = false;
            self.state = SessionState::ModeSelect;
        }
        Vec::new()
    }

    fn choose_mode(&mut self, mode: PracticeMode) -> Vec<SessionCommand> {
        if !matches!(self.state, SessionState::ModeSelect) {
            return Vec::new();
        }
        let kind = SessionKind::new(self.module, mode);
        self.kind = Some(kind);
        self.units.clear();
        self.error = None;
        self.state = SessionState::ContentSelect {
            kind,
            loading: true,
        };
        vec![SessionCommand::ListUnits(kind)]
    }

    fn units_loaded(
        &mut self,
        kind: SessionKind,
        result: Result<Vec<UnitSummary>, PracticeError>,
    ) -> Vec<SessionCommand> {
        let listing = matches!(
            self.state,
            SessionState::ContentSelect { kind: current, loading: true } if current == kind
        );
        if !listing || self.pending_unit.is_some() {
            return Vec::new();
        }
        self.set_loading(false);
        match result {
            Ok(units) => {
                self.units = units;
                Vec::new()
            }
            Err(err) if err.is_auth() => self.sign_out(),
            Err(err) => {
                self.error = Some(format!(
                    "Failed to load {}s: {err}",
                    self.module.unit_noun()
                ));
                Vec::new()
            }
        }
    }

    fn choose_unit(&mut self, id: UnitId) -> Vec<SessionCommand> {
        let SessionState::ContentSelect {
            kind,
            loading: false,
        } = self.state
        else {
            return Vec::new();
        };
        self.pending_unit = Some(id.clone());
        self.error = None;
        self.set_loading(true);
        vec![SessionCommand::LoadContent { kind, id }]
    }

    fn content_loaded(
        &mut self,
        id: &UnitId,
        result: Result<SessionContent, PracticeError>,
    ) -> Vec<SessionCommand> {
        let SessionState::ContentSelect { kind, .. } = self.state else {
            return Vec::new();
        };
        if self.pending_unit.as_ref() != Some(id) {
            return Vec::new();
        }
        self.pending_unit = None;
        self.set_loading(false);

        match result {
            Ok(content) => {
                let duration = kind.duration_secs();
                self.answers.clear();
                self.duration_secs = duration;
                self.submission_in_flight = false;
                self.state = SessionState::Collecting {
                    content,
                    remaining_secs: duration,
                    part_index: 0,
                };
                vec![SessionCommand::StartTimer(duration)]
            }
            Err(err) if err.is_auth() => self.sign_out(),
            Err(err) => {
                self.error = Some(format!("Failed to load {}: {err}", self.module.unit_noun()));
                Vec::new()
            }
        }
    }

    /// Shared by the submit button and timer expiry; the in-flight flag makes the
    /// second trigger a no-op.
    fn begin_submit(&mut self) -> Vec<SessionCommand> {
        if self.submission_in_flight {
            return Vec::new();
        }
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        let SessionState::Collecting {
            content,
            remaining_secs,
            ..
        } = state
        else {
            self.state = state;
            return Vec::new();
        };

        self.submission_in_flight = true;
        let request = SubmitRequest {
            kind: SessionKind::new(self.module, content.mode()),
            unit_id: content.id().clone(),
            answers: self.answers.to_wire(),
            time_spent_secs: self.duration_secs.saturating_sub(remaining_secs),
        };
        self.state = SessionState::Submitting {
            content,
            remaining_secs,
        };
        vec![SessionCommand::StopAudio, SessionCommand::Submit(request)]
    }

    fn submit_completed(
        &mut self,
        result: Result<crate::model::ScoredResult, PracticeError>,
    ) -> Vec<SessionCommand> {
        if !self.submission_in_flight || !self.state.is_submitting() {
            return Vec::new();
        }
        self.submission_in_flight = false;

        match result {
            Ok(result) => {
                self.error = None;
                self.state = SessionState::Results(result);
                vec![SessionCommand::StopTimer]
            }
            Err(err) if err.is_auth() => self.sign_out(),
            Err(err) => {
                self.error = Some(format!("Failed to submit answers: {err}"));
                self.state = self.kind.map_or(SessionState::ModeSelect, |kind| {
                    SessionState::ContentSelect {
                        kind,
                        loading: false,
                    }
                });
                vec![SessionCommand::StopTimer]
            }
        }
    }

    fn sign_out(&mut self) -> Vec<SessionCommand> {
        let commands = self.reset(SessionState::Idle);
        self.requires_login = true;
        self.error = Some(PracticeError::Auth.to_string());
        commands
    }

    fn reset(&mut self, next: SessionState) -> Vec<SessionCommand> {
        self.answers.clear();
        self.units.clear();
        self.kind = None;
        self.pending_unit = None;
        self.duration_secs = 0;
        self.submission_in_flight = false;
        self.error = None;
        self.state = next;
        vec![SessionCommand::StopTimer, SessionCommand::StopAudio]
    }

    fn set_loading(&mut self, value: bool) {
        if let SessionState::ContentSelect { loading, .. } = &mut self.state {
            *loading = value;
        }
    }
}
