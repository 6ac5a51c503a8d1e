use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;

use prep_core::PracticeError;
use prep_core::model::{
    AnswerMap, AnswerValue, PracticeMode, PracticeModule, QuestionId, UnitId,
};
use prep_core::session::{SessionCommand, SessionEvent, SessionMachine, SessionState};

use crate::auth::AuthSession;
use crate::backend::PracticeBackend;
use crate::error::ServiceError;
use crate::speech::{AudioStatus, SpeechCapability};
use crate::timer::CountdownTimer;

use super::snapshot::SessionSnapshot;

/// User actions on a practice screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    ChooseMode(PracticeMode),
    ChooseUnit(UnitId),
    Answer {
        unit: UnitId,
        question: QuestionId,
        value: AnswerValue,
    },
    SelectPart(usize),
    Submit,
    PracticeAgain,
    Exit,
    DismissError,
    PlayAudio,
    StopAudio,
}

/// Countdown callback, tagged with the timer run that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { generation: u64, remaining: u32 },
    Expired { generation: u64 },
}

impl TimerEvent {
    #[must_use]
    pub fn generation(self) -> u64 {
        match self {
            Self::Tick { generation, .. } | Self::Expired { generation } => generation,
        }
    }
}

/// Something the driver is waiting on has happened.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Timer(TimerEvent),
    /// A backend call finished; carries the event that feeds its result back.
    Completed(SessionEvent),
}

/// Runs a `SessionMachine` against the backend, the countdown and the speech engine.
///
/// Intents are handled synchronously: backend calls are started, not awaited, so the
/// state after each step (loading, submitting) is observable and the user can still
/// act while a request is in flight. The owner awaits `next_event` and hands each
/// result to `on_event`. Events from a stopped or replaced countdown are discarded
/// by generation.
pub struct SessionDriver {
    machine: SessionMachine,
    backend: Arc<dyn PracticeBackend>,
    auth: AuthSession,
    speech: Arc<dyn SpeechCapability>,
    timer: CountdownTimer,
    generation: u64,
    timer_tx: mpsc::UnboundedSender<TimerEvent>,
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
    in_flight: FuturesUnordered<BoxFuture<'static, SessionEvent>>,
    audio: AudioStatus,
}

impl SessionDriver {
    #[must_use]
    pub fn new(
        module: PracticeModule,
        backend: Arc<dyn PracticeBackend>,
        auth: AuthSession,
        speech: Arc<dyn SpeechCapability>,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            machine: SessionMachine::new(module),
            backend,
            auth,
            speech,
            timer: CountdownTimer::new(),
            generation: 0,
            timer_tx,
            timer_rx,
            in_flight: FuturesUnordered::new(),
            audio: AudioStatus::Idle,
        }
    }

    #[must_use]
    pub fn module(&self) -> PracticeModule {
        self.machine.module()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        self.machine.answers()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Whether a backend call started by the machine has not reported back yet.
    #[must_use]
    pub fn has_requests_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Enter mode selection, or route to login when no token is held.
    pub fn mount(&mut self) {
        info!("practice screen mounted for {}", self.module());
        self.apply(SessionEvent::Mount);
        if !self.auth.is_signed_in() {
            self.apply(SessionEvent::SignedOut);
        }
    }

    pub fn handle(&mut self, intent: SessionIntent) {
        let event = match intent {
            SessionIntent::ChooseMode(mode) => SessionEvent::ChooseMode(mode),
            SessionIntent::ChooseUnit(id) => SessionEvent::ChooseUnit(id),
            SessionIntent::Answer {
                unit,
                question,
                value,
            } => SessionEvent::Answer {
                unit,
                question,
                value,
            },
            SessionIntent::SelectPart(index) => SessionEvent::SelectPart(index),
            SessionIntent::Submit => SessionEvent::SubmitRequested,
            SessionIntent::PracticeAgain => SessionEvent::PracticeAgain,
            SessionIntent::Exit => SessionEvent::Exit,
            SessionIntent::DismissError => SessionEvent::DismissError,
            SessionIntent::PlayAudio => {
                self.play_audio();
                return;
            }
            SessionIntent::StopAudio => {
                self.stop_audio();
                return;
            }
        };
        self.apply(event);
    }

    /// Next countdown callback or finished backend call. Cancel-safe, so it can sit in
    /// a `select!` loop next to user input.
    pub async fn next_event(&mut self) -> Option<DriverEvent> {
        let in_flight = &mut self.in_flight;
        let timer_rx = &mut self.timer_rx;
        tokio::select! {
            Some(event) = in_flight.next(), if !in_flight.is_empty() => {
                Some(DriverEvent::Completed(event))
            }
            Some(event) = timer_rx.recv() => Some(DriverEvent::Timer(event)),
            else => None,
        }
    }

    pub fn on_event(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::Timer(event) => self.on_timer_event(event),
            DriverEvent::Completed(event) => self.apply(event),
        }
    }

    pub fn on_timer_event(&mut self, event: TimerEvent) {
        if event.generation() != self.generation {
            debug!("dropping stale timer event {event:?}");
            return;
        }
        match event {
            TimerEvent::Tick { remaining, .. } => self.apply(SessionEvent::Tick(remaining)),
            TimerEvent::Expired { .. } => {
                info!("time is up; submitting");
                self.apply(SessionEvent::TimerExpired);
            }
        }
    }

    /// Tear down: stops the countdown and audio, cancels requests in flight and forgets
    /// the session.
    pub fn unmount(&mut self) {
        self.in_flight.clear();
        let commands = self.machine.handle(SessionEvent::Unmount);
        for command in commands {
            match command {
                SessionCommand::StopTimer => self.stop_timer(),
                SessionCommand::StopAudio => self.stop_audio(),
                other => debug!("ignoring {other:?} during unmount"),
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            module: self.machine.module(),
            mode: self.machine.mode(),
            state: self.machine.state().clone(),
            units: self.machine.units().to_vec(),
            answers: self.machine.answers().clone(),
            error: self.machine.error().map(str::to_owned),
            requires_login: self.machine.requires_login(),
            audio: self.audio_status(),
            loading: self.machine.is_loading(),
        }
    }

    /// Read the current listening transcript aloud.
    ///
    /// An unavailable speech engine is reported in the error banner.
    pub fn play_audio(&mut self) {
        if !self.module().has_audio() || self.audio_status() == AudioStatus::Playing {
            return;
        }
        let SessionState::Collecting { .. } = self.machine.state() else {
            return;
        };
        let Some(text) = self
            .machine
            .state()
            .current_part()
            .and_then(|part| part.body.clone())
        else {
            self.machine
                .handle(SessionEvent::Notify("No audio available for this section".into()));
            return;
        };

        match self.speech.play(&text) {
            Ok(()) => self.audio = AudioStatus::Playing,
            Err(err) => {
                warn!("audio playback unavailable: {err}");
                self.machine.handle(SessionEvent::Notify(err.to_string()));
            }
        }
    }

    pub fn stop_audio(&mut self) {
        if self.audio == AudioStatus::Playing {
            self.speech.stop();
            self.audio = AudioStatus::Played;
        }
    }

    fn audio_status(&self) -> AudioStatus {
        if self.audio == AudioStatus::Playing && !self.speech.is_active() {
            AudioStatus::Played
        } else {
            self.audio
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        let from = self.machine.state().name();
        let commands = self.machine.handle(event);
        let to = self.machine.state().name();
        if from != to {
            debug!("session {from} -> {to}");
        }
        for command in commands {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::ListUnits(kind) => {
                let backend = Arc::clone(&self.backend);
                let auth = self.auth.clone();
                self.in_flight.push(
                    async move {
                        let result = backend.list_units(kind).await;
                        SessionEvent::UnitsLoaded {
                            kind,
                            result: settle(&auth, result, "list units"),
                        }
                    }
                    .boxed(),
                );
            }
            SessionCommand::LoadContent { kind, id } => {
                let backend = Arc::clone(&self.backend);
                let auth = self.auth.clone();
                self.in_flight.push(
                    async move {
                        let result = backend.load_content(kind, &id).await;
                        SessionEvent::ContentLoaded {
                            result: settle(&auth, result, "load content"),
                            id,
                        }
                    }
                    .boxed(),
                );
            }
            SessionCommand::StartTimer(duration) => {
                info!("starting {duration}s session for {}", self.module());
                self.audio = AudioStatus::Idle;
                self.start_timer(duration);
            }
            SessionCommand::StopTimer => self.stop_timer(),
            SessionCommand::StopAudio => self.stop_audio(),
            SessionCommand::Submit(request) => {
                info!(
                    "submitting {} answers for {} after {}s",
                    request.answers.len(),
                    request.unit_id,
                    request.time_spent_secs
                );
                let backend = Arc::clone(&self.backend);
                let auth = self.auth.clone();
                self.in_flight.push(
                    async move {
                        let result = backend.submit(&request).await;
                        SessionEvent::SubmitCompleted(settle(&auth, result, "submit"))
                    }
                    .boxed(),
                );
            }
        }
    }

    fn start_timer(&mut self, duration_secs: u32) {
        self.generation += 1;
        let generation = self.generation;
        let tick_tx = self.timer_tx.clone();
        let expire_tx = self.timer_tx.clone();
        self.timer.start(
            duration_secs,
            move |remaining| {
                let _ = tick_tx.send(TimerEvent::Tick {
                    generation,
                    remaining,
                });
            },
            move || {
                let _ = expire_tx.send(TimerEvent::Expired { generation });
            },
        );
    }

    fn stop_timer(&mut self) {
        self.timer.stop();
        self.generation += 1;
    }
}

/// Map a backend failure into the machine's taxonomy, signing out on auth errors.
fn settle<T>(
    auth: &AuthSession,
    result: Result<T, ServiceError>,
    action: &str,
) -> Result<T, PracticeError> {
    result.map_err(|err| {
        warn!("{action} failed: {err}");
        if err.is_auth() {
            auth.clear();
        }
        PracticeError::from(err)
    })
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.stop_audio();
    }
}
