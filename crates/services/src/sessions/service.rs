use std::sync::Arc;

use prep_core::model::PracticeModule;

use crate::auth::AuthSession;
use crate::backend::PracticeBackend;
use crate::speech::{SpeechCapability, UnsupportedSpeech};

use super::driver::SessionDriver;

/// Shared factory for practice screens; hands out one driver per screen.
#[derive(Clone)]
pub struct PracticeSessionService {
    backend: Arc<dyn PracticeBackend>,
    auth: AuthSession,
    speech: Arc<dyn SpeechCapability>,
}

impl PracticeSessionService {
    #[must_use]
    pub fn new(backend: Arc<dyn PracticeBackend>, auth: AuthSession) -> Self {
        Self {
            backend,
            auth,
            speech: Arc::new(UnsupportedSpeech),
        }
    }

    #[must_use]
    pub fn with_speech(mut self, speech: Arc<dyn SpeechCapability>) -> Self {
        self.speech = speech;
        self
    }

    #[must_use]
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// New driver for `module`. Call `mount` before handling intents.
    #[must_use]
    pub fn start(&self, module: PracticeModule) -> SessionDriver {
        SessionDriver::new(
            module,
            Arc::clone(&self.backend),
            self.auth.clone(),
            Arc::clone(&self.speech),
        )
    }
}
