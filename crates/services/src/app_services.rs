use std::sync::Arc;

use crate::Clock;
use crate::api::ApiClient;
use crate::auth::{AuthService, AuthSession};
use crate::backend::{HttpPracticeBackend, PracticeBackend};
use crate::config::BackendConfig;
use crate::error::ServiceError;
use crate::history::HistoryService;
use crate::sessions::PracticeSessionService;
use crate::speech::SpeechCapability;

/// Assembles app-facing services around one shared auth session.
#[derive(Clone)]
pub struct AppServices {
    auth: AuthSession,
    auth_service: Arc<AuthService>,
    practice: Arc<PracticeSessionService>,
    history: Arc<HistoryService>,
}

impl AppServices {
    /// Build services backed by the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the HTTP client cannot be built.
    pub fn new_http(
        config: BackendConfig,
        auth: AuthSession,
        clock: Clock,
        speech: Arc<dyn SpeechCapability>,
    ) -> Result<Self, ServiceError> {
        log::info!("using practice backend at {}", config.base_url);
        let api = ApiClient::new(config, auth.clone())?;
        let backend: Arc<dyn PracticeBackend> = Arc::new(HttpPracticeBackend::new(api.clone()));
        Ok(Self::with_backend(
            backend,
            AuthService::new(api),
            clock,
            speech,
        ))
    }

    /// Build services over any backend, e.g. an in-process fake.
    #[must_use]
    pub fn with_backend(
        backend: Arc<dyn PracticeBackend>,
        auth_service: AuthService,
        clock: Clock,
        speech: Arc<dyn SpeechCapability>,
    ) -> Self {
        let auth = auth_service.session().clone();
        let practice = Arc::new(
            PracticeSessionService::new(Arc::clone(&backend), auth.clone()).with_speech(speech),
        );
        let history = Arc::new(HistoryService::new(clock, backend));
        Self {
            auth,
            auth_service: Arc::new(auth_service),
            practice,
            history,
        }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    #[must_use]
    pub fn auth_service(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth_service)
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeSessionService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }
}
