use std::sync::Arc;

use services::{AuthService, AuthSession, HistoryService, PracticeSessionService};

/// Services the UI needs, supplied by the composition root (`crates/app`).
pub trait UiApp: Send + Sync {
    fn auth(&self) -> AuthSession;
    fn auth_service(&self) -> Arc<AuthService>;
    fn practice(&self) -> Arc<PracticeSessionService>;
    fn history(&self) -> Arc<HistoryService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: AuthSession,
    auth_service: Arc<AuthService>,
    practice: Arc<PracticeSessionService>,
    history: Arc<HistoryService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            auth_service: app.auth_service(),
            practice: app.practice(),
            history: app.history(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.auth.is_signed_in()
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
