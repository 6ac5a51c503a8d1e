use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use prep_core::model::{
    HistoryEntry, PracticeModule, PracticeUnit, Question, QuestionId, QuestionKind, ScoredResult,
    SessionContent, SessionKind, UnitId, UnitSummary,
};
use prep_core::session::SubmitRequest;
use prep_core::time::fixed_clock;
use services::{
    ApiClient, AuthService, AuthSession, BackendConfig, HistoryService, PracticeBackend,
    PracticeSessionService, ServiceError, SessionSnapshot,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{HistoryView, PracticeHubView, SessionScreen};

/// Serves fixed content; history can be swapped per test.
#[derive(Default)]
pub struct FakeBackend {
    pub history: Mutex<Vec<HistoryEntry>>,
    pub history_failure: Mutex<Option<ServiceError>>,
}

pub fn unit(id: &str) -> PracticeUnit {
    PracticeUnit {
        id: UnitId::new(id),
        title: format!("Unit {id}"),
        topic: None,
        difficulty: None,
        description: None,
        body: Some("First paragraph.\n\nSecond paragraph.".into()),
        questions: vec![
            Question {
                id: QuestionId::new("q1"),
                prompt: "Where is the hotel?".into(),
                kind: QuestionKind::MultipleChoice,
                options: vec!["North".into(), "South".into()],
            },
            Question {
                id: QuestionId::new("q2"),
                prompt: "Guest surname".into(),
                kind: QuestionKind::FillBlank,
                options: Vec::new(),
            },
        ],
    }
}

#[async_trait]
impl PracticeBackend for FakeBackend {
    async fn list_units(&self, _kind: SessionKind) -> Result<Vec<UnitSummary>, ServiceError> {
        Ok(Vec::new())
    }

    async fn load_content(
        &self,
        _kind: SessionKind,
        id: &UnitId,
    ) -> Result<SessionContent, ServiceError> {
        Ok(SessionContent::Single(unit(id.as_str())))
    }

    async fn submit(&self, _request: &SubmitRequest) -> Result<ScoredResult, ServiceError> {
        Err(ServiceError::Decode("not scored in view tests".into()))
    }

    async fn history(&self, _module: PracticeModule) -> Result<Vec<HistoryEntry>, ServiceError> {
        if let Some(err) = self.history_failure.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.history.lock().unwrap().clone())
    }
}

struct TestApp {
    auth: AuthSession,
    auth_service: Arc<AuthService>,
    practice: Arc<PracticeSessionService>,
    history: Arc<HistoryService>,
}

impl UiApp for TestApp {
    fn auth(&self) -> AuthSession {
        self.auth.clone()
    }

    fn auth_service(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth_service)
    }

    fn practice(&self) -> Arc<PracticeSessionService> {
        Arc::clone(&self.practice)
    }

    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Hub,
    History(PracticeModule),
    Screen(SessionSnapshot),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
}

#[component]
fn Login() -> Element {
    rsx! { p { "Login screen" } }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Hub => rsx! { PracticeHubView {} },
        ViewKind::History(module) => rsx! { HistoryView { module } },
        ViewKind::Screen(snapshot) => rsx! {
            SessionScreen { snapshot, on_intent: move |_| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<FakeBackend>,
    pub auth: AuthSession,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: FakeBackend) -> ViewHarness {
    let backend = Arc::new(backend);
    let auth = AuthSession::with_token("view-token");
    let api = ApiClient::new(BackendConfig::default(), auth.clone()).expect("http client");
    let app = Arc::new(TestApp {
        auth: auth.clone(),
        auth_service: Arc::new(AuthService::new(api)),
        practice: Arc::new(PracticeSessionService::new(backend.clone(), auth.clone())),
        history: Arc::new(HistoryService::new(fixed_clock(), backend.clone())),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, backend, auth }
}
