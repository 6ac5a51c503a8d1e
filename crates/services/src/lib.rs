#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod history;
pub mod sessions;
pub mod speech;
pub mod timer;

pub use prep_core::Clock;

pub use api::ApiClient;
pub use app_services::AppServices;
pub use auth::{AuthService, AuthSession, UserProfile};
pub use backend::{HttpPracticeBackend, PracticeBackend};
pub use config::BackendConfig;
pub use error::ServiceError;
pub use history::{HistoryReport, HistoryService};
pub use sessions::{
    DriverEvent, PracticeSessionService, SessionDriver, SessionIntent, SessionSnapshot, TimerEvent,
};
pub use speech::{AudioStatus, SpeechCapability, SpeechError, UnsupportedSpeech};
pub use timer::CountdownTimer;
