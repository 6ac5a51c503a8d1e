mod driver;
mod service;
mod snapshot;

// Public API of the session subsystem.
pub use driver::{DriverEvent, SessionDriver, SessionIntent, TimerEvent};
pub use service::PracticeSessionService;
pub use snapshot::SessionSnapshot;
