mod event;
mod machine;
mod state;

pub use event::{SessionCommand, SessionEvent, SubmitRequest};
pub use machine::SessionMachine;
pub use state::SessionState;
