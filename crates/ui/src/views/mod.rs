mod history;
mod hub;
mod login;
mod practice;
mod results;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use history::HistoryView;
pub use hub::PracticeHubView;
pub use login::LoginView;
pub use practice::{PracticeView, SessionScreen};
pub use state::{ViewError, ViewState, view_state_from_resource};
