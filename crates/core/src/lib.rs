#![forbid(unsafe_code)]

pub mod countdown;
pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use countdown::{Countdown, CountdownStep};
pub use error::PracticeError;
pub use time::Clock;
