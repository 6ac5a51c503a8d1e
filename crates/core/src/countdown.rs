//! One-second countdown arithmetic, independent of any scheduler.

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still running; carries the seconds left.
    Running(u32),
    /// Reached zero on this tick. Reported exactly once.
    Expired,
    /// Ticked after expiry; nothing to report.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    expiry_reported: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            expiry_reported: false,
        }
    }

    /// Advance by one second.
    ///
    /// A countdown of length `d` yields `Running(d - 1)` .. `Running(1)`, then `Expired`
    /// on tick `d`, then `Finished` forever. A zero-length countdown expires on its
    /// first tick.
    pub fn tick(&mut self) -> CountdownStep {
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining > 0 {
                return CountdownStep::Running(self.remaining);
            }
        }
        if self.expiry_reported {
            CountdownStep::Finished
        } else {
            self.expiry_reported = true;
            CountdownStep::Expired
        }
    }

    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.duration - self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expiry_reported
    }
}
