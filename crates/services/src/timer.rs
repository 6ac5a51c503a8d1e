use std::time::Duration;

use prep_core::{Countdown, CountdownStep};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

/// One-second countdown running on the tokio runtime.
///
/// At most one countdown runs per timer: `start` replaces the running one, and the
/// task is aborted when the timer is stopped or dropped, so callbacks never fire
/// after teardown.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    task: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count down from `duration_secs`.
    ///
    /// `on_tick` receives the remaining seconds after each second; `on_expire` fires
    /// once when the count reaches zero, after which the task ends. A zero duration
    /// expires immediately.
    pub fn start<T, E>(&mut self, duration_secs: u32, mut on_tick: T, on_expire: E)
    where
        T: FnMut(u32) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        self.stop();
        let task = tokio::spawn(async move {
            let mut countdown = Countdown::new(duration_secs);
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut on_expire = Some(on_expire);

            loop {
                if countdown.remaining() > 0 {
                    interval.tick().await;
                }
                match countdown.tick() {
                    CountdownStep::Running(remaining) => on_tick(remaining),
                    CountdownStep::Expired => {
                        if let Some(expire) = on_expire.take() {
                            expire();
                        }
                        return;
                    }
                    CountdownStep::Finished => return,
                }
            }
        });
        self.task = Some(task);
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
