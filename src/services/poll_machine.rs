//! Bounded fixed-delay polling state machine.
//!
//! A poll loop moves `Submitted -> Polling -> {Succeeded, Failed, TimedOut}`.
//! [`PollMachine::on_result`] is the pure transition function: given the
//! current [`PollAttempt`] and the interpretation of one status-check
//! response, it either schedules the next attempt or settles the loop. The
//! async driver in [`SolveAdapter`](super::SolveAdapter) only adds timing,
//! cancellation and I/O around it.

use std::time::Duration;

use crate::domain::models::{PollAttempt, PollConfig, SolveOutcome, SolveResult, TaskHandle};

/// What to do after a status-check response.
#[derive(Debug, Clone, PartialEq)]
pub enum PollTransition {
    /// Still computing: wait one interval, then check again.
    Continue(PollAttempt),
    /// The loop is over.
    Finished(SolveOutcome),
}

/// Fixed-delay, bounded retry policy for status checks.
///
/// The delay between checks is constant; there is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollMachine {
    interval: Duration,
    max_attempts: u32,
}

impl Default for PollMachine {
    fn default() -> Self {
        Self::from_config(&PollConfig::default())
    }
}

impl PollMachine {
    /// Create a machine; `max_attempts` is raised to at least 1.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &PollConfig) -> Self {
        Self::new(Duration::from_millis(config.interval_ms), config.max_attempts)
    }

    /// Delay before every status check.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The attempt a new loop starts with (`Submitted -> Polling`).
    pub const fn start(&self, handle: TaskHandle) -> PollAttempt {
        PollAttempt::first(handle, self.max_attempts)
    }

    /// Apply one status-check result to the current attempt.
    pub fn on_result(&self, attempt: &PollAttempt, result: SolveResult) -> PollTransition {
        match result {
            SolveResult::Ok(plans) => PollTransition::Finished(SolveOutcome::Succeeded { plans }),
            SolveResult::Error(failure) => {
                PollTransition::Finished(SolveOutcome::Failed { failure })
            }
            SolveResult::Pending => {
                let next = attempt.next();
                if next.is_exhausted() {
                    PollTransition::Finished(SolveOutcome::TimedOut {
                        attempts: next.attempt_number,
                    })
                } else {
                    PollTransition::Continue(next)
                }
            }
        }
    }
}
