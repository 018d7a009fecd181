//! Bounded retry with a fixed backoff
//!
//! Used for platform calls that fail transiently. Failed attempts are not
//! errors; the caller only learns whether a value was found or the budget
//! ran out.

use std::time::Duration;

/// Attempt budget and delay between attempts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Attempts are clamped to at least one
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// No delay between attempts
    #[cfg(test)]
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(20))
    }
}

/// Result of a bounded retry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retry<T> {
    /// Accepted value and the 1-based attempt that produced it
    Found { value: T, attempt: u32 },
    /// Every attempt failed
    Exhausted { attempts: u32 },
}

/// Run `attempt` until it yields a value that passes `accept`, at most
/// `policy.max_attempts()` times. Sleeps `policy.backoff()` between
/// attempts, never after the last one.
pub fn retry<T, F, P>(policy: RetryPolicy, mut attempt: F, accept: P) -> Retry<T>
where
    F: FnMut(u32) -> Option<T>,
    P: Fn(&T) -> bool,
{
    for n in 1..=policy.max_attempts {
        if let Some(value) = attempt(n) {
            if accept(&value) {
                return Retry::Found { value, attempt: n };
            }
        }

        if n < policy.max_attempts && !policy.backoff.is_zero() {
            std::thread::sleep(policy.backoff);
        }
    }

    Retry::Exhausted {
        attempts: policy.max_attempts,
    }
}
