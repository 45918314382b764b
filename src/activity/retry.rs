//! Retry policy for activity fetches.
//!
//! Failures are retried immediately (no backoff) until the attempt budget is
//! spent. Only transport/response failures reach this policy; auth and
//! config problems are terminal before any request is made.

use tracing::{error, warn};

use crate::client::FetchError;

/// Total attempts per load, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// What to do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Issue `next_attempt` right away
    Retry { next_attempt: u32 },
    /// Budget spent; the failure is terminal
    GiveUp,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Decide after `attempt` (1-based) failed with `err`.
    pub fn decide(&self, attempt: u32, err: &FetchError) -> RetryDecision {
        if attempt < self.max_attempts {
            warn!(
                attempt,
                max_attempts = self.max_attempts,
                error = %err,
                "Activity fetch failed, retrying"
            );
            RetryDecision::Retry {
                next_attempt: attempt + 1,
            }
        } else {
            error!(attempt, error = %err, "Activity fetch failed, giving up");
            RetryDecision::GiveUp
        }
    }
}
