//! Backoff computation for transient failures.
//!
//! The retry loop itself lives in [`ZammadClient::call`](crate::zammad_client::ZammadClient::call);
//! this module only decides how long to wait between attempts.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

/// Retry and backoff parameters, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub backoff_initial: Duration,
    /// Upper bound for any computed or server-requested delay.
    pub backoff_max: Duration,
    /// Jitter fraction; the delay is widened by a uniform +/- `jitter * delay`.
    pub jitter: f64,
}

impl RetryPolicy {
    /// Total attempts, first one included.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// `min(backoff_max, backoff_initial * 2^attempt)`, before jitter.
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 2f64.powi(attempt.min(62) as i32);
        let secs = self.backoff_initial.as_secs_f64() * factor;
        if !secs.is_finite() || secs >= self.backoff_max.as_secs_f64() {
            self.backoff_max
        } else {
            Duration::from_secs_f64(secs)
        }
    }

    /// Delay before the retry following the failed `attempt` (0-indexed).
    ///
    /// A server-supplied `retry_after` replaces the computed value and is only
    /// capped at `backoff_max`; otherwise the exponential delay gets jitter and
    /// is floored at zero.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(requested) = retry_after {
            return requested.min(self.backoff_max);
        }

        let base_delay = self.base_delay(attempt);
        if self.jitter <= 0.0 || base_delay.is_zero() {
            return base_delay;
        }

        let base = base_delay.as_secs_f64();
        let delta = base * self.jitter;
        let jittered = base + rand::thread_rng().gen_range(-delta..=delta);
        Duration::try_from_secs_f64(jittered.max(0.0)).unwrap_or(self.backoff_max)
    }
}

/// Parses a `Retry-After` value: delta-seconds or an HTTP-date.
///
/// Dates in the past yield a zero delay. Unparseable values yield `None`.
#[must_use]
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();

    if let Ok(secs) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    let date = DateTime::parse_from_rfc2822(value).ok()?;
    let wait = date.with_timezone(&Utc) - now;
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}
