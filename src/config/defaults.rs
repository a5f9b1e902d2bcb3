//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default per-attempt timeout in seconds.
pub const TIMEOUT_SECS: u64 = 5;

/// Default maximum number of delivery attempts.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default initial retry delay in seconds.
pub const RETRY_INITIAL_DELAY_SECS: u64 = 5;

/// Default maximum retry delay in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 60;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    Duration::from_secs(RETRY_INITIAL_DELAY_SECS)
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_secs(RETRY_MAX_DELAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::{ClientConfig, RetryPolicy};

    #[test]
    fn defaults_agree_with_library() {
        let policy = RetryPolicy::default();

        assert_eq!(timeout(), ClientConfig::DEFAULT_TIMEOUT);
        assert_eq!(policy.max_attempts, RETRY_MAX_ATTEMPTS);
        assert_eq!(policy.initial_delay, retry_initial_delay());
        assert_eq!(policy.max_delay, retry_max_delay());
        assert!((policy.multiplier - RETRY_MULTIPLIER).abs() < f64::EPSILON);
    }
}
