//! Retry policy for webhook delivery.

use std::time::Duration;

/// Bounded retry behavior for webhook delivery.
///
/// Controls how many attempts are made and how long to wait between them.
/// Delays follow an exponential backoff capped at `max_delay`, unless an
/// explicit `schedule` is set, in which case the n-th retry waits
/// `schedule[n]` (the last entry repeats once the schedule runs out).
///
/// # Defaults
///
/// - `max_attempts`: 3
/// - `initial_delay`: 5 seconds
/// - `max_delay`: 60 seconds
/// - `multiplier`: 2.0
/// - `schedule`: empty (exponential backoff)
///
/// # Example
///
/// ```
/// use teams_notify::webhook::RetryPolicy;
/// use std::time::Duration;
///
/// let exponential = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_initial_delay(Duration::from_secs(1))
///     .with_multiplier(1.5);
///
/// let fixed = RetryPolicy::new()
///     .with_schedule(vec![Duration::from_secs(2), Duration::from_secs(10)]);
/// assert_eq!(fixed.delay_for_retry(5), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    ///
    /// A value of 1 means no retries; only the initial attempt is made.
    pub max_attempts: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Upper bound for any delay, including server `Retry-After` hints.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,

    /// Explicit per-retry delays; overrides the exponential backoff when
    /// non-empty.
    pub schedule: Vec<Duration>,
}

impl RetryPolicy {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default initial delay (5 seconds).
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(5);

    /// Default maximum delay (60 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
            schedule: Vec::new(),
        }
    }

    /// Sets the maximum number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is less than 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(
            max_attempts >= Self::MIN_MAX_ATTEMPTS,
            "max_attempts must be at least 1"
        );
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the initial delay between retries.
    ///
    /// Zero delay is supported (useful for testing with [`InstantSleeper`])
    /// but creates a tight retry loop against a real webhook.
    ///
    /// [`InstantSleeper`]: crate::time::InstantSleeper
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the delay multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not positive (must be > 0.0).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Sets an explicit backoff schedule.
    ///
    /// An empty schedule restores exponential backoff.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Vec<Duration>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Computes the delay for a given retry number (0-indexed).
    ///
    /// `retry` 0 is the delay before the first retry. Exponential delays
    /// are capped at `max_delay`; scheduled delays are used as given.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if let Some(last) = self.schedule.last() {
            let index = usize::try_from(retry).unwrap_or(usize::MAX);
            return self.schedule.get(index).copied().unwrap_or(*last);
        }

        // Retry values are small; saturate rather than wrap for absurd inputs
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let delay_secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Computes the delay for a retry, honoring a server hint.
    ///
    /// A `Retry-After` hint replaces the computed backoff but is still
    /// capped at `max_delay`.
    #[must_use]
    pub fn delay_with_hint(&self, retry: u32, hint: Option<Duration>) -> Duration {
        hint.map_or_else(
            || self.delay_for_retry(retry),
            |h| h.min(self.max_delay),
        )
    }

    /// Returns true if another attempt may follow attempt number `attempt`.
    ///
    /// `attempt` is 1-based: 1 is the initial attempt.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
