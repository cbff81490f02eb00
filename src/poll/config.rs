//! Polling configuration types.

use std::time::Duration;

/// Delay between two polling iterations when none is configured.
pub const DEFAULT_DELAY_TIME: Duration = Duration::from_millis(250);

/// Total polling time when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Suppression window when none is configured (no suppression).
pub const DEFAULT_POLLING_START_AFTER: Duration = Duration::ZERO;

/// The cadence and bounds of a polling run.
///
/// A configuration is pure data: it describes how a run behaves but does not
/// execute anything, so it can be cloned, compared and reused across runs.
///
/// - `delay_time`: wait before every iteration (must be non-zero)
/// - `timeout`: total simulated time after which the run gives up (must be non-zero)
/// - `polling_start_after`: iterations whose elapsed time is below this value
///   skip the producer, although their delay still counts toward the timeout
///
/// # Examples
///
/// ```rust
/// use fluentwait::PollingConfiguration;
/// use std::time::Duration;
///
/// let config = PollingConfiguration::new()
///     .with_delay_time(Duration::from_millis(100))
///     .with_timeout(Duration::from_secs(1));
///
/// assert_eq!(config.max_iterations(), 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollingConfiguration {
    delay_time: Duration,
    timeout: Duration,
    polling_start_after: Duration,
}

impl Default for PollingConfiguration {
    fn default() -> Self {
        Self {
            delay_time: DEFAULT_DELAY_TIME,
            timeout: DEFAULT_TIMEOUT,
            polling_start_after: DEFAULT_POLLING_START_AFTER,
        }
    }
}

impl PollingConfiguration {
    /// Create a configuration with the default cadence (250ms delay, 10s timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay awaited before each iteration.
    pub fn with_delay_time(mut self, delay_time: Duration) -> Self {
        self.delay_time = delay_time;
        self
    }

    /// Set the total polling time.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the suppression window.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentwait::PollingConfiguration;
    /// use std::time::Duration;
    ///
    /// let config = PollingConfiguration::new()
    ///     .with_delay_time(Duration::from_secs(1))
    ///     .with_timeout(Duration::from_secs(5))
    ///     .with_polling_start_after(Duration::from_secs(2));
    ///
    /// // The first two delays elapse before the producer is called.
    /// assert_eq!(config.first_attempt_after(), Duration::from_secs(2));
    /// ```
    pub fn with_polling_start_after(mut self, polling_start_after: Duration) -> Self {
        self.polling_start_after = polling_start_after;
        self
    }

    /// Get the delay between iterations.
    pub fn delay_time(&self) -> Duration {
        self.delay_time
    }

    /// Get the total polling time.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the suppression window.
    pub fn polling_start_after(&self) -> Duration {
        self.polling_start_after
    }

    /// Number of iterations a run performs when the condition never holds.
    ///
    /// Every iteration adds `delay_time` to the elapsed time and the run stops
    /// once the elapsed time reaches `timeout`, so this is
    /// `ceil(timeout / delay_time)`. Returns 0 for a zero delay.
    pub fn max_iterations(&self) -> u32 {
        let delay = self.delay_time.as_nanos();
        if delay == 0 {
            return 0;
        }
        let iterations = self.timeout.as_nanos().div_ceil(delay);
        u32::try_from(iterations).unwrap_or(u32::MAX)
    }

    /// Elapsed time of the first iteration that calls the producer.
    ///
    /// This is the smallest multiple of `delay_time` that is at least
    /// `polling_start_after` (and at least one delay).
    pub fn first_attempt_after(&self) -> Duration {
        let delay = self.delay_time.as_nanos();
        if delay == 0 {
            return self.polling_start_after;
        }
        let ticks = self.polling_start_after.as_nanos().div_ceil(delay).max(1);
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.delay_time.saturating_mul(ticks)
    }

    /// Check the invariants a run relies on.
    ///
    /// A zero delay would spin without ever advancing the elapsed time, and a
    /// zero timeout would end the run before the first attempt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_time.is_zero() {
            Err(ConfigError::ZeroDelay)
        } else if self.timeout.is_zero() {
            Err(ConfigError::ZeroTimeout)
        } else {
            Ok(())
        }
    }
}

/// A partial configuration: every unset field falls back to a default.
///
/// The defaults come from an explicit [`PollingConfiguration`] passed to
/// [`resolve`](PollingOptions::resolve), so an application can keep its own
/// defaults without touching any global state.
///
/// # Examples
///
/// ```rust
/// use fluentwait::{PollingConfiguration, PollingOptions};
/// use std::time::Duration;
///
/// let app_defaults = PollingConfiguration::new().with_timeout(Duration::from_secs(30));
///
/// let config = PollingOptions::new()
///     .delay_time(Duration::from_millis(500))
///     .resolve(&app_defaults);
///
/// assert_eq!(config.delay_time(), Duration::from_millis(500));
/// assert_eq!(config.timeout(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PollingOptions {
    /// Delay between iterations, if overridden.
    pub delay_time: Option<Duration>,
    /// Total polling time, if overridden.
    pub timeout: Option<Duration>,
    /// Suppression window, if overridden.
    pub polling_start_after: Option<Duration>,
}

impl PollingOptions {
    /// Options with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the delay between iterations.
    pub fn delay_time(mut self, delay_time: Duration) -> Self {
        self.delay_time = Some(delay_time);
        self
    }

    /// Override the total polling time.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the suppression window.
    pub fn polling_start_after(mut self, polling_start_after: Duration) -> Self {
        self.polling_start_after = Some(polling_start_after);
        self
    }

    /// Fill the unset fields from `defaults`.
    pub fn resolve(&self, defaults: &PollingConfiguration) -> PollingConfiguration {
        PollingConfiguration {
            delay_time: self.delay_time.unwrap_or(defaults.delay_time),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            polling_start_after: self
                .polling_start_after
                .unwrap_or(defaults.polling_start_after),
        }
    }
}

impl From<PollingOptions> for PollingConfiguration {
    fn from(options: PollingOptions) -> Self {
        options.resolve(&PollingConfiguration::default())
    }
}

impl From<PollingConfiguration> for PollingOptions {
    fn from(config: PollingConfiguration) -> Self {
        Self {
            delay_time: Some(config.delay_time),
            timeout: Some(config.timeout),
            polling_start_after: Some(config.polling_start_after),
        }
    }
}

/// A configuration that cannot drive a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// `delay_time` is zero.
    ZeroDelay,
    /// `timeout` is zero.
    ZeroTimeout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDelay => write!(f, "delay time must be greater than zero"),
            Self::ZeroTimeout => write!(f, "timeout must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
