//! Error types for polling runs.

use std::time::Duration;

use super::config::ConfigError;

/// A required builder field that was never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingField {
    /// No producer was supplied.
    Producer,
    /// No condition was supplied.
    Condition,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Producer => write!(f, "producer"),
            Self::Condition => write!(f, "condition"),
        }
    }
}

/// Error returned when a polling run fails.
///
/// `E` is the producer's own error type. Producer errors are never retried:
/// the first one ends the run and is handed back as [`WaitError::Producer`].
///
/// # Examples
///
/// ```rust
/// use fluentwait::{PollingConfiguration, Poller, WaitError};
/// use std::convert::Infallible;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let poller = Poller::new(
///     PollingConfiguration::new()
///         .with_delay_time(Duration::from_millis(1))
///         .with_timeout(Duration::from_millis(3)),
/// );
///
/// let result = poller
///     .run(|| async { Ok::<_, Infallible>(0) }, |n: &i32| *n > 0)
///     .await;
///
/// match result {
///     Err(WaitError::TimeoutExceeded { attempts, .. }) => assert_eq!(attempts, 3),
///     _ => panic!("Expected timeout"),
/// }
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitError<E> {
    /// A required field was not set before executing a builder.
    MissingConfiguration(MissingField),
    /// The polling configuration cannot drive a run.
    InvalidConfiguration(ConfigError),
    /// The condition never held and no timeout action was supplied.
    TimeoutExceeded {
        /// Simulated time spent polling.
        elapsed: Duration,
        /// Number of producer invocations.
        attempts: u32,
    },
    /// The producer failed.
    Producer(E),
}

impl<E> WaitError<E> {
    /// Create a timeout error.
    pub fn timeout(elapsed: Duration, attempts: u32) -> Self {
        Self::TimeoutExceeded { elapsed, attempts }
    }

    /// Returns true if the run timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutExceeded { .. })
    }

    /// Returns true if a builder was executed without a required field.
    pub fn is_missing_configuration(&self) -> bool {
        matches!(self, Self::MissingConfiguration(_))
    }

    /// Returns true if the producer failed.
    pub fn is_producer(&self) -> bool {
        matches!(self, Self::Producer(_))
    }

    /// Get the producer error if present.
    pub fn into_producer_error(self) -> Option<E> {
        match self {
            Self::Producer(e) => Some(e),
            _ => None,
        }
    }

    /// Transform the producer error.
    pub fn map_producer<E2>(self, f: impl FnOnce(E) -> E2) -> WaitError<E2> {
        match self {
            Self::MissingConfiguration(field) => WaitError::MissingConfiguration(field),
            Self::InvalidConfiguration(e) => WaitError::InvalidConfiguration(e),
            Self::TimeoutExceeded { elapsed, attempts } => {
                WaitError::TimeoutExceeded { elapsed, attempts }
            }
            Self::Producer(e) => WaitError::Producer(f(e)),
        }
    }
}

impl<E> From<ConfigError> for WaitError<E> {
    fn from(error: ConfigError) -> Self {
        Self::InvalidConfiguration(error)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for WaitError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingConfiguration(field) => {
                write!(f, "missing configuration: a {} must be provided", field)
            }
            Self::InvalidConfiguration(e) => write!(f, "invalid polling configuration: {}", e),
            Self::TimeoutExceeded { elapsed, attempts } => write!(
                f,
                "the condition was not satisfied within the timeout period ({:?}, {} attempts)",
                elapsed, attempts
            ),
            Self::Producer(e) => write!(f, "{}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for WaitError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration(e) => Some(e),
            Self::Producer(e) => Some(e),
            Self::MissingConfiguration(_) | Self::TimeoutExceeded { .. } => None,
        }
    }
}
