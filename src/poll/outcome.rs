//! Results and observations of a polling run.

use std::time::Duration;

use super::error::WaitError;

/// How a polling run ended.
///
/// A run either finds a result the condition accepts, or runs out of time.
/// Running out of time is not an error at this level: the caller decides
/// whether it is fatal ([`into_result`](PollOutcome::into_result)) or
/// recoverable ([`or_else`](PollOutcome::or_else)).
///
/// # Examples
///
/// ```rust
/// use fluentwait::PollOutcome;
/// use std::time::Duration;
///
/// let outcome = PollOutcome::TimedOut {
///     last: Some(3),
///     attempts: 4,
///     elapsed: Duration::from_secs(1),
/// };
///
/// assert!(outcome.is_timed_out());
/// assert_eq!(outcome.last_result(), Some(&3));
/// assert_eq!(outcome.or_else(|last| last.unwrap_or(0) * 10), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The condition accepted `value`.
    Fulfilled {
        /// The accepted result.
        value: T,
        /// Number of producer invocations, including the accepted one.
        attempts: u32,
        /// Simulated time spent polling.
        elapsed: Duration,
    },
    /// The timeout elapsed before the condition accepted a result.
    TimedOut {
        /// The last result the producer returned, absent if it never ran.
        last: Option<T>,
        /// Number of producer invocations.
        attempts: u32,
        /// Simulated time spent polling.
        elapsed: Duration,
    },
}

impl<T> PollOutcome<T> {
    /// Returns true if the condition accepted a result.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled { .. })
    }

    /// Returns true if the run ran out of time.
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Number of producer invocations.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Fulfilled { attempts, .. } | Self::TimedOut { attempts, .. } => *attempts,
        }
    }

    /// Simulated time spent polling.
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Fulfilled { elapsed, .. } | Self::TimedOut { elapsed, .. } => *elapsed,
        }
    }

    /// The last result observed, accepted or not.
    pub fn last_result(&self) -> Option<&T> {
        match self {
            Self::Fulfilled { value, .. } => Some(value),
            Self::TimedOut { last, .. } => last.as_ref(),
        }
    }

    /// The accepted result, discarding timed out runs.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Fulfilled { value, .. } => Some(value),
            Self::TimedOut { .. } => None,
        }
    }

    /// Treat a timed out run as [`WaitError::TimeoutExceeded`].
    pub fn into_result<E>(self) -> Result<T, WaitError<E>> {
        match self {
            Self::Fulfilled { value, .. } => Ok(value),
            Self::TimedOut {
                attempts, elapsed, ..
            } => Err(WaitError::timeout(elapsed, attempts)),
        }
    }

    /// Substitute the result of `on_timeout` for a timed out run.
    ///
    /// `on_timeout` runs exactly once, and only when the run timed out. It
    /// receives the last observed result so it can inspect partial progress.
    pub fn or_else(self, on_timeout: impl FnOnce(Option<T>) -> T) -> T {
        match self {
            Self::Fulfilled { value, .. } => value,
            Self::TimedOut { last, .. } => on_timeout(last),
        }
    }
}

/// Information about one polling iteration, passed to hooks.
#[derive(Debug, Clone)]
pub struct PollEvent<'a, T> {
    /// Which iteration just ran (1-indexed).
    pub iteration: u32,
    /// Simulated time elapsed after this iteration's delay.
    pub elapsed: Duration,
    /// The producer's result, absent when the iteration was suppressed.
    pub result: Option<&'a T>,
    /// Whether the condition accepted `result`.
    pub accepted: bool,
}

impl<T> PollEvent<'_, T> {
    /// Returns true if the iteration fell inside the suppression window.
    pub fn is_suppressed(&self) -> bool {
        self.result.is_none()
    }
}

#[cfg(test)]
mod outcome_tests {
    use super::*;

    fn fulfilled() -> PollOutcome<&'static str> {
        PollOutcome::Fulfilled {
            value: "ready",
            attempts: 2,
            elapsed: Duration::from_millis(500),
        }
    }

    fn timed_out(last: Option<&'static str>) -> PollOutcome<&'static str> {
        PollOutcome::TimedOut {
            last,
            attempts: 40,
            elapsed: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_fulfilled_accessors() {
        let outcome = fulfilled();
        assert!(outcome.is_fulfilled());
        assert!(!outcome.is_timed_out());
        assert_eq!(outcome.attempts(), 2);
        assert_eq!(outcome.elapsed(), Duration::from_millis(500));
        assert_eq!(outcome.last_result(), Some(&"ready"));
        assert_eq!(outcome.into_value(), Some("ready"));
    }

    #[test]
    fn test_timed_out_accessors() {
        let outcome = timed_out(Some("pending"));
        assert!(outcome.is_timed_out());
        assert_eq!(outcome.attempts(), 40);
        assert_eq!(outcome.last_result(), Some(&"pending"));
        assert_eq!(outcome.into_value(), None);

        assert_eq!(timed_out(None).last_result(), None);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(fulfilled().into_result::<()>(), Ok("ready"));
        assert_eq!(
            timed_out(None).into_result::<()>(),
            Err(WaitError::timeout(Duration::from_secs(10), 40))
        );
    }

    #[test]
    fn test_or_else_only_runs_on_timeout() {
        let value = fulfilled().or_else(|_| panic!("must not run"));
        assert_eq!(value, "ready");

        let mut seen = None;
        let value = timed_out(Some("pending")).or_else(|last| {
            seen = last;
            "timeout"
        });
        assert_eq!(value, "timeout");
        assert_eq!(seen, Some("pending"));
    }

    #[test]
    fn test_event_suppressed() {
        let event: PollEvent<'_, i32> = PollEvent {
            iteration: 1,
            elapsed: Duration::from_millis(250),
            result: None,
            accepted: false,
        };
        assert!(event.is_suppressed());

        let value = 7;
        let event = PollEvent {
            result: Some(&value),
            accepted: true,
            ..event
        };
        assert!(!event.is_suppressed());
    }
}
