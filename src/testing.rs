//! Testing utilities and helpers for fluentwait
//!
//! This module provides small building blocks for testing code that polls:
//! scripted producers, a shared call counter, assertion macros for
//! [`PollOutcome`](crate::PollOutcome), and property-based testing support.
//!
//! Polling tests are fastest on a paused tokio clock
//! (`#[tokio::test(start_paused = true)]`), where every delay completes
//! instantly but the simulated time is still observable.
//!
//! # Examples
//!
//! ```rust
//! use fluentwait::testing::sequence;
//! use fluentwait::{assert_fulfilled, PollingConfiguration, Poller};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let poller = Poller::new(PollingConfiguration::new().with_delay_time(Duration::from_millis(1)));
//!
//! let outcome = poller
//!     .poll(sequence(["starting", "starting", "ready"]), |s: &&str| *s == "ready")
//!     .await
//!     .unwrap();
//!
//! assert_fulfilled!(outcome, "ready");
//! # });
//! ```

use std::convert::Infallible;
use std::future::{ready, Ready};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A shared counter for producer invocations.
///
/// Clones share the same count, so one clone can move into a producer while
/// the test keeps another.
///
/// # Example
///
/// ```rust
/// use fluentwait::testing::CallCounter;
///
/// let counter = CallCounter::new();
/// let producer = {
///     let counter = counter.clone();
///     move || counter.increment()
/// };
///
/// let mut producer = producer;
/// assert_eq!(producer(), 1);
/// assert_eq!(producer(), 2);
/// assert_eq!(counter.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicU32>);

impl CallCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call and return the new count.
    pub fn increment(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of calls recorded so far.
    pub fn count(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// A producer returning `values` in order, then repeating the last one.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn sequence<T, I>(values: I) -> impl FnMut() -> Ready<Result<T, Infallible>>
where
    T: Clone,
    I: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    assert!(!values.is_empty(), "sequence needs at least one value");

    let mut index = 0;
    move || {
        let value = values[index.min(values.len() - 1)].clone();
        index += 1;
        ready(Ok(value))
    }
}

/// A producer that counts its calls in `counter` and always returns `value`.
pub fn counting<T: Clone>(
    counter: &CallCounter,
    value: T,
) -> impl FnMut() -> Ready<Result<T, Infallible>> {
    let counter = counter.clone();
    move || {
        counter.increment();
        ready(Ok(value.clone()))
    }
}

/// Assert that a poll outcome is fulfilled, optionally with a given value.
///
/// This macro will panic if the outcome is `TimedOut`.
///
/// # Example
///
/// ```rust
/// use fluentwait::{assert_fulfilled, PollOutcome};
/// use std::time::Duration;
///
/// let outcome = PollOutcome::Fulfilled { value: 42, attempts: 1, elapsed: Duration::ZERO };
/// assert_fulfilled!(outcome.clone());
/// assert_fulfilled!(outcome, 42);
/// ```
#[macro_export]
macro_rules! assert_fulfilled {
    ($outcome:expr) => {
        match $outcome {
            $crate::PollOutcome::Fulfilled { .. } => {}
            $crate::PollOutcome::TimedOut { last, attempts, .. } => {
                panic!(
                    "Expected Fulfilled, got TimedOut after {} attempts (last: {:?})",
                    attempts, last
                );
            }
        }
    };
    ($outcome:expr, $expected:expr) => {{
        let expected = $expected;
        match $outcome {
            $crate::PollOutcome::Fulfilled { value, .. } => {
                assert_eq!(value, expected);
            }
            $crate::PollOutcome::TimedOut { last, attempts, .. } => {
                panic!(
                    "Expected Fulfilled with {:?}, got TimedOut after {} attempts (last: {:?})",
                    expected, attempts, last
                );
            }
        }
    }};
}

/// Assert that a poll outcome timed out, optionally with a given last result.
///
/// This macro will panic if the outcome is `Fulfilled`.
///
/// # Example
///
/// ```rust
/// use fluentwait::{assert_timed_out, PollOutcome};
/// use std::time::Duration;
///
/// let outcome = PollOutcome::TimedOut { last: Some(3), attempts: 4, elapsed: Duration::ZERO };
/// assert_timed_out!(outcome.clone());
/// assert_timed_out!(outcome, Some(3));
/// ```
#[macro_export]
macro_rules! assert_timed_out {
    ($outcome:expr) => {
        match $outcome {
            $crate::PollOutcome::TimedOut { .. } => {}
            $crate::PollOutcome::Fulfilled { value, .. } => {
                panic!("Expected TimedOut, got Fulfilled: {:?}", value);
            }
        }
    };
    ($outcome:expr, $last:expr) => {{
        let expected = $last;
        match $outcome {
            $crate::PollOutcome::TimedOut { last, .. } => {
                assert_eq!(last, expected);
            }
            $crate::PollOutcome::Fulfilled { value, .. } => {
                panic!(
                    "Expected TimedOut with last result {:?}, got Fulfilled: {:?}",
                    expected, value
                );
            }
        }
    }};
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for crate::PollingConfiguration {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Valid configurations: delay 1..=500ms, up to 20 iterations, and a
    /// suppression window that may reach past the timeout.
    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use std::time::Duration;

        (1u64..=500)
            .prop_flat_map(|delay| (Just(delay), delay..=delay * 20, 0..=delay * 21))
            .prop_map(|(delay, timeout, start_after)| {
                crate::PollingConfiguration::new()
                    .with_delay_time(Duration::from_millis(delay))
                    .with_timeout(Duration::from_millis(timeout))
                    .with_polling_start_after(Duration::from_millis(start_after))
            })
            .boxed()
    }
}
