//! The polling loop.

use std::future::Future;
use std::time::Duration;

use super::config::PollingConfiguration;
use super::error::WaitError;
use super::outcome::{PollEvent, PollOutcome};
use crate::condition::Condition;

/// Runs producers on a fixed cadence until a condition accepts their result.
///
/// Each iteration waits `delay_time`, then (outside the suppression window)
/// calls the producer once and checks the condition once. The run ends as
/// soon as a result is accepted or the elapsed time reaches the timeout, but
/// never before the producer has been called once.
/// The elapsed time is the sum of the delays, so a slow producer can overrun
/// the timeout by its own execution time plus at most one delay.
///
/// A `Poller` holds only its configuration. It can drive any number of runs,
/// concurrently or not; every run keeps its own state.
///
/// # Examples
///
/// ```rust
/// use fluentwait::{PollingConfiguration, Poller};
/// use std::convert::Infallible;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let poller = Poller::new(
///     PollingConfiguration::new()
///         .with_delay_time(Duration::from_millis(1))
///         .with_timeout(Duration::from_millis(100)),
/// );
///
/// let counter = AtomicU32::new(0);
/// let value = poller
///     .run(
///         || async { Ok::<_, Infallible>(counter.fetch_add(1, Ordering::SeqCst) + 1) },
///         |n: &u32| *n >= 3,
///     )
///     .await
///     .unwrap();
///
/// assert_eq!(value, 3);
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Poller {
    config: PollingConfiguration,
}

impl Poller {
    /// Create a poller with the given configuration.
    pub fn new(config: PollingConfiguration) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PollingConfiguration {
        &self.config
    }

    /// Poll and report how the run ended, without deciding what a timeout means.
    pub async fn poll<T, E, F, Fut, C>(
        &self,
        producer: F,
        condition: C,
    ) -> Result<PollOutcome<T>, WaitError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Condition<T>,
    {
        self.poll_with_hooks(producer, condition, |_: &PollEvent<'_, T>| {})
            .await
    }

    /// Poll, calling `on_iteration` after every iteration.
    ///
    /// The hook sees suppressed iterations too (with no result). It is
    /// synchronous and should not block; use it for logging or metrics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluentwait::{PollEvent, PollingConfiguration, Poller};
    /// use std::convert::Infallible;
    /// use std::time::Duration;
    ///
    /// # tokio_test::block_on(async {
    /// let poller = Poller::new(
    ///     PollingConfiguration::new()
    ///         .with_delay_time(Duration::from_millis(1))
    ///         .with_timeout(Duration::from_millis(10))
    ///         .with_polling_start_after(Duration::from_millis(2)),
    /// );
    ///
    /// let mut suppressed = 0;
    /// let outcome = poller
    ///     .poll_with_hooks(
    ///         || async { Ok::<_, Infallible>("ready") },
    ///         |_: &&str| true,
    ///         |event: &PollEvent<'_, &str>| {
    ///             if event.is_suppressed() {
    ///                 suppressed += 1;
    ///             }
    ///         },
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// assert!(outcome.is_fulfilled());
    /// assert_eq!(suppressed, 1);
    /// # });
    /// ```
    pub async fn poll_with_hooks<T, E, F, Fut, C, H>(
        &self,
        producer: F,
        condition: C,
        on_iteration: H,
    ) -> Result<PollOutcome<T>, WaitError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Condition<T>,
        H: FnMut(&PollEvent<'_, T>),
    {
        let run = drive(&self.config, producer, condition, on_iteration);

        #[cfg(feature = "tracing")]
        let run = {
            use tracing::Instrument as _;
            run.instrument(tracing::debug_span!(
                "fluent_wait",
                delay_ms = self.config.delay_time().as_millis() as u64,
                timeout_ms = self.config.timeout().as_millis() as u64,
                start_after_ms = self.config.polling_start_after().as_millis() as u64,
            ))
        };

        run.await
    }

    /// Poll, failing with [`WaitError::TimeoutExceeded`] if the condition never holds.
    pub async fn run<T, E, F, Fut, C>(&self, producer: F, condition: C) -> Result<T, WaitError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Condition<T>,
    {
        self.poll(producer, condition).await?.into_result()
    }

    /// Poll, returning the result of `on_timeout` if the condition never holds.
    ///
    /// `on_timeout` receives the last producer result. It is always `Some`
    /// from this loop; the `Option` matches [`PollOutcome::or_else`].
    pub async fn run_or_else<T, E, F, Fut, C, G>(
        &self,
        producer: F,
        condition: C,
        on_timeout: G,
    ) -> Result<T, WaitError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Condition<T>,
        G: FnOnce(Option<T>) -> T,
    {
        Ok(self.poll(producer, condition).await?.or_else(on_timeout))
    }
}

/// Poll with the default configuration until `condition` accepts a result.
///
/// Fails with [`WaitError::TimeoutExceeded`] after 10 seconds.
///
/// # Example
///
/// ```rust
/// use fluentwait::wait_until;
/// use std::convert::Infallible;
///
/// # tokio_test::block_on(async {
/// let value = wait_until(|| async { Ok::<_, Infallible>("test") }, |_: &&str| true)
///     .await
///     .unwrap();
/// assert_eq!(value, "test");
/// # });
/// ```
pub async fn wait_until<T, E, F, Fut, C>(producer: F, condition: C) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Condition<T>,
{
    Poller::default().run(producer, condition).await
}

/// Poll with the default configuration, falling back to `on_timeout`.
pub async fn wait_until_or_else<T, E, F, Fut, C, G>(
    producer: F,
    condition: C,
    on_timeout: G,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Condition<T>,
    G: FnOnce(Option<T>) -> T,
{
    Poller::default()
        .run_or_else(producer, condition, on_timeout)
        .await
}

async fn drive<T, E, F, Fut, C, H>(
    config: &PollingConfiguration,
    mut producer: F,
    condition: C,
    mut on_iteration: H,
) -> Result<PollOutcome<T>, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Condition<T>,
    H: FnMut(&PollEvent<'_, T>),
{
    config.validate()?;

    let delay = config.delay_time();
    let timeout = config.timeout();
    let start_after = config.polling_start_after();

    let mut elapsed = Duration::ZERO;
    let mut iteration = 0u32;
    let mut attempts = 0u32;
    let mut last: Option<T> = None;
    let mut accepted = false;

    // The producer runs at least once, even when the suppression window
    // reaches past the timeout.
    while last.is_none() || (!accepted && elapsed < timeout) {
        tokio::time::sleep(delay).await;
        elapsed = elapsed.saturating_add(delay);
        iteration = iteration.saturating_add(1);

        if elapsed < start_after {
            #[cfg(feature = "tracing")]
            tracing::trace!(iteration, elapsed_ms = elapsed.as_millis() as u64, "attempt suppressed");

            on_iteration(&PollEvent {
                iteration,
                elapsed,
                result: None,
                accepted: false,
            });
            continue;
        }

        let value = producer().await.map_err(WaitError::Producer)?;
        attempts = attempts.saturating_add(1);
        accepted = condition.check(&value);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            iteration,
            attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            accepted,
            "polled"
        );

        on_iteration(&PollEvent {
            iteration,
            elapsed,
            result: Some(&value),
            accepted,
        });
        last = Some(value);
    }

    match last {
        Some(value) if accepted => Ok(PollOutcome::Fulfilled {
            value,
            attempts,
            elapsed,
        }),
        last => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempts,
                elapsed_ms = elapsed.as_millis() as u64,
                observed = last.is_some(),
                "condition not satisfied within timeout"
            );

            Ok(PollOutcome::TimedOut {
                last,
                attempts,
                elapsed,
            })
        }
    }
}
