//! Fluent configuration of a polling run.
//!
//! [`WaitBuilder`] collects a producer, a condition, a polling configuration
//! and an optional timeout action through chained setters, then hands them to
//! [`Poller`]. It adds no behavior of its own beyond checking that the
//! producer and the condition were set.
//!
//! # Example
//!
//! ```rust
//! use fluentwait::{PollingConfiguration, WaitBuilder};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let result = WaitBuilder::new()
//!     .with_sync_producer(|| Ok::<_, std::convert::Infallible>(Some(42)))
//!     .with_condition(|value: &Option<i32>| value.is_some())
//!     .with_polling_configuration(
//!         PollingConfiguration::new().with_delay_time(Duration::from_millis(1)),
//!     )
//!     .with_timeout_action(|_| None)
//!     .execute()
//!     .await;
//!
//! assert_eq!(result, Ok(Some(42)));
//! # });
//! ```

use std::convert::Infallible;
use std::fmt;
use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};

use crate::condition::Condition;
use crate::poll::{
    MissingField, PollEvent, PollOutcome, Poller, PollingConfiguration, PollingOptions, WaitError,
};

type BoxedProducer<'a, T, E> = Box<dyn FnMut() -> BoxFuture<'a, Result<T, E>> + Send + 'a>;
type BoxedCondition<'a, T> = Box<dyn Condition<T> + 'a>;
type BoxedTimeoutAction<'a, T> = Box<dyn FnOnce(Option<T>) -> T + Send + 'a>;
type BoxedHook<'a, T> = Box<dyn FnMut(&PollEvent<'_, T>) + Send + 'a>;

/// Builder for a single polling run.
///
/// Every setter consumes and returns the builder, so calls chain. Setting a
/// field twice keeps the last value. [`execute`](WaitBuilder::execute)
/// consumes the builder: one builder configures exactly one run.
///
/// `E` is the producer's error type and defaults to [`Infallible`].
pub struct WaitBuilder<'a, T, E = Infallible> {
    producer: Option<BoxedProducer<'a, T, E>>,
    condition: Option<BoxedCondition<'a, T>>,
    config: PollingConfiguration,
    on_timeout: Option<BoxedTimeoutAction<'a, T>>,
    on_iteration: Option<BoxedHook<'a, T>>,
}

impl<'a, T, E> WaitBuilder<'a, T, E> {
    /// Create an empty builder with the default polling configuration.
    pub fn new() -> Self {
        Self {
            producer: None,
            condition: None,
            config: PollingConfiguration::default(),
            on_timeout: None,
            on_iteration: None,
        }
    }

    /// Set the asynchronous producer called on each unsuppressed iteration.
    pub fn with_producer<F, Fut>(mut self, mut producer: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, E>> + Send + 'a,
    {
        self.producer = Some(Box::new(move || producer().boxed()));
        self
    }

    /// Set a synchronous producer.
    pub fn with_sync_producer<F>(mut self, mut producer: F) -> Self
    where
        F: FnMut() -> Result<T, E> + Send + 'a,
        T: Send + 'a,
        E: Send + 'a,
    {
        self.producer = Some(Box::new(move || future::ready(producer()).boxed()));
        self
    }

    /// Set the condition that ends the run.
    pub fn with_condition<C>(mut self, condition: C) -> Self
    where
        C: Condition<T> + 'a,
    {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Set the polling configuration.
    pub fn with_polling_configuration(mut self, config: PollingConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Set a partial configuration, filling unset fields from the current one.
    pub fn with_polling_options(mut self, options: PollingOptions) -> Self {
        self.config = options.resolve(&self.config);
        self
    }

    /// Return the result of `on_timeout` instead of failing on timeout.
    pub fn with_timeout_action<G>(mut self, on_timeout: G) -> Self
    where
        G: FnOnce(Option<T>) -> T + Send + 'a,
    {
        self.on_timeout = Some(Box::new(on_timeout));
        self
    }

    /// Observe every iteration.
    pub fn on_iteration<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&PollEvent<'_, T>) + Send + 'a,
    {
        self.on_iteration = Some(Box::new(hook));
        self
    }

    /// Get the polling configuration the run will use.
    pub fn config(&self) -> &PollingConfiguration {
        &self.config
    }

    /// Run the poll and report how it ended.
    ///
    /// The timeout action, if any, is ignored: a timed out run is returned as
    /// [`PollOutcome::TimedOut`].
    pub async fn poll(self) -> Result<PollOutcome<T>, WaitError<E>> {
        self.into_parts()?.poll().await
    }

    /// Run the poll.
    ///
    /// Fails with [`WaitError::MissingConfiguration`] before any delay if the
    /// producer or the condition is missing (the producer is checked first).
    /// A timed out run returns the timeout action's result, or fails with
    /// [`WaitError::TimeoutExceeded`] when there is no timeout action.
    pub async fn execute(self) -> Result<T, WaitError<E>> {
        let mut run = self.into_parts()?;
        let on_timeout = run.on_timeout.take();
        let outcome = run.poll().await?;

        match on_timeout {
            Some(on_timeout) => Ok(outcome.or_else(on_timeout)),
            None => outcome.into_result(),
        }
    }

    fn into_parts(self) -> Result<Run<'a, T, E>, WaitError<E>> {
        let producer = self
            .producer
            .ok_or(WaitError::MissingConfiguration(MissingField::Producer))?;
        let condition = self
            .condition
            .ok_or(WaitError::MissingConfiguration(MissingField::Condition))?;

        Ok(Run {
            producer,
            condition,
            poller: Poller::new(self.config),
            on_timeout: self.on_timeout,
            on_iteration: self.on_iteration,
        })
    }
}

impl<T, E> Default for WaitBuilder<'_, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for WaitBuilder<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitBuilder")
            .field("producer", &self.producer.as_ref().map(|_| ".."))
            .field("condition", &self.condition.as_ref().map(|_| ".."))
            .field("config", &self.config)
            .field("on_timeout", &self.on_timeout.as_ref().map(|_| ".."))
            .field("on_iteration", &self.on_iteration.as_ref().map(|_| ".."))
            .finish()
    }
}

struct Run<'a, T, E> {
    producer: BoxedProducer<'a, T, E>,
    condition: BoxedCondition<'a, T>,
    poller: Poller,
    on_timeout: Option<BoxedTimeoutAction<'a, T>>,
    on_iteration: Option<BoxedHook<'a, T>>,
}

impl<'a, T, E> Run<'a, T, E> {
    async fn poll(self) -> Result<PollOutcome<T>, WaitError<E>> {
        let Run {
            producer,
            condition,
            poller,
            on_iteration,
            ..
        } = self;

        let condition = |value: &T| condition.check(value);
        match on_iteration {
            Some(hook) => poller.poll_with_hooks(producer, condition, hook).await,
            None => poller.poll(producer, condition).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn fast() -> PollingConfiguration {
        PollingConfiguration::new()
            .with_delay_time(Duration::from_millis(100))
            .with_timeout(Duration::from_millis(1000))
    }

    #[tokio::test(start_paused = true)]
    async fn execute_returns_accepted_result() {
        let result = WaitBuilder::new()
            .with_producer(|| async { Ok::<_, Infallible>(("key", "test")) })
            .with_condition(|_: &(&str, &str)| true)
            .execute()
            .await;

        assert_eq!(result, Ok(("key", "test")));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_producer_fails_before_polling() {
        let start = tokio::time::Instant::now();

        let result = WaitBuilder::<i32>::new()
            .with_condition(|_: &i32| true)
            .execute()
            .await;

        assert_eq!(
            result,
            Err(WaitError::MissingConfiguration(MissingField::Producer))
        );
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_condition_fails_before_polling() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = WaitBuilder::new()
            .with_sync_producer({
                let calls = calls.clone();
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Infallible>(1)
                }
            })
            .execute()
            .await;

        assert_eq!(
            result,
            Err(WaitError::MissingConfiguration(MissingField::Condition))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn producer_is_reported_before_condition() {
        let result = WaitBuilder::<i32>::new().execute().await;
        assert_eq!(
            result,
            Err(WaitError::MissingConfiguration(MissingField::Producer))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_without_action_fails() {
        let result = WaitBuilder::new()
            .with_producer(|| async { Ok::<_, Infallible>("test") })
            .with_condition(|_: &&str| false)
            .with_polling_configuration(fast())
            .execute()
            .await;

        assert!(result.unwrap_err().is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_action_supplies_result() {
        let result = WaitBuilder::new()
            .with_producer(|| async { Ok::<_, Infallible>("test") })
            .with_condition(|_: &&str| false)
            .with_polling_configuration(fast())
            .with_timeout_action(|last| {
                assert_eq!(last, Some("test"));
                "timeout"
            })
            .execute()
            .await;

        assert_eq!(result, Ok("timeout"));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_ignores_timeout_action() {
        let outcome = WaitBuilder::new()
            .with_producer(|| async { Ok::<_, Infallible>(1) })
            .with_condition(|_: &i32| false)
            .with_polling_configuration(fast())
            .with_timeout_action(|_| panic!("timeout action must not run"))
            .poll()
            .await
            .unwrap();

        assert!(outcome.is_timed_out());
        assert_eq!(outcome.attempts(), 10);
    }

    #[test]
    fn polling_options_fill_from_current_config() {
        let builder = WaitBuilder::<i32>::new()
            .with_polling_configuration(fast())
            .with_polling_options(PollingOptions::new().polling_start_after(Duration::from_millis(200)));

        assert_eq!(builder.config().delay_time(), Duration::from_millis(100));
        assert_eq!(builder.config().timeout(), Duration::from_millis(1000));
        assert_eq!(
            builder.config().polling_start_after(),
            Duration::from_millis(200)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn producer_error_propagates() {
        let result = WaitBuilder::new()
            .with_sync_producer(|| Err::<i32, _>("unreachable host"))
            .with_condition(|_: &i32| true)
            .with_timeout_action(|_| 0)
            .execute()
            .await;

        assert_eq!(result, Err(WaitError::Producer("unreachable host")));
    }

    #[tokio::test(start_paused = true)]
    async fn hook_sees_iterations() {
        let iterations = Arc::new(AtomicU32::new(0));

        let result = WaitBuilder::new()
            .with_sync_producer(|| Ok::<_, Infallible>(7))
            .with_condition(|_: &i32| false)
            .with_polling_configuration(fast())
            .on_iteration({
                let iterations = iterations.clone();
                move |_: &PollEvent<'_, i32>| {
                    iterations.fetch_add(1, Ordering::SeqCst);
                }
            })
            .with_timeout_action(|last| last.unwrap_or_default() * 2)
            .execute()
            .await;

        assert_eq!(result, Ok(14));
        assert_eq!(iterations.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn debug_hides_closures() {
        let builder = WaitBuilder::<i32>::new().with_condition(|_: &i32| true);
        let debug = format!("{:?}", builder);
        assert!(debug.contains("WaitBuilder"));
        assert!(debug.contains("producer: None"));
        assert!(debug.contains("condition: Some"));
    }
}
