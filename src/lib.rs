//! # fluentwait
//!
//! > *"Wait for it"*
//!
//! A Rust library for polling: run a producer on a fixed cadence until a
//! condition accepts its result or a timeout elapses.
//!
//! ## Philosophy
//!
//! **fluentwait** keeps the loop small and the decisions explicit:
//! - **Configuration** is plain data ([`PollingConfiguration`])
//! - **Timeouts** are values ([`PollOutcome::TimedOut`]) until the caller
//!   decides whether they are errors or call for a fallback
//! - **Two entry points, one loop**: [`Poller`] for direct calls,
//!   [`WaitBuilder`] for fluent configuration
//!
//! ## Quick Example
//!
//! ```rust
//! use fluentwait::{PollingConfiguration, WaitBuilder};
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let mut readings = vec![None, None, Some(21.5)].into_iter();
//!
//! let temperature = WaitBuilder::new()
//!     .with_sync_producer(move || Ok::<_, Infallible>(readings.next().flatten()))
//!     .with_condition(|reading: &Option<f64>| reading.is_some())
//!     .with_polling_configuration(
//!         PollingConfiguration::new()
//!             .with_delay_time(Duration::from_millis(1))
//!             .with_timeout(Duration::from_millis(50)),
//!     )
//!     .execute()
//!     .await
//!     .unwrap();
//!
//! assert_eq!(temperature, Some(21.5));
//! # });
//! ```
//!
//! ## Feature flags
//!
//! - `tracing`: span per run and events per iteration via the `tracing` crate
//! - `serde`: (de)serialize configurations with millisecond fields
//! - `proptest`: `Arbitrary` configurations for property-based tests

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod builder;
pub mod condition;
pub mod poll;
pub mod testing;

// Re-exports
pub use builder::WaitBuilder;
pub use condition::{Condition, ConditionExt};
pub use poll::{
    wait_until, wait_until_or_else, ConfigError, MissingField, PollEvent, PollOutcome, Poller,
    PollingConfiguration, PollingOptions, WaitError,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builder::WaitBuilder;
    pub use crate::condition::{Condition, ConditionExt};
    pub use crate::poll::{
        wait_until, wait_until_or_else, PollOutcome, Poller, PollingConfiguration,
        PollingOptions, WaitError,
    };
}
