//! Polling a producer until a condition holds.
//!
//! This module is the core of the crate:
//!
//! - **Pure configuration**: [`PollingConfiguration`] is just data (delay,
//!   timeout, suppression window) and can be validated and inspected
//! - **One loop**: every entry point, including [`WaitBuilder`](crate::WaitBuilder),
//!   runs the same loop in [`Poller`]
//! - **Timeouts are values**: the loop reports a [`PollOutcome`]; callers pick
//!   between a hard [`WaitError::TimeoutExceeded`] and a fallback action
//!
//! # Quick Start
//!
//! ```rust
//! use fluentwait::{PollingConfiguration, Poller};
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let poller = Poller::new(
//!     PollingConfiguration::new()
//!         .with_delay_time(Duration::from_millis(1))
//!         .with_timeout(Duration::from_millis(5)),
//! );
//!
//! let value = poller
//!     .run_or_else(
//!         || async { Ok::<_, Infallible>("pending") },
//!         |status: &&str| *status == "done",
//!         |_last| "timeout",
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(value, "timeout");
//! # });
//! ```
//!
//! # Loop semantics
//!
//! Every iteration first waits `delay_time` and adds it to the elapsed time.
//! Iterations that end before `polling_start_after` skip the producer. Others
//! call the producer once and check the condition once. The run stops when a
//! result is accepted or when the elapsed time reaches `timeout`; an attempt
//! made exactly at the timeout still counts if it is accepted. The producer is
//! always called at least once: a suppression window longer than the timeout
//! delays the first attempt, and the run ends right after it.
//!
//! # Error Types
//!
//! - [`WaitError`]: missing builder fields, invalid configuration, timeouts and
//!   producer failures
//! - [`ConfigError`]: why a configuration was rejected

mod config;
mod error;
mod outcome;
mod poller;

#[cfg(feature = "serde")]
mod serde_impl;

pub use config::{
    ConfigError, PollingConfiguration, PollingOptions, DEFAULT_DELAY_TIME,
    DEFAULT_POLLING_START_AFTER, DEFAULT_TIMEOUT,
};
pub use error::{MissingField, WaitError};
pub use outcome::{PollEvent, PollOutcome};
pub use poller::{wait_until, wait_until_or_else, Poller};
