#![cfg(feature = "tracing")]
//! Log output of polling runs with the `tracing` feature enabled.

use std::time::Duration;

use fluentwait::testing::sequence;
use fluentwait::{PollingConfiguration, Poller};
use tracing_test::traced_test;

fn config() -> PollingConfiguration {
    PollingConfiguration::new()
        .with_delay_time(Duration::from_millis(100))
        .with_timeout(Duration::from_millis(500))
        .with_polling_start_after(Duration::from_millis(200))
}

#[tokio::test(start_paused = true)]
#[traced_test]
async fn logs_attempts_inside_run_span() {
    let value = Poller::new(config())
        .run(sequence([1, 2]), |n: &i32| *n == 2)
        .await
        .unwrap();

    assert_eq!(value, 2);
    assert!(logs_contain("fluent_wait"));
    assert!(logs_contain("polled"));
    assert!(logs_contain("accepted=true"));
}

#[tokio::test(start_paused = true)]
#[traced_test]
async fn logs_timeout() {
    let outcome = Poller::new(config())
        .poll(sequence([1]), |_: &i32| false)
        .await
        .unwrap();

    assert!(outcome.is_timed_out());
    assert!(logs_contain("condition not satisfied within timeout"));
}
