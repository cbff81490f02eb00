//! Demonstrates tracing integration with polling runs
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::convert::Infallible;
use std::time::Duration;

use fluentwait::testing::sequence;
use fluentwait::{PollingConfiguration, Poller};

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    let poller = Poller::new(
        PollingConfiguration::new()
            .with_delay_time(Duration::from_millis(100))
            .with_timeout(Duration::from_millis(1000))
            .with_polling_start_after(Duration::from_millis(300)),
    );

    // Fulfilled on the third real attempt, after three suppressed iterations
    let result = poller
        .run(sequence(["starting", "starting", "ready"]), |s: &&str| *s == "ready")
        .await;

    match result {
        Ok(status) => tracing::info!("Service is {}", status),
        Err(e) => tracing::error!("Service did not start: {}", e),
    }

    // Never fulfilled: the timeout is logged and reported as an error
    let result = poller
        .run(
            || async { Ok::<_, Infallible>(503u16) },
            |status: &u16| *status == 200,
        )
        .await;

    if let Err(e) = result {
        tracing::warn!("Health check failed: {}", e);
    }
}
