//! Direct-call example
//!
//! Polls a flaky data source once a second until it returns a value, giving
//! up after five seconds.
//!
//! Run with: cargo run --example fluent_wait_function

use std::convert::Infallible;
use std::time::Duration;

use fluentwait::{PollingConfiguration, Poller};

/// Simulates a slow operation that only sometimes has data.
async fn fetch_some_data() -> Result<Option<f64>, Infallible> {
    println!("Started async operation");
    tokio::time::sleep(Duration::from_millis(1500)).await;

    if rand::random::<f64>() > 0.5 {
        Ok(Some(rand::random::<f64>()))
    } else {
        Ok(None)
    }
}

#[tokio::main]
async fn main() {
    println!("Started fluent wait function sample");

    let poller = Poller::new(
        PollingConfiguration::new()
            .with_delay_time(Duration::from_millis(1000))
            .with_timeout(Duration::from_millis(5000)),
    );

    let result = poller
        .run_or_else(fetch_some_data, |data: &Option<f64>| data.is_some(), |last| {
            println!("Timeout!");
            last.flatten()
        })
        .await;

    match result {
        Ok(Some(data)) => println!("Fetched data: {}", data),
        Ok(None) => println!("No data"),
        Err(e) => println!("Polling failed: {}", e),
    }
}
