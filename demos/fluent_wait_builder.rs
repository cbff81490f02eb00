//! Builder example
//!
//! Same flaky data source as `fluent_wait_function`, configured through
//! `WaitBuilder`. The configuration is given as partial `PollingOptions`:
//! only the fields that differ from the defaults are set.
//!
//! Run with: cargo run --example fluent_wait_builder

use std::convert::Infallible;
use std::time::Duration;

use fluentwait::{PollEvent, PollingOptions, WaitBuilder};

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
    println!("Started fluent wait builder sample");

    let result = WaitBuilder::new()
        .with_producer(|| async {
            // This could be any asynchronous operation
            fetch_some_data().await
        })
        .with_condition(|data: &Option<f64>| data.is_some())
        .with_polling_options(
            PollingOptions::new()
                .delay_time(Duration::from_millis(1000))
                .timeout(Duration::from_millis(5000)),
        )
        .on_iteration(|event: &PollEvent<'_, Option<f64>>| {
            println!(
                "  iteration {} at {:?}: {}",
                event.iteration,
                event.elapsed,
                if event.accepted { "accepted" } else { "not yet" }
            );
        })
        .with_timeout_action(|_| {
            println!("Timeout!");
            None
        })
        .execute()
        .await;

    match result {
        Ok(Some(data)) => println!("Fetched data: {}", data),
        Ok(None) => println!("No data"),
        Err(e) => println!("Polling failed: {}", e),
    }
}
