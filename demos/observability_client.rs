//! Observability client example
//!
//! Demonstrates OpenTelemetry traces and metrics around daemon calls.
//!
//! Run with: cargo run --example observability_client
//!
//! Expects an OTLP collector on localhost:4317.

use transmission_rpc::core::{shutdown_observability, ObservabilityConfig};
use transmission_rpc::ClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let otel_config = ObservabilityConfig::new("transmission-observability-client")
        .with_endpoint("http://localhost:4317")
        .with_log_level("debug");

    let client = ClientBuilder::from_env()?
        .with_observability(otel_config)
        .service_name("observability-client")
        .build()?;

    println!("Sending calls with tracing and metrics enabled...\n");

    for i in 1..=5 {
        tracing::info!(iteration = i, "Starting iteration");

        match client.torrent_get(None).await {
            Ok(torrents) => println!("Iteration {}: {} torrents", i, torrents.len()),
            Err(e) => println!("Iteration {}: {} ({})", i, e, e.kind()),
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
    }

    println!("\nSession id refreshes: {}", client.session_refreshes());
    println!("Check your collector for traces and metrics");

    // Flush pending spans before exit
    shutdown_observability();
    tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;

    Ok(())
}
