//! Simple client example
//!
//! Lists torrents, then stops and restarts all of them.
//!
//! Run with: cargo run --example simple_client
//!
//! Set TRANSMISSION_URL, TRANSMISSION_USERNAME and TRANSMISSION_PASSWORD to
//! point at a daemon other than 127.0.0.1:9091.

use transmission_rpc::client::TorrentStatus;
use transmission_rpc::ClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = ClientBuilder::from_env()?.build()?;
    println!("Talking to {}", client.endpoint());

    let torrents = client.torrent_get(None).await?;
    println!("{} torrents:", torrents.len());
    for torrent in &torrents {
        let state = match torrent.status {
            TorrentStatus::Stopped => "stopped",
            TorrentStatus::Download | TorrentStatus::DownloadWait => "downloading",
            TorrentStatus::Seed | TorrentStatus::SeedWait => "seeding",
            _ => "checking",
        };
        println!(
            "  [{}] {} {:.1}% ({})",
            torrent.id,
            torrent.name,
            torrent.percent_done * 100.0,
            state
        );
    }

    println!("\nStopping all torrents: {}", client.torrent_stop(None).await?);
    println!("Starting all torrents: {}", client.torrent_start(None).await?);

    if let Some(token) = client.session_token().await {
        println!("\nSession id: {}", token);
    }

    Ok(())
}
