//! Session settings example
//!
//! Reads the daemon's speed limits, enables the alternative limits, and
//! shows how errors are classified.
//!
//! Run with: cargo run --example session_settings

use transmission_rpc::client::SessionSettings;
use transmission_rpc::{ClientBuilder, ErrorKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let client = ClientBuilder::from_env()?.build()?;

    let info = match client.session_get().await {
        Ok(info) => info,
        Err(e) => {
            match e.kind() {
                ErrorKind::Auth => eprintln!("Check TRANSMISSION_USERNAME/PASSWORD: {}", e),
                ErrorKind::Network => eprintln!("Is the daemon running? {}", e),
                _ => eprintln!("Unexpected failure: {}", e),
            }
            return Err(e.into());
        }
    };

    println!("Transmission {} (rpc {})", info.version, info.rpc_version);
    println!("Download dir: {}", info.download_dir);
    println!(
        "Alt speed: down={:?} up={:?} enabled={:?}",
        info.alt_speed_down, info.alt_speed_up, info.alt_speed_enabled
    );

    let settings = SessionSettings::new()
        .alt_speed_down(500)
        .alt_speed_up(50)
        .alt_speed_enabled(true);

    if client.session_set(&settings).await? {
        println!("Alternative speed limits enabled");
    } else {
        println!("Daemon refused the new settings");
    }

    Ok(())
}
