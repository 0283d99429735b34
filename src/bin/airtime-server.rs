//! Airtime query server.
//!
//! Serves LoRa airtime lookups over HTTP at http://localhost:8080/airtime
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin airtime-server
//! AIRTIME_PORT=9000 AIRTIME_BIND=127.0.0.1 RUST_LOG=debug cargo run --bin airtime-server
//! ```

use log::{error, info};
use lora_airtime::{AirtimeServer, Band, ServerConfig, TableCache};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// Build the server config from defaults and environment overrides.
fn config_from_env() -> Result<ServerConfig, String> {
    let mut config = ServerConfig::default();

    if let Ok(port) = std::env::var("AIRTIME_PORT") {
        config.port = port
            .parse::<u16>()
            .map_err(|e| format!("invalid AIRTIME_PORT {:?}: {}", port, e))?;
    }
    if let Ok(bind) = std::env::var("AIRTIME_BIND") {
        let ip = bind
            .parse::<IpAddr>()
            .map_err(|e| format!("invalid AIRTIME_BIND {:?}: {}", bind, e))?;
        config.bind_addr = Some(ip);
    }

    Ok(config)
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("=== LoRa airtime server starting ===");
    info!("Default band: {}", Band::default());

    let config = match config_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let cache = Arc::new(TableCache::new());

    // Keep server alive - dropping it stops the listener thread
    let _server = match AirtimeServer::start(config, cache.clone()) {
        Ok(server) => {
            info!("Airtime server running at http://{}/airtime", server.address());
            server
        }
        Err(e) => {
            error!("Failed to start airtime server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Entering main loop (Ctrl+C to exit)...");
    loop {
        std::thread::sleep(Duration::from_secs(60));
        info!("{} airtime tables cached", cache.len());
    }
}
