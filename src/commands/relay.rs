use anyhow::{Context, Result};

use pokedex::config::Config;
use pokedex::relay::{RelayConfig, RelayServer};

pub async fn relay(config: &Config, bind: Option<String>, origin: Option<String>) -> Result<()> {
    let mut relay_config = RelayConfig::from_settings(&config.relay);

    if let Some(bind) = bind {
        relay_config.bind_address = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {bind}"))?;
    }
    if let Some(origin) = origin {
        relay_config.allowed_origin = match origin.as_str() {
            "*" => None,
            _ => Some(origin),
        };
    }

    let server = RelayServer::new(relay_config)?;
    println!("{}", server.info().display());
    println!();

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    Ok(())
}
