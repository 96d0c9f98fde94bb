//! Status command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::cli::utils;
use crate::client::HealthState;

pub fn command() -> Command {
    Command::new("status")
        .about("Show backend health and settings storage location")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;

    println!("Backend: {}", app.client().base_url());

    match app.client().health().await {
        Ok(health) => {
            let state = match health.status {
                HealthState::Healthy => "healthy",
                HealthState::Degraded => "degraded",
                HealthState::Unhealthy => "unhealthy",
            };
            println!("  status: {} (v{})", state, health.version);
            println!("  uptime: {}s", health.uptime);
            if health.database.connected {
                println!("  database: connected ({}ms)", health.database.latency);
            } else {
                println!("  database: disconnected");
            }
        }
        Err(e) => {
            println!("  status: unreachable ({e})");
        }
    }

    Ok(())
}
