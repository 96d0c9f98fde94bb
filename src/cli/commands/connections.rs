//! Connections command implementation

use anyhow::Result;
use chrono::Utc;
use clap::{ArgMatches, Command};
use tracing::info;

use crate::cli::utils;
use crate::client::ConnectionHealth;

pub fn command() -> Command {
    Command::new("connections")
        .about("Inspect the backend's saved database connections")
        .arg(utils::config_arg())
        .subcommand(
            Command::new("list").about("List the saved connections"),
        )
        .subcommand(
            Command::new("test")
                .about("Probe a saved connection")
                .arg(
                    clap::Arg::new("id")
                        .help("Connection id")
                        .value_name("ID")
                        .required(true),
                ),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;

    match matches.subcommand() {
        Some(("test", sub_matches)) => {
            let id: i64 = sub_matches
                .get_one::<String>("id")
                .map(String::as_str)
                .unwrap_or_default()
                .parse()?;

            info!("Testing connection {}", id);
            let connection = app.client().get_connection(id).await?;
            let result = app.client().test_connection(&connection).await?;

            let health = ConnectionHealth {
                connection_id: connection.connection_id,
                name: connection.name.clone(),
                connected: result.success,
                last_checked_at: Some(Utc::now()),
                last_error: (!result.success).then(|| result.message.clone()),
            };

            if health.connected {
                println!("{}: ok - {}", health.name, result.message);
            } else {
                println!(
                    "{}: failed - {}",
                    health.name,
                    health.last_error.as_deref().unwrap_or("unknown error")
                );
            }
            if let Some(checked_at) = health.last_checked_at {
                println!("  checked at: {}", checked_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            if let Some(ping_ms) = result.ping_ms {
                println!("  ping: {}ms", ping_ms);
            }
            if let Some(tables_found) = result.tables_found {
                println!("  tables: {}", tables_found);
            }
            for table in &result.tables {
                println!("    {} ({} columns)", table.name, table.column_count);
            }

            Ok(())
        }
        _ => {
            // Default to listing, matching `connections` with no subcommand
            let connections = app.client().list_connections().await?;
            if connections.is_empty() {
                println!("No saved connections.");
                return Ok(());
            }

            for connection in &connections {
                println!(
                    "{:<4} {:<20} {:<10} {}:{}/{}",
                    connection.connection_id,
                    connection.name,
                    connection.db_type,
                    connection.host,
                    connection.port,
                    connection.database_name
                );
            }

            Ok(())
        }
    }
}
