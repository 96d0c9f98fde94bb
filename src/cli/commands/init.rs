//! Init command implementation

use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".typegen.yaml"),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing configuration file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = PathBuf::from(
        matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or(".typegen.yaml"),
    );

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "Configuration file already exists: {:?} (use --force to overwrite)",
            output_path
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    let config = Config::default();
    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    println!("Configuration file created: {}", output_path.display());
    println!("Edit it to point at your generation backend.");

    Ok(())
}
