//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("typegen")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Configure and drive typed-model and mapper generation from database schemas")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::options::command())
            .subcommand(commands::show::command())
            .subcommand(commands::select::command())
            .subcommand(commands::set::command())
            .subcommand(commands::reset::command())
            .subcommand(commands::generate::command())
            .subcommand(commands::mapper::command())
            .subcommand(commands::connections::command())
            .subcommand(commands::status::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("options", sub_matches)) => commands::options::run(sub_matches).await,
            Some(("show", sub_matches)) => commands::show::run(sub_matches).await,
            Some(("select", sub_matches)) => commands::select::run(sub_matches).await,
            Some(("set", sub_matches)) => commands::set::run(sub_matches).await,
            Some(("reset", sub_matches)) => commands::reset::run(sub_matches).await,
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches).await,
            Some(("mapper", sub_matches)) => commands::mapper::run(sub_matches).await,
            Some(("connections", sub_matches)) => commands::connections::run(sub_matches).await,
            Some(("status", sub_matches)) => commands::status::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;
    use tracing::debug;

    use crate::options::{Language, TypeVariant};

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Option<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Some(PathBuf::from(config_path));
        }

        let default_paths = [PathBuf::from(".typegen.yaml"), PathBuf::from("typegen.yaml")];
        default_paths.into_iter().find(|path| path.exists())
    }

    /// Load configuration from file, or fall back to the defaults
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches) {
            Some(path) => crate::Config::from_file(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create Typegen instance
    pub fn create_app(config: crate::Config) -> Result<crate::Typegen> {
        crate::Typegen::new(config)
    }

    /// Parse a language argument
    pub fn parse_language(matches: &clap::ArgMatches, arg: &str) -> Result<Language> {
        let raw = matches
            .get_one::<String>(arg)
            .ok_or_else(|| anyhow!("Missing language argument"))?;
        raw.parse::<Language>().map_err(|e| anyhow!(e))
    }

    /// Parse a variant key within a language
    pub fn parse_variant(language: Language, key: &str) -> Result<TypeVariant> {
        TypeVariant::parse(language, key).ok_or_else(|| {
            let valid = language
                .variants()
                .iter()
                .map(|v| v.key())
                .collect::<Vec<_>>()
                .join(", ");
            anyhow!(
                "Unknown type '{}' for language '{}', expected one of: {}",
                key,
                language,
                valid
            )
        })
    }

    /// The shared `--config` argument
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }
}
