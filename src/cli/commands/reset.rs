//! Reset command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

use crate::cli::utils;

pub fn command() -> Command {
    Command::new("reset")
        .about("Restore generator settings to their defaults")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("language")
                .short('l')
                .long("language")
                .help("Reset only this language")
                .value_name("LANG"),
        )
        .arg(
            clap::Arg::new("type")
                .short('t')
                .long("type")
                .help("Reset only this variant of the language")
                .value_name("TYPE")
                .requires("language"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let mut app = utils::create_app(config)?;

    match matches.get_one::<String>("language") {
        None => {
            app.store_mut().reset_all();
            info!("Reset all generator settings");
            println!("All generator settings restored to defaults.");
        }
        Some(_) => {
            let language = utils::parse_language(matches, "language")?;
            match matches.get_one::<String>("type") {
                None => {
                    app.store_mut().reset_language(language);
                    info!("Reset settings for {}", language);
                    println!("{} settings restored to defaults.", language);
                }
                Some(key) => {
                    let variant = utils::parse_variant(language, key)?;
                    app.store_mut().reset_type(variant);
                    info!("Reset configuration for {}", variant);
                    println!("{} configuration restored to defaults.", variant);
                }
            }
        }
    }

    Ok(())
}
