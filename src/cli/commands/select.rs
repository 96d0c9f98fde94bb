//! Select command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

use crate::cli::utils;

pub fn command() -> Command {
    Command::new("select")
        .about("Select the active output variant for a language")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("language")
                .help("Target language (java, typescript, csharp)")
                .value_name("LANG")
                .required(true),
        )
        .arg(
            clap::Arg::new("type")
                .help("Variant key, e.g. record, interface, zod")
                .value_name("TYPE")
                .required(true),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let mut app = utils::create_app(config)?;

    let language = utils::parse_language(matches, "language")?;
    let key = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or_default();
    let variant = utils::parse_variant(language, key)?;

    app.store_mut().select_type(variant);
    info!("Selected {} for {}", variant.key(), language);

    println!("{}: selected type is now {}", language, variant.key());

    Ok(())
}
