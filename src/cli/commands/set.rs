//! Set command implementation

use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use tracing::info;

use crate::cli::utils;
use crate::options::{find_option, variant_options, TypeVariant};
use crate::TypeConfigUpdate;

pub fn command() -> Command {
    Command::new("set")
        .about("Update option toggles and naming for a (language, type) pair")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("language")
                .help("Target language (java, typescript, csharp)")
                .value_name("LANG")
                .required(true),
        )
        .arg(
            clap::Arg::new("type")
                .short('t')
                .long("type")
                .help("Variant key; defaults to the language's selected type")
                .value_name("TYPE"),
        )
        .arg(
            clap::Arg::new("enable")
                .long("enable")
                .help("Option key to turn on (repeatable)")
                .value_name("KEY")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("disable")
                .long("disable")
                .help("Option key to turn off (repeatable)")
                .value_name("KEY")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("prefix")
                .long("prefix")
                .help("Prefix for generated type names (empty string clears)")
                .value_name("PREFIX"),
        )
        .arg(
            clap::Arg::new("suffix")
                .long("suffix")
                .help("Suffix for generated type names (empty string clears)")
                .value_name("SUFFIX"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let mut app = utils::create_app(config)?;

    let language = utils::parse_language(matches, "language")?;
    let variant = match matches.get_one::<String>("type") {
        Some(key) => utils::parse_variant(language, key)?,
        None => app.store().selected_type(language),
    };

    let enable: Vec<&String> = matches.get_many("enable").unwrap_or_default().collect();
    let disable: Vec<&String> = matches.get_many("disable").unwrap_or_default().collect();
    let prefix = matches.get_one::<String>("prefix").cloned();
    let suffix = matches.get_one::<String>("suffix").cloned();

    if enable.is_empty() && disable.is_empty() && prefix.is_none() && suffix.is_none() {
        return Err(anyhow!(
            "Nothing to update: pass --enable/--disable/--prefix/--suffix"
        ));
    }

    // The option set is merged here, against the current config, and
    // handed to the store whole.
    let options = if enable.is_empty() && disable.is_empty() {
        None
    } else {
        let mut options = app.store().type_config(variant).options;
        for (key, value) in enable
            .iter()
            .map(|k| (k.as_str(), true))
            .chain(disable.iter().map(|k| (k.as_str(), false)))
        {
            if find_option(variant, key).is_none() {
                return Err(unknown_option(variant, key));
            }
            options.insert(key.to_string(), value);
        }
        Some(options)
    };

    let update = TypeConfigUpdate {
        options,
        prefix,
        suffix,
    };
    app.store_mut().update_type_config(variant, update);
    info!("Updated configuration for {}", variant);

    let config = app.store().type_config(variant);
    println!("{}:", variant);
    if !config.prefix.is_empty() {
        println!("  prefix: {}", config.prefix);
    }
    if !config.suffix.is_empty() {
        println!("  suffix: {}", config.suffix);
    }
    for (key, value) in &config.options {
        let state = if *value { "on" } else { "off" };
        println!("  {:<24} [{}]", key, state);
    }

    Ok(())
}

fn unknown_option(variant: TypeVariant, key: &str) -> anyhow::Error {
    let valid = variant_options(variant)
        .iter()
        .map(|spec| spec.key)
        .collect::<Vec<_>>()
        .join(", ");
    anyhow!(
        "Unknown option '{}' for {}, expected one of: {}",
        key,
        variant,
        valid
    )
}
