//! Show command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::cli::utils;
use crate::options::Language;
use crate::SettingsStore;

pub fn command() -> Command {
    Command::new("show")
        .about("Show the current generator settings")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("language")
                .short('l')
                .long("language")
                .help("Limit output to one language (java, typescript, csharp)")
                .value_name("LANG"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;

    let languages: Vec<Language> = match matches.get_one::<String>("language") {
        Some(_) => vec![utils::parse_language(matches, "language")?],
        None => Language::ALL.to_vec(),
    };

    for language in languages {
        print_language(app.store(), language);
    }

    Ok(())
}

fn print_language(store: &SettingsStore, language: Language) {
    let selected = store.selected_type(language);
    println!("{}:", language);
    println!("  selected type: {} ({})", selected.key(), selected.label());

    for variant in language.variants() {
        let config = store.type_config(variant);
        println!("  {}:", variant.key());
        if !config.prefix.is_empty() {
            println!("    prefix: {}", config.prefix);
        }
        if !config.suffix.is_empty() {
            println!("    suffix: {}", config.suffix);
        }
        for (key, value) in &config.options {
            let state = if *value { "on" } else { "off" };
            println!("    {:<24} [{}]", key, state);
        }
    }
    println!();
}
