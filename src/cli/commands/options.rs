//! Options command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::cli::utils;
use crate::options::{variant_options, Language, MAPPER_OPERATIONS};

pub fn command() -> Command {
    Command::new("options")
        .about("List the generation variants and options for each language")
        .arg(
            clap::Arg::new("language")
                .short('l')
                .long("language")
                .help("Limit output to one language (java, typescript, csharp)")
                .value_name("LANG"),
        )
        .arg(
            clap::Arg::new("mapper")
                .long("mapper")
                .help("List mapper operations instead of model options")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("mapper") {
        println!("Mapper operations:");
        for operation in MAPPER_OPERATIONS {
            println!(
                "  {:<10} {} - {}",
                operation.key, operation.label, operation.description
            );
        }
        return Ok(());
    }

    let languages: Vec<Language> = match matches.get_one::<String>("language") {
        Some(_) => vec![utils::parse_language(matches, "language")?],
        None => Language::ALL.to_vec(),
    };

    for language in languages {
        println!("{}:", language);
        for variant in language.variants() {
            let marker = if variant == language.default_variant() {
                " (default)"
            } else {
                ""
            };
            println!("  {} - {}{}", variant.key(), variant.label(), marker);
            for spec in variant_options(variant) {
                let state = if spec.default { "on" } else { "off" };
                println!("    {:<24} {:<28} [{}]", spec.key, spec.label, state);
            }
        }
        println!();
    }

    Ok(())
}
