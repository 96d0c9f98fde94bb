//! Generate command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

use crate::cli::utils;

pub fn command() -> Command {
    Command::new("generate")
        .about("Generate typed models from an introspected database schema")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("connection")
                .short('n')
                .long("connection")
                .help("Saved connection id to introspect")
                .value_name("ID")
                .required(true),
        )
        .arg(
            clap::Arg::new("language")
                .short('l')
                .long("language")
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
            clap::Arg::new("tables")
                .long("tables")
                .help("Comma-separated table names; omit to generate for all tables")
                .value_name("TABLES")
                .value_delimiter(','),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Write generated source to a file instead of stdout")
                .value_name("FILE"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;

    let connection_id: i64 = matches
        .get_one::<String>("connection")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;
    let language = utils::parse_language(matches, "language")?;
    let variant = match matches.get_one::<String>("type") {
        Some(key) => Some(utils::parse_variant(language, key)?),
        None => None,
    };
    let table_names: Option<Vec<String>> = matches
        .get_many::<String>("tables")
        .map(|values| values.cloned().collect());

    let request = app.build_type_request(language, variant, connection_id, table_names)?;
    info!(
        "Generating {} models (style: {}) for connection {}",
        language,
        request.style.as_deref().unwrap_or("default"),
        connection_id
    );

    let source = app.generate_type(&request).await?;

    match matches.get_one::<String>("output") {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::write(&path, &source)?;
            println!("Generated source written to {}", path.display());
        }
        None => {
            println!("{source}");
        }
    }

    Ok(())
}
