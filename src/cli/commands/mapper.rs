//! Mapper command implementation

use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

use crate::cli::utils;
use crate::client::MapperOptions;
use crate::options::MapperLanguage;

pub fn command() -> Command {
    Command::new("mapper")
        .about("Generate persistence-mapper source for a database schema")
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
            clap::Arg::new("target")
                .long("target")
                .help("Mapper dialect (mybatis-xml, mybatis-annotation)")
                .value_name("TARGET")
                .required(true),
        )
        .arg(
            clap::Arg::new("table")
                .long("table")
                .help("Restrict generation to one table")
                .value_name("TABLE"),
        )
        .arg(
            clap::Arg::new("all-crud")
                .long("all-crud")
                .help("Generate all CRUD operations")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("select")
                .long("select")
                .help("Generate read/query operations")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("insert")
                .long("insert")
                .help("Generate create operations")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("update")
                .long("update")
                .help("Generate update operations")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("delete")
                .long("delete")
                .help("Generate delete operations")
                .action(clap::ArgAction::SetTrue),
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
    let target: MapperLanguage = matches
        .get_one::<String>("target")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let options = MapperOptions {
        all_crud: matches.get_flag("all-crud").then_some(true),
        select: matches.get_flag("select").then_some(true),
        insert: matches.get_flag("insert").then_some(true),
        update: matches.get_flag("update").then_some(true),
        delete: matches.get_flag("delete").then_some(true),
    };

    if options.all_crud.is_none()
        && options.select.is_none()
        && options.insert.is_none()
        && options.update.is_none()
        && options.delete.is_none()
    {
        return Err(anyhow!(
            "Select at least one operation: --all-crud, --select, --insert, --update, --delete"
        ));
    }

    let table_name = matches.get_one::<String>("table").cloned();

    info!("Generating mapper for connection {}", connection_id);
    let source = app
        .generate_mapper(connection_id, target, options, table_name)
        .await?;

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
