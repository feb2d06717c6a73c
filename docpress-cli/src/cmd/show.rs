use std::path::Path;

use anyhow::{Context, Result};
use clap::{ArgMatches, Command};
use docpress_core::{ConfigResolver, FsContentSource, NullContentSource, RawConfig};

use crate::config::DocpressConfig;

pub fn make_subcommand() -> Command {
    super::add_config_args(Command::new("show"))
        .about("Print the resolved site configuration as JSON")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let settings = DocpressConfig::load(args)?;
    let build = settings.build_config();

    let raw = RawConfig::read(&build.config)
        .with_context(|| format!("Failed to load {}", build.config))?;

    // Without a docs tree we still resolve, skipping page existence checks
    let source_dir = Path::new(&build.source);
    let site = if source_dir.is_dir() {
        ConfigResolver::new(FsContentSource::new(source_dir)).resolve(raw)?
    } else {
        ConfigResolver::new(NullContentSource).resolve(raw)?
    };

    println!("{}", serde_json::to_string_pretty(&site)?);

    Ok(())
}
