use std::path::Path;

use anyhow::{Context, Result};
use clap::{ArgMatches, Command};
use docpress_core::{ConfigResolver, FsContentSource, PageScanner, RawConfig, orphan_pages};

use crate::config::DocpressConfig;

pub fn make_subcommand() -> Command {
    super::add_config_args(Command::new("check"))
        .about("Validate the site configuration against the docs tree")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let settings = DocpressConfig::load(args)?;
    let build = settings.build_config();

    let raw = RawConfig::read(&build.config)
        .with_context(|| format!("Failed to load {}", build.config))?;

    let source_dir = Path::new(&build.source);
    let site = ConfigResolver::new(FsContentSource::new(source_dir)).resolve(raw)?;

    if source_dir.is_dir() {
        let pages = PageScanner::new(source_dir).markdown_pages();
        for page in orphan_pages(&site, &pages) {
            println!("warning: {} is not referenced by any sidebar", page.display());
        }
    }

    println!(
        "{} OK: {} nav items, {} sidebar sections, {} plugins",
        build.config,
        site.theme.nav.len(),
        site.theme.sidebar.len(),
        site.plugins.len()
    );

    Ok(())
}
