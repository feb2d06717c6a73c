mod cmd;
mod config;

use anyhow::Result;
use clap::Command;

fn main() -> Result<()> {
    let matches = Command::new("docpress")
        .about("Documentation site configuration resolver")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::check::make_subcommand())
        .subcommand(cmd::show::make_subcommand())
        .get_matches();

    match matches.subcommand() {
        Some(("check", args)) => cmd::check::execute(args),
        Some(("show", args)) => cmd::show::execute(args),
        _ => unreachable!(),
    }
}
