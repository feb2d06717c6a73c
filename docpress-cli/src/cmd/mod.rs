pub mod check;
pub mod show;

use clap::{Arg, Command};

pub fn add_config_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Site configuration file (default: ./docpress.toml)"),
        )
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("DIR")
                .help("Docs source directory (default: ./docs)"),
        )
}
