use std::path::PathBuf;

use clap::Parser;

use crate::commands::Command;

#[derive(Debug, Parser)]
#[clap(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Options {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Parser)]
pub struct Global {
    /// A catalog file to use instead of the built-in product catalog.
    #[clap(long, global(true), env("STOCKPILE_CATALOG"))]
    pub catalog: Option<PathBuf>,

    /// Sets verbosity level. Can be specified multiple times to increase the verbosity
    /// of this program.
    #[clap(long = "verbose", short, global(true), action(clap::ArgAction::Count))]
    pub verbosity: u8,
}
