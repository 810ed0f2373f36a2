mod check;
mod fetch;
mod list;
mod placeholders;

use clap::Subcommand;

pub use check::*;
pub use fetch::*;
pub use list::*;
pub use placeholders::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download every product photo in the catalog into the image directory,
    /// creating the directory if needed. Entries that fail are reported and
    /// skipped.
    Fetch(FetchOptions),

    /// Generate solid-color placeholder images with centered labels for
    /// products that have no photo yet.
    Placeholders(PlaceholdersOptions),

    /// Print the catalog, optionally writing it out as a JSON manifest.
    List(ListOptions),

    /// Report which catalog images exist in the image directory, whether
    /// they decode, and which files there are untracked.
    Check(CheckOptions),
}
