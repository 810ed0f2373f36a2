use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fs_err as fs;

use crate::catalog::Catalog;
use crate::options::Global;

#[derive(Debug, Args)]
pub struct ListOptions {
    /// A path to a file to write the catalog to as JSON.
    #[clap(long = "output")]
    pub output: Option<PathBuf>,
}

pub async fn list(global: Global, options: ListOptions) -> Result<()> {
    let catalog = Catalog::load(global.catalog.as_deref())?;

    println!("remote:");
    for (filename, url) in &catalog.remote {
        println!("  {}  {}", filename, url);
    }

    println!("placeholders:");
    for (filename, placeholder) in &catalog.placeholders {
        println!(
            "  {}  {:?} on {}",
            filename, placeholder.label, placeholder.color
        );
    }

    if let Some(output) = options.output {
        let mut file = BufWriter::new(fs::File::create(&output)?);
        serde_json::to_writer_pretty(&mut file, &catalog)?;
        file.flush()?;
    }

    Ok(())
}
