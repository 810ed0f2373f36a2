use std::env;
use std::path::{Path, PathBuf};

use clap::Args;
use fs_err as fs;
use log::{error, info, warn};
use resolve_path::PathResolveExt;

use crate::catalog::{Catalog, DEFAULT_OUTPUT_DIR};
use crate::options::Global;
use crate::remote::ImageClient;

#[derive(Debug, Args)]
pub struct FetchOptions {
    /// The directory to download product images into. Created if missing.
    pub dir: Option<PathBuf>,
}

pub async fn fetch(global: Global, options: FetchOptions) -> anyhow::Result<()> {
    let catalog = Catalog::load(global.catalog.as_deref())?;
    let client = ImageClient::new()?;

    let dir = match options.dir {
        Some(dir) => dir.try_resolve()?.into_owned(),
        None => env::current_dir()?.join(DEFAULT_OUTPUT_DIR),
    };

    fs::create_dir_all(&dir)?;

    info!(
        "downloading {} product image(s) into {}",
        catalog.remote.len(),
        dir.display()
    );

    let mut downloaded = 0usize;
    let mut failed = 0usize;

    for (filename, url) in &catalog.remote {
        match fetch_one(&client, url, &dir.join(filename)).await {
            Ok(()) => {
                info!("downloaded: {}", filename);
                downloaded += 1;
            }
            Err(err) => {
                error!("error downloading {}: {:#}", filename, err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        warn!("{} downloaded, {} failed", downloaded, failed);
    } else {
        info!("all {} image(s) downloaded", downloaded);
    }

    Ok(())
}

/// One catalog entry, fetched and written. Network and disk failures are
/// both reported the same way by the caller; the entry is skipped and the
/// run continues.
async fn fetch_one(client: &ImageClient, url: &str, path: &Path) -> anyhow::Result<()> {
    let body = client.download(url).await?;
    fs::write(path, body)?;

    Ok(())
}
