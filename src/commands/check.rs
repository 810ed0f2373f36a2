use std::env;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::Args;
use fs_err as fs;
use image::GenericImageView;
use log::{info, warn};
use resolve_path::PathResolveExt;
use walkdir::WalkDir;

use crate::catalog::{Catalog, DEFAULT_OUTPUT_DIR};
use crate::options::Global;

#[derive(Debug, Args)]
pub struct CheckOptions {
    /// The directory holding the product images.
    pub dir: Option<PathBuf>,

    /// Fail if any catalog image is missing or does not decode.
    #[clap(long)]
    pub strict: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum ImageStatus {
    Ok {
        width: u32,
        height: u32,
        hash: String,
    },
    Invalid,
    Missing,
}

fn image_status(path: &Path) -> anyhow::Result<ImageStatus> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ImageStatus::Missing),
        Err(err) => return Err(err.into()),
    };

    let status = match image::load_from_memory(&bytes) {
        Ok(image) => ImageStatus::Ok {
            width: image.width(),
            height: image.height(),
            hash: blake3::hash(&bytes).to_hex().to_string(),
        },
        Err(_) => ImageStatus::Invalid,
    };

    Ok(status)
}

pub async fn check(global: Global, options: CheckOptions) -> anyhow::Result<()> {
    let catalog = Catalog::load(global.catalog.as_deref())?;

    let dir = match options.dir {
        Some(dir) => dir.try_resolve()?.into_owned(),
        None => env::current_dir()?.join(DEFAULT_OUTPUT_DIR),
    };

    if !dir.is_dir() {
        bail!("product image directory {} does not exist", dir.display());
    }

    let known = catalog.filenames();

    let mut missing = 0usize;
    let mut invalid = 0usize;

    for filename in &known {
        match image_status(&dir.join(filename))? {
            ImageStatus::Ok {
                width,
                height,
                hash,
            } => {
                info!("ok: {} ({}x{}, blake3 {})", filename, width, height, hash);
            }
            ImageStatus::Invalid => {
                warn!("invalid: {} does not decode as an image", filename);
                invalid += 1;
            }
            ImageStatus::Missing => {
                warn!("missing: {}", filename);
                missing += 1;
            }
        }
    }

    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !known.contains(name.as_ref()) {
            info!("untracked: {}", name);
        }
    }

    info!(
        "{} catalog image(s) checked, {} missing, {} invalid",
        known.len(),
        missing,
        invalid
    );

    if options.strict && (missing > 0 || invalid > 0) {
        bail!(
            "{} missing and {} invalid product image(s)",
            missing,
            invalid
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::Rgb8;
    use crate::render::{encode_jpeg, render_placeholder};

    #[test]
    fn test_image_status_classification() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.jpg");
        let image = render_placeholder("Lamp", Rgb8([0xFF, 0xC7, 0x00]), None, (32, 32), 10.0);
        std::fs::write(&good, encode_jpeg(&image).unwrap()).unwrap();

        let bad = dir.path().join("bad.jpg");
        std::fs::write(&bad, b"not an image").unwrap();

        match image_status(&good).unwrap() {
            ImageStatus::Ok { width, height, .. } => assert_eq!((width, height), (32, 32)),
            other => panic!("expected ok, got {:?}", other),
        }

        assert_eq!(image_status(&bad).unwrap(), ImageStatus::Invalid);
        assert_eq!(
            image_status(&dir.path().join("absent.jpg")).unwrap(),
            ImageStatus::Missing
        );
    }

    #[tokio::test]
    async fn test_strict_check_fails_on_missing_images() {
        let dir = tempfile::tempdir().unwrap();

        let global = Global {
            catalog: None,
            verbosity: 0,
        };
        let options = CheckOptions {
            dir: Some(dir.path().to_owned()),
            strict: true,
        };

        // Empty directory: every catalog entry is missing.
        assert!(check(global, options).await.is_err());
    }

    #[tokio::test]
    async fn test_check_rejects_nonexistent_directory() {
        let dir = tempfile::tempdir().unwrap();

        let global = Global {
            catalog: None,
            verbosity: 0,
        };
        let options = CheckOptions {
            dir: Some(dir.path().join("nope")),
            strict: false,
        };

        assert!(check(global, options).await.is_err());
    }
}
