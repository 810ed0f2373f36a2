use std::env;
use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use fs_err as fs;
use log::{info, warn};
use resolve_path::PathResolveExt;

use crate::catalog::{Catalog, DEFAULT_OUTPUT_DIR};
use crate::options::Global;
use crate::render;

#[derive(Debug, Args)]
pub struct PlaceholdersOptions {
    /// The directory to write placeholder images into. Unlike `fetch`, this
    /// directory must already exist.
    pub dir: Option<PathBuf>,

    /// Placeholder dimensions.
    #[clap(
        long,
        default_value = "800x800",
        value_parser(clap::builder::ValueParser::new(parse_size))
    )]
    pub size: (u32, u32),

    /// A TrueType font file to draw labels with. Without this, a list of
    /// well-known system font locations is tried.
    #[clap(long)]
    pub font: Option<PathBuf>,

    /// Label height in pixels.
    #[clap(long, default_value_t = 100.0)]
    pub font_size: f32,
}

fn parse_size(value: &str) -> anyhow::Result<(u32, u32)> {
    if let Some((width, height)) = value
        .split_once('x')
        .map(|(w, h)| (w.parse::<u32>(), h.parse::<u32>()))
    {
        Ok((width?, height?))
    } else {
        bail!("invalid dimensions passed - please pass your dimensions in the WxH format (e.g. 100x100, 200x200, etc)")
    }
}

pub async fn placeholders(global: Global, options: PlaceholdersOptions) -> anyhow::Result<()> {
    let catalog = Catalog::load(global.catalog.as_deref())?;

    let dir = match options.dir {
        Some(dir) => dir.try_resolve()?.into_owned(),
        None => env::current_dir()?.join(DEFAULT_OUTPUT_DIR),
    };

    let font = render::load_font(options.font.as_deref())?;
    if font.is_none() {
        warn!("no usable label font found; placeholders will have no text (pass --font to pick one)");
    }

    for (filename, placeholder) in &catalog.placeholders {
        let image = render::render_placeholder(
            &placeholder.label,
            placeholder.color,
            font.as_ref(),
            options.size,
            options.font_size,
        );

        let encoded = render::encode_jpeg(&image)?;
        fs::write(dir.join(filename), encoded)?;

        info!("created placeholder: {}", filename);
    }

    info!(
        "{} placeholder image(s) written to {}",
        catalog.placeholders.len(),
        dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::GenericImageView;

    fn options_for(dir: &std::path::Path) -> PlaceholdersOptions {
        PlaceholdersOptions {
            dir: Some(dir.to_owned()),
            size: (64, 64),
            font: None,
            font_size: 16.0,
        }
    }

    fn global() -> Global {
        Global {
            catalog: None,
            verbosity: 0,
        }
    }

    #[tokio::test]
    async fn test_placeholders_writes_all_catalog_files() {
        let dir = tempfile::tempdir().unwrap();

        placeholders(global(), options_for(dir.path())).await.unwrap();

        let expected = [
            "lego-set-001.jpg",
            "desk-lamp-001.jpg",
            "pillow-001.jpg",
            "book-001.jpg",
        ];

        for filename in &expected {
            let image = image::open(dir.path().join(filename)).unwrap();
            assert_eq!(image.dimensions(), (64, 64));
        }

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), expected.len());
    }

    #[tokio::test]
    async fn test_placeholders_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("book-001.jpg"), b"stale bytes").unwrap();

        placeholders(global(), options_for(dir.path())).await.unwrap();

        image::open(dir.path().join("book-001.jpg")).unwrap();
    }

    #[tokio::test]
    async fn test_placeholders_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        assert!(placeholders(global(), options_for(&missing)).await.is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x800").unwrap(), (800, 800));
        assert_eq!(parse_size("120x64").unwrap(), (120, 64));
        assert!(parse_size("800").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("800x").is_err());
    }
}
