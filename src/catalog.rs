//! The product image catalog: which files should exist in the image
//! directory, and where their pixels come from. An image is either fetched
//! from a remote URL or generated locally as a labeled placeholder.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use fs_err as fs;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::color::Rgb8;

/// Where product images land when no directory is given on the command
/// line, relative to the current directory.
pub const DEFAULT_OUTPUT_DIR: &str = "frontend/public/images/products";

/// Product photos to fetch, keyed by output filename.
const REMOTE_IMAGES: &[(&str, &str)] = &[
    (
        "headphones-001.jpg",
        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800",
    ),
    (
        "cable-001.jpg",
        "https://images.unsplash.com/photo-1625948515291-69613efd103f?w=800",
    ),
    (
        "phone-case-001.jpg",
        "https://images.unsplash.com/photo-1556656793-08538906a9f8?w=800",
    ),
    (
        "handbag-001.jpg",
        "https://images.unsplash.com/photo-1548036328-c9fa89d128fa?w=800",
    ),
    (
        "shoes-001.jpg",
        "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=800",
    ),
    (
        "lego-set-001.jpg",
        "https://images.unsplash.com/photo-1461151304318-e6dafb5b0c78?w=800",
    ),
    (
        "toy-robot-001.jpg",
        "https://images.unsplash.com/photo-1607082348824-0a96f2a4b9da?w=800",
    ),
    (
        "desk-lamp-001.jpg",
        "https://images.unsplash.com/photo-1565636192335-14f9652f8e0c?w=800",
    ),
    (
        "pillow-001.jpg",
        "https://images.unsplash.com/photo-1595429676963-aa181de4cd6f?w=800",
    ),
    (
        "book-001.jpg",
        "https://images.unsplash.com/photo-1507842072343-583f20270319?w=800",
    ),
    (
        "watch-001.jpg",
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=800",
    ),
];

/// Placeholders for products whose photo is still missing: output filename
/// to label and fill color.
const PLACEHOLDER_IMAGES: &[(&str, &str, &str)] = &[
    ("lego-set-001.jpg", "LEGO Set", "#FF6B00"),
    ("desk-lamp-001.jpg", "Desk Lamp", "#FFC700"),
    ("pillow-001.jpg", "Pillow", "#E8B4F8"),
    ("book-001.jpg", "Book", "#8B7355"),
];

/// A locally generated stand-in for a missing product photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placeholder {
    pub label: String,
    pub color: Rgb8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// filename -> source URL
    pub remote: BTreeMap<String, String>,

    /// filename -> placeholder description
    pub placeholders: BTreeMap<String, Placeholder>,
}

lazy_static! {
    static ref BUILTIN: Catalog = {
        let remote = REMOTE_IMAGES
            .iter()
            .map(|&(filename, url)| (filename.to_owned(), url.to_owned()))
            .collect();

        let placeholders = PLACEHOLDER_IMAGES
            .iter()
            .map(|&(filename, label, color)| {
                let placeholder = Placeholder {
                    label: label.to_owned(),
                    color: color.parse().expect("built-in placeholder color"),
                };

                (filename.to_owned(), placeholder)
            })
            .collect();

        Catalog {
            remote,
            placeholders,
        }
    };
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn read_from_file(path: &Path) -> anyhow::Result<Catalog> {
        let contents = fs::read_to_string(path)?;

        let catalog = toml::from_str(&contents)
            .with_context(|| format!("malformed catalog file {}", path.display()))?;

        Ok(catalog)
    }

    /// Resolve the catalog for this run. An explicit file replaces the
    /// built-in set entirely, it is not merged.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Catalog> {
        match path {
            Some(path) => Self::read_from_file(path),
            None => Ok(Self::builtin().clone()),
        }
    }

    /// Every filename the catalog accounts for. A filename may be backed by
    /// both a remote URL and a placeholder; it appears once.
    pub fn filenames(&self) -> BTreeSet<&str> {
        self.remote
            .keys()
            .chain(self.placeholders.keys())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.remote.len(), 11);
        assert_eq!(catalog.placeholders.len(), 4);

        // Every placeholder stands in for a product that also has a real
        // photo source.
        for filename in catalog.placeholders.keys() {
            assert!(catalog.remote.contains_key(filename));
        }

        assert_eq!(catalog.filenames().len(), 11);
    }

    #[test]
    fn test_read_catalog_from_toml() {
        let source = r##"
            [remote]
            "widget-001.jpg" = "https://example.com/widget.jpg"

            [placeholders."widget-002.jpg"]
            label = "Widget"
            color = "#336699"
        "##;

        let catalog: Catalog = toml::from_str(source).unwrap();

        assert_eq!(
            catalog.remote.get("widget-001.jpg").map(String::as_str),
            Some("https://example.com/widget.jpg")
        );

        let placeholder = catalog.placeholders.get("widget-002.jpg").unwrap();
        assert_eq!(placeholder.label, "Widget");
        assert_eq!(placeholder.color, Rgb8([0x33, 0x66, 0x99]));

        assert_eq!(catalog.filenames().len(), 2);
    }

    #[test]
    fn test_empty_catalog_file_is_valid() {
        let catalog: Catalog = toml::from_str("").unwrap();
        assert!(catalog.remote.is_empty());
        assert!(catalog.placeholders.is_empty());
    }

    #[test]
    fn test_catalog_serializes_colors_as_hex() {
        let value = serde_json::to_value(Catalog::builtin()).unwrap();
        assert_eq!(
            value["placeholders"]["lego-set-001.jpg"]["color"],
            serde_json::json!("#FF6B00")
        );
    }
}
