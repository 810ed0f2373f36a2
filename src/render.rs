//! Placeholder rendering: a solid fill with the product label centered in
//! white, encoded as JPEG.

use std::path::{Path, PathBuf};

use fs_err as fs;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use log::{debug, warn};
use rusttype::{point, Font, Scale};
use thiserror::Error;

use crate::color::Rgb8;

/// Well-known places to look for a label font when none is given.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("could not read font file {path}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a usable TrueType font")]
    Unparseable { path: PathBuf },
}

/// Load the label font. An explicit path must load or the whole command
/// fails; otherwise the first loadable well-known font wins. `None` means no
/// font is available and labels are skipped.
pub fn load_font(explicit: Option<&Path>) -> Result<Option<Font<'static>>, FontError> {
    if let Some(path) = explicit {
        return read_font(path).map(Some);
    }

    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }

        match read_font(path) {
            Ok(font) => {
                debug!("using label font {}", path.display());
                return Ok(Some(font));
            }
            Err(err) => warn!("skipping font candidate: {}", err),
        }
    }

    Ok(None)
}

fn read_font(path: &Path) -> Result<Font<'static>, FontError> {
    let data = fs::read(path).map_err(|source| FontError::Unreadable {
        path: path.to_owned(),
        source,
    })?;

    Font::try_from_vec(data).ok_or_else(|| FontError::Unparseable {
        path: path.to_owned(),
    })
}

/// Draw one placeholder image.
pub fn render_placeholder(
    label: &str,
    color: Rgb8,
    font: Option<&Font<'_>>,
    (width, height): (u32, u32),
    font_size: f32,
) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, Rgb(color.0));

    if let Some(font) = font {
        let scale = Scale::uniform(font_size);
        let (text_width, text_height) = measure(label, font, scale);

        // Centered; a label wider than the image is pinned to the left edge.
        let x = ((width as i32 - text_width) / 2).max(0);
        let y = ((height as i32 - text_height) / 2).max(0);

        draw_text_mut(&mut image, LABEL_COLOR, x as u32, y as u32, scale, font, label);
    }

    image
}

/// Pixel extents of `label` at `scale`, laid out the same way
/// `draw_text_mut` lays it out.
fn measure(label: &str, font: &Font<'_>, scale: Scale) -> (i32, i32) {
    let v_metrics = font.v_metrics(scale);

    let width = font
        .layout(label, scale, point(0.0, v_metrics.ascent))
        .filter_map(|glyph| glyph.pixel_bounding_box().map(|bounds| bounds.max.x))
        .max()
        .unwrap_or(0);

    let height = (v_metrics.ascent - v_metrics.descent).ceil() as i32;

    (width, height)
}

pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let (width, height) = image.dimensions();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY).encode(
        image.as_raw(),
        width,
        height,
        ColorType::Rgb8,
    )?;

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_font_is_solid_fill() {
        let image = render_placeholder("Pillow", Rgb8([0xE8, 0xB4, 0xF8]), None, (64, 48), 20.0);

        assert_eq!(image.dimensions(), (64, 48));
        assert_eq!(*image.get_pixel(0, 0), Rgb([0xE8, 0xB4, 0xF8]));
        assert_eq!(*image.get_pixel(63, 47), Rgb([0xE8, 0xB4, 0xF8]));
        assert_eq!(*image.get_pixel(32, 24), Rgb([0xE8, 0xB4, 0xF8]));
    }

    #[test]
    fn test_encoded_placeholder_decodes_at_requested_size() {
        use image::GenericImageView;

        let image = render_placeholder("Book", Rgb8([0x8B, 0x73, 0x55]), None, (80, 80), 20.0);
        let encoded = encode_jpeg(&image).unwrap();

        let decoded = image::load_from_memory(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (80, 80));
    }

    #[test]
    fn test_probing_for_fonts_never_fails() {
        // Whether this machine has any of the candidate fonts or not, the
        // probe itself must not error.
        load_font(None).unwrap();
    }

    #[test]
    fn test_explicit_font_path_must_exist() {
        let missing = Path::new("definitely/not/a/font.ttf");
        assert!(load_font(Some(missing)).is_err());
    }
}
