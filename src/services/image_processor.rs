use std::io::Cursor;

use anyhow::{Context, Result};
use image::codecs::webp::{WebPEncoder, WebPQuality};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView};
use tracing::debug;

/// Lossy WebP quality used for every processed image.
pub const WEBP_QUALITY: f32 = 80.0;

pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode an uploaded image, honor its EXIF orientation, downscale to
/// `max_width` preserving aspect ratio (never upscale) and re-encode as
/// lossy WebP.
pub fn process_to_webp(data: &[u8], max_width: u32) -> Result<ProcessedImage> {
    let decoded = image::load_from_memory(data).context("failed to decode image")?;
    let oriented = apply_exif_orientation(decoded, data);
    let (width, height) = oriented.dimensions();

    let resized = if width > max_width {
        let target_height =
            ((height as u64 * max_width as u64 + width as u64 / 2) / width as u64).max(1) as u32;
        oriented.resize_exact(max_width, target_height, FilterType::Lanczos3)
    } else {
        oriented
    };

    let (out_width, out_height) = resized.dimensions();
    let bytes = encode_webp(&resized)?;
    debug!(
        "processed image {}x{} -> {}x{} ({} bytes)",
        width,
        height,
        out_width,
        out_height,
        bytes.len()
    );

    Ok(ProcessedImage {
        bytes,
        width: out_width,
        height: out_height,
    })
}

#[allow(deprecated)]
fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut out = Vec::new();
    let encoder =
        WebPEncoder::new_with_quality(Cursor::new(&mut out), WebPQuality::lossy(WEBP_QUALITY as u8));
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        encoder
            .encode(rgba.as_raw(), width, height, ColorType::Rgba8)
            .context("failed to encode WebP")?;
    } else {
        let rgb = img.to_rgb8();
        encoder
            .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
            .context("failed to encode WebP")?;
    }
    Ok(out)
}

/// Phone cameras record rotation in EXIF metadata instead of rotating the
/// pixels; bake the orientation in before resizing.
fn apply_exif_orientation(img: DynamicImage, raw: &[u8]) -> DynamicImage {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(raw)) {
        Ok(exif) => exif,
        Err(_) => return img,
    };
    let Some(orientation) = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
    else {
        return img;
    };
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn wide_image_is_capped_at_ceiling_preserving_aspect() {
        let processed = process_to_webp(&png_bytes(2000, 1000), 1000).unwrap();
        assert_eq!(processed.width, 1000);
        assert_eq!(processed.height, 500);

        let decoded = image::load_from_memory(&processed.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1000, 500));
    }

    #[test]
    fn narrow_image_is_never_upscaled() {
        let processed = process_to_webp(&png_bytes(400, 300), 1000).unwrap();
        assert_eq!(processed.width, 400);
        assert_eq!(processed.height, 300);
    }

    #[test]
    fn odd_aspect_ratio_rounds_instead_of_truncating() {
        let processed = process_to_webp(&png_bytes(1500, 1000), 1000).unwrap();
        assert_eq!(processed.width, 1000);
        assert_eq!(processed.height, 667);
    }

    #[test]
    fn garbage_bytes_fail_to_process() {
        assert!(process_to_webp(b"definitely not an image", 1000).is_err());
    }
}
