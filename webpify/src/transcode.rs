use crate::classify::{FileEntry, JPEG_EXTENSIONS, WEBP_EXTENSION, has_extension};
use crate::options::ConversionOptions;
use crate::statistics::Statistics;

use anyhow::Context;
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

pub fn webp_destination(entry: &FileEntry, output_root: &Path) -> PathBuf {
    output_root.join(entry.relative.with_extension(WEBP_EXTENSION))
}

/// Converts one image and records the outcome. A failure is logged and counted, never returned.
pub fn convert_image(
    entry: &FileEntry,
    position: usize,
    total: usize,
    output_root: &Path,
    options: &ConversionOptions,
    statistics: &mut Statistics,
) {
    let destination = webp_destination(entry, output_root);

    log::info!("[{}/{}] Converting: {} ==> {}", position, total, entry.source.display(), destination.display());

    match transcode_to_webp(&entry.source, &destination, options) {
        Ok(()) => {
            log::info!("  Done: {}", entry.relative.with_extension(WEBP_EXTENSION).display());
            statistics.converted_images += 1;
        }
        Err(error) => {
            log::warn!("  Failed to convert {}: {:#}", entry.source.display(), error);
            statistics.failed_images += 1;
        }
    }
}

fn transcode_to_webp(source: &Path, destination: &Path, options: &ConversionOptions) -> anyhow::Result<()> {
    let mut image = decode_image(source)?;

    if image.color().has_alpha() && has_extension(source, &JPEG_EXTENSIONS) {
        image = DynamicImage::ImageRgb8(flatten_onto_white(&image));
    }

    let encoded = encode_webp(&image, options)?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }

    fs::write(destination, encoded).with_context(|| format!("Failed to write '{}'", destination.display()))?;

    Ok(())
}

fn decode_image(source: &Path) -> anyhow::Result<DynamicImage> {
    let reader = ImageReader::open(source)
        .with_context(|| format!("Failed to open '{}'", source.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read '{}'", source.display()))?;

    reader.decode().with_context(|| format!("Failed to decode '{}'", source.display()))
}

/// Composites `image` over an opaque white background, using its alpha channel as the mask.
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());

    for (target, source) in flattened.pixels_mut().zip(rgba.pixels()) {
        let [red, green, blue, alpha] = source.0;
        *target = Rgb([blend_onto_white(red, alpha), blend_onto_white(green, alpha), blend_onto_white(blue, alpha)]);
    }

    flattened
}

fn blend_onto_white(channel: u8, alpha: u8) -> u8 {
    let channel = u32::from(channel);
    let alpha = u32::from(alpha);

    // rounded, never exceeds 255
    ((channel * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}

pub fn encode_webp(image: &DynamicImage, options: &ConversionOptions) -> anyhow::Result<Vec<u8>> {
    let mut config = webp::WebPConfig::new().map_err(|_| anyhow::anyhow!("Failed to initialize the WebP encoder configuration"))?;
    config.quality = f32::from(options.quality());
    config.method = i32::from(options.method());
    config.lossless = i32::from(options.lossless());

    // grey and 16 bit images are narrowed to what libwebp accepts
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height()).encode_advanced(&config)
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height()).encode_advanced(&config)
    };

    let memory = encoded.map_err(|error| anyhow::anyhow!("WebP encoding failed: {:?}", error))?;

    Ok(memory.to_vec())
}
