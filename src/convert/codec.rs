use image::{DynamicImage, ImageEncoder};
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

use super::error::CodecError;
use super::formats::OutputFormat;

enum DecodeFailure {
    Image(image::ImageError),
    Heic(String),
}

fn is_heic(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| ext == "heic" || ext == "heif")
}

/// Transcodes a HEIC source to a temporary PNG the `image` crate can decode.
/// Tries `sips` (ships with macOS) first, then ImageMagick.
fn preprocess_heic(path: &Path) -> Result<NamedTempFile, String> {
    let temp = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .map_err(|e| e.to_string())?;

    let sips = Command::new("sips")
        .arg("-s")
        .arg("format")
        .arg("png")
        .arg(path)
        .arg("--out")
        .arg(temp.path())
        .output();
    if let Ok(output) = &sips {
        let wrote_png = temp.path().metadata().map(|m| m.len() > 0).unwrap_or(false);
        if output.status.success() && wrote_png {
            return Ok(temp);
        }
    }

    let magick = Command::new("magick").arg(path).arg(temp.path()).output();
    match magick {
        Ok(output) if output.status.success() => Ok(temp),
        Ok(output) => Err(String::from_utf8_lossy(&output.stderr).trim().to_string()),
        Err(e) => Err(format!("no HEIC decoder available (sips/magick): {e}")),
    }
}

fn try_decode(path: &Path) -> Result<DynamicImage, DecodeFailure> {
    if is_heic(path) {
        let temp = preprocess_heic(path).map_err(DecodeFailure::Heic)?;
        image::open(temp.path()).map_err(DecodeFailure::Image)
    } else {
        image::open(path).map_err(DecodeFailure::Image)
    }
}

pub fn open_image(path: &Path) -> Result<DynamicImage, CodecError> {
    try_decode(path).map_err(|failure| match failure {
        DecodeFailure::Image(source) => CodecError::Open {
            path: path.to_path_buf(),
            source,
        },
        DecodeFailure::Heic(reason) => CodecError::HeicPreprocess {
            path: path.to_path_buf(),
            reason,
        },
    })
}

/// Checks that the source decodes cleanly. A full decode is the strongest
/// validation the `image` crate offers, so the handle is dropped afterwards
/// and the caller re-opens for encoding.
pub fn verify_image(path: &Path) -> Result<(), CodecError> {
    try_decode(path).map(|_| ()).map_err(|failure| match failure {
        DecodeFailure::Image(source) => CodecError::Corrupt {
            path: path.to_path_buf(),
            source,
        },
        DecodeFailure::Heic(reason) => CodecError::HeicPreprocess {
            path: path.to_path_buf(),
            reason,
        },
    })
}

/// Bounded thumbnail for the preview pane; preserves aspect ratio.
pub fn preview_thumbnail(img: &DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    img.thumbnail(max_w, max_h)
}

pub fn encode_image(
    img: &DynamicImage,
    dest: &Path,
    format: OutputFormat,
    quality: u8,
) -> Result<(), CodecError> {
    let io_err = |source| CodecError::Io {
        path: dest.to_path_buf(),
        source,
    };
    let encode_err = |source| CodecError::Encode {
        path: dest.to_path_buf(),
        source,
    };

    match format {
        OutputFormat::Jpeg => {
            // image's jpeg encoder writes 4:4:4; chroma is never subsampled.
            // JPEG has no alpha channel, so flatten to RGB before encoding.
            let file = std::fs::File::create(dest).map_err(io_err)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, quality);
            encoder.encode_image(&img.to_rgb8()).map_err(encode_err)?;
        }
        OutputFormat::Png => {
            let file = std::fs::File::create(dest).map_err(io_err)?;
            let encoder = image::codecs::png::PngEncoder::new_with_quality(
                file,
                image::codecs::png::CompressionType::Fast,
                image::codecs::png::FilterType::Adaptive,
            );
            encoder
                .write_image(img.as_bytes(), img.width(), img.height(), img.color().into())
                .map_err(encode_err)?;
        }
        OutputFormat::Bmp | OutputFormat::Tiff | OutputFormat::Webp => {
            img.save_with_format(dest, format.to_image_format())
                .map_err(encode_err)?;
        }
    }

    Ok(())
}
