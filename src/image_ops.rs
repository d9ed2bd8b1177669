//! Image processing operations: thumbnails, stamp normalization, resizing.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Result, StampError};

/// Standard edge length of a stamp image in the library.
pub const STAMP_SIZE: u32 = 512;

/// Edge length of the square button thumbnails inside a profile.
pub const THUMBNAIL_SIZE: u32 = 80;

/// Edge length of the blank profile icon.
pub const PROFILE_ICON_SIZE: u32 = 256;

/// Computes the hex-encoded SHA-256 digest of raw file bytes.
///
/// Used as the stable in-archive filename for stamp thumbnails: identical
/// content always maps to the identical name, so repeated builds are
/// byte-stable and filename collisions cannot occur.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Strategy for producing button thumbnails from stamp images.
///
/// Thumbnailing is best-effort: the builder falls back to a verbatim copy
/// when a strategy fails, so implementations only need to report errors,
/// never to recover from them.
pub trait Thumbnailer {
    /// Renders `source` into `dest` as a `size`x`size` button icon.
    fn render(&self, source: &Path, dest: &Path, size: u32) -> Result<()>;

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Scales the stamp to fit a transparent square canvas, centered.
///
/// Preserves aspect ratio and the alpha channel; uses Lanczos3 like the
/// rest of the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaledThumbnailer;

impl Thumbnailer for ScaledThumbnailer {
    fn render(&self, source: &Path, dest: &Path, size: u32) -> Result<()> {
        let img = image::open(source).map_err(|e| StampError::ImageProcessing(e.to_string()))?;

        // Fit within size x size, keeping aspect ratio
        let resized = img.resize(size, size, FilterType::Lanczos3).to_rgba8();

        // Transparent canvas, resized image pasted centered
        let mut canvas = RgbaImage::new(size, size);
        let (rw, rh) = resized.dimensions();
        let x = (size - rw) / 2;
        let y = (size - rh) / 2;
        image::imageops::overlay(&mut canvas, &resized, x.into(), y.into());

        canvas
            .save(dest)
            .map_err(|e| StampError::ImageProcessing(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "scaled"
    }
}

/// Copies the source file byte-for-byte, without any image decoding.
///
/// The degraded fallback: the device shows the full-size stamp instead of
/// a proper thumbnail.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimCopy;

impl Thumbnailer for VerbatimCopy {
    fn render(&self, source: &Path, dest: &Path, _size: u32) -> Result<()> {
        std::fs::copy(source, dest)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "verbatim"
    }
}

/// Renders a thumbnail with the given strategy, degrading to a verbatim
/// copy if the strategy fails.
pub fn thumbnail_or_copy(
    thumbnailer: &dyn Thumbnailer,
    source: &Path,
    dest: &Path,
    size: u32,
) -> Result<()> {
    match thumbnailer.render(source, dest, size) {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(
                source = %source.display(),
                strategy = thumbnailer.name(),
                error = %e,
                "Thumbnail generation failed, copying original"
            );
            VerbatimCopy.render(source, dest, size)
        }
    }
}

/// Result of an aspect-preserving resize, for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ResizeReport {
    pub old_width: u32,
    pub old_height: u32,
    pub new_width: u32,
    pub new_height: u32,
}

/// Resizes an image to a target height, preserving aspect ratio.
///
/// Writes the result to `output` (which may equal `input` to resize in
/// place) and reports the before/after dimensions.
pub fn resize_to_height(input: &Path, output: &Path, height: u32) -> Result<ResizeReport> {
    if !input.exists() {
        return Err(StampError::ImageNotFound {
            path: input.display().to_string(),
        });
    }

    let img = image::open(input).map_err(|e| StampError::ImageProcessing(e.to_string()))?;
    let (old_width, old_height) = img.dimensions();

    // New width from the aspect ratio, rounded down like integer division
    let new_width = u32::try_from(
        (u64::from(old_width) * u64::from(height)) / u64::from(old_height.max(1)),
    )
    .map_err(|_| StampError::ImageProcessing("resized width overflows u32".to_string()))?;

    let resized = img.resize_exact(new_width.max(1), height, FilterType::Lanczos3);
    resized
        .save(output)
        .map_err(|e| StampError::ImageProcessing(e.to_string()))?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        "Resized {old_width}x{old_height} -> {new_width}x{height}"
    );

    Ok(ResizeReport {
        old_width,
        old_height,
        new_width: new_width.max(1),
        new_height: height,
    })
}

/// Normalizes an arbitrary source image into a library stamp: exact
/// `size`x`size`, RGBA, ready to save as `{index}.png`.
pub fn normalize_stamp(input: &Path, size: u32) -> Result<RgbaImage> {
    if !input.exists() {
        return Err(StampError::ImageNotFound {
            path: input.display().to_string(),
        });
    }

    let img = image::open(input).map_err(|e| StampError::ImageProcessing(e.to_string()))?;
    let resized = img.resize_exact(size, size, FilterType::Lanczos3);
    Ok(resized.to_rgba8())
}

/// Produces the blank opaque white icon used as the profile cover image.
pub fn blank_icon(size: u32) -> DynamicImage {
    let canvas = RgbaImage::from_pixel(size, size, image::Rgba([255, 255, 255, 255]));
    DynamicImage::ImageRgba8(canvas)
}
