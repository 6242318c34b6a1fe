//! Image loading
//!
//! Decodes a picked file into the RGBA bitmap the overlay works on.

use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Decoded bitmap as loaded from disk. Replaced wholesale on each load,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Raw RGBA pixel data (4 bytes per pixel)
    pub rgba: Vec<u8>,
}

/// Load and decode an image file. The result is validated before any
/// window state is touched, so a bad file never leaves the overlay
/// half-initialized.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image file: {}", path.display()))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    ensure!(
        width > 0 && height > 0,
        "Decoded image is empty: {}",
        path.display()
    );

    Ok(SourceImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
