//! Overlay window state
//!
//! Renders a single image at a controllable opacity, position and scale, and
//! gates whether the window intercepts pointer input. This is plain state:
//! the panel owns it, feeds input events into it, and mirrors its geometry
//! and interaction mode into the toolkit viewport every frame.

use egui::{Pos2, Vec2, pos2, vec2};
use tracing::info;

use crate::constants::overlay::DEFAULT_OPACITY_PERCENT;
use crate::decode::SourceImage;

/// Input mode for the overlay window.
///
/// Interactive accepts drag and scroll input; Passthrough forwards all
/// pointer input to whatever is beneath the window. The window stays
/// visible and topmost in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Interactive,
    Passthrough,
}

/// On-screen position and size of the overlay, in logical points.
/// Drag mutates position only; zoom mutates size only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    pub pos: Pos2,
    pub size: Vec2,
}

/// Source bitmap with every pixel's alpha replaced by the current opacity.
/// Recomputed in full on every opacity change, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Produce the displayed bitmap: RGB channels unchanged, alpha set to
/// round(255 * percent/100) at every pixel. Runs over the full image
/// before returning.
pub fn apply_opacity(source: &SourceImage, percent: u8) -> RenderedImage {
    let percent = percent.min(100);
    let alpha = (255.0 * f32::from(percent) / 100.0).round() as u8;

    let mut rgba = source.rgba.clone();
    for pixel in rgba.chunks_exact_mut(4) {
        pixel[3] = alpha;
    }

    RenderedImage {
        width: source.width,
        height: source.height,
        rgba,
    }
}

#[derive(Debug)]
pub struct OverlayState {
    source: SourceImage,
    rendered: RenderedImage,
    pub geometry: WindowGeometry,
    pub mode: InteractionMode,
    pub dragging: bool,
    opacity_percent: u8,
    texture_dirty: bool,
}

impl OverlayState {
    /// Construct the overlay at the restored (or default) position, sized to
    /// the image's native dimensions.
    pub fn new(source: SourceImage, position: (i32, i32)) -> Self {
        let rendered = apply_opacity(&source, DEFAULT_OPACITY_PERCENT);
        let size = vec2(source.width as f32, source.height as f32);
        info!(
            width = source.width,
            height = source.height,
            x = position.0,
            y = position.1,
            "Constructed overlay"
        );
        Self {
            source,
            rendered,
            geometry: WindowGeometry {
                pos: pos2(position.0 as f32, position.1 as f32),
                size,
            },
            mode: InteractionMode::Interactive,
            dragging: false,
            opacity_percent: DEFAULT_OPACITY_PERCENT,
            texture_dirty: true,
        }
    }

    /// Replace the source image and resize the window to its native size.
    /// Position and interaction mode are kept.
    pub fn set_image(&mut self, source: SourceImage) {
        info!(width = source.width, height = source.height, "Replacing overlay image");
        self.rendered = apply_opacity(&source, self.opacity_percent);
        self.geometry.size = vec2(source.width as f32, source.height as f32);
        self.source = source;
        self.texture_dirty = true;
    }

    /// Recompute the displayed bitmap at the given opacity. Synchronous and
    /// O(width * height); the caller's frame blocks until it completes.
    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity_percent = percent.min(100);
        self.rendered = apply_opacity(&self.source, self.opacity_percent);
        self.texture_dirty = true;
    }

    /// Apply a pointer drag delta to the window position. No-op while the
    /// overlay is pinned.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        if self.mode == InteractionMode::Passthrough {
            return;
        }
        self.geometry.pos += vec2(dx, dy);
    }

    /// Scale the window about its top-left corner. No-op while pinned; a
    /// non-positive factor is rejected.
    pub fn zoom(&mut self, factor: f32) {
        if self.mode == InteractionMode::Passthrough || !(factor > 0.0) || !factor.is_finite() {
            return;
        }
        self.geometry.size *= factor;
    }

    /// Switch between Interactive and Passthrough. Entering Passthrough
    /// cancels any drag in progress.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == InteractionMode::Passthrough {
            self.dragging = false;
        }
        if self.mode != mode {
            info!(?mode, "Overlay interaction mode changed");
        }
        self.mode = mode;
    }

    /// Restore native window size and the default opacity, discarding all
    /// zoom and opacity adjustments made since load.
    pub fn reset(&mut self) {
        self.geometry.size = self.native_size();
        self.set_opacity(DEFAULT_OPACITY_PERCENT);
    }

    pub fn begin_drag(&mut self) {
        self.dragging = self.mode == InteractionMode::Interactive;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn native_size(&self) -> Vec2 {
        vec2(self.source.width as f32, self.source.height as f32)
    }

    pub fn rendered(&self) -> &RenderedImage {
        &self.rendered
    }

    pub fn opacity_percent(&self) -> u8 {
        self.opacity_percent
    }

    /// Position rounded to whole pixels, as persisted at shutdown.
    pub fn position_px(&self) -> (i32, i32) {
        (
            self.geometry.pos.x.round() as i32,
            self.geometry.pos.y.round() as i32,
        )
    }

    pub fn needs_upload(&self) -> bool {
        self.texture_dirty
    }

    pub fn mark_uploaded(&mut self) {
        self.texture_dirty = false;
    }
}
