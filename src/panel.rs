//! Control panel implemented with egui/eframe
//!
//! The panel is the root viewport; the overlay is an immediate child
//! viewport whose position, size and passthrough flag mirror the overlay
//! state every frame. All user intent flows one way: panel controls call
//! operations on [`OverlayState`], and the viewport builder carries the
//! result back to the window system.

use std::path::Path;

use eframe::egui;
use tracing::{error, info};

use crate::cli::Args;
use crate::config::Settings;
use crate::constants::files::IMAGE_EXTENSIONS;
use crate::constants::overlay::{
    DEFAULT_OPACITY_PERCENT, POINTS_PER_SCROLL_LINE, WHEEL_ZOOM_STEP, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};
use crate::constants::panel::{PADDING, SECTION_SPACING, STATUS_ERROR, STATUS_OK};
use crate::decode;
use crate::overlay::{InteractionMode, OverlayState};

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

pub struct PanelApp {
    overlay: Option<OverlayState>,
    texture: Option<egui::TextureHandle>,
    opacity_percent: u8,
    settings: Settings,
    status: Option<StatusMessage>,
}

impl PanelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        info!("Initializing control panel");
        let mut app = Self {
            overlay: None,
            texture: None,
            opacity_percent: args.opacity.unwrap_or(DEFAULT_OPACITY_PERCENT),
            settings: Settings::load(),
            status: None,
        };
        if let Some(path) = &args.image {
            let opacity = app.opacity_percent;
            app.load_from_path(path, opacity);
        }
        app
    }

    fn pick_and_load(&mut self) {
        // A cancelled dialog returns None; prior state stays untouched.
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.load_from_path(&path, DEFAULT_OPACITY_PERCENT);
    }

    /// Decode the file and push it into the overlay, constructing the
    /// overlay on the first successful load and reusing it afterwards.
    /// A decode failure reports a notice and changes nothing.
    fn load_from_path(&mut self, path: &Path, opacity_percent: u8) {
        let source = match decode::load_image(path) {
            Ok(source) => source,
            Err(err) => {
                error!(path = %path.display(), error = ?err, "Failed to load image");
                self.status = Some(StatusMessage {
                    text: format!("Could not load image: {err:#}"),
                    color: STATUS_ERROR,
                });
                return;
            }
        };

        info!(path = %path.display(), width = source.width, height = source.height, "Image loaded");
        match self.overlay.as_mut() {
            Some(overlay) => overlay.set_image(source),
            None => {
                self.overlay = Some(OverlayState::new(source, self.settings.restore_position()));
            }
        }

        self.opacity_percent = opacity_percent;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_opacity(opacity_percent);
        }
        self.status = Some(StatusMessage {
            text: "Image loaded.".to_string(),
            color: STATUS_OK,
        });
    }

    fn panel_ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.heading("Refpin");
            ui.label("Choose an image to overlay:");

            if ui.button("Load image…").clicked() {
                self.pick_and_load();
            }
            if let Some(status) = &self.status {
                ui.colored_label(status.color, &status.text);
            }

            ui.add_space(SECTION_SPACING);

            let loaded = self.overlay.is_some();
            let mode = self
                .overlay
                .as_ref()
                .map_or(InteractionMode::Interactive, |o| o.mode);

            ui.add_enabled_ui(loaded, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Opacity:");
                    if ui
                        .add(egui::Slider::new(&mut self.opacity_percent, 0..=100).suffix("%"))
                        .changed()
                        && let Some(overlay) = self.overlay.as_mut()
                    {
                        overlay.set_opacity(self.opacity_percent);
                    }
                });

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(
                            mode == InteractionMode::Interactive,
                            egui::Button::new("Pin overlay"),
                        )
                        .clicked()
                        && let Some(overlay) = self.overlay.as_mut()
                    {
                        overlay.set_mode(InteractionMode::Passthrough);
                    }
                    if ui
                        .add_enabled(
                            mode == InteractionMode::Passthrough,
                            egui::Button::new("Unpin overlay"),
                        )
                        .clicked()
                        && let Some(overlay) = self.overlay.as_mut()
                    {
                        overlay.set_mode(InteractionMode::Interactive);
                    }
                });

                ui.horizontal(|ui| {
                    if ui.button("Zoom in").clicked()
                        && let Some(overlay) = self.overlay.as_mut()
                    {
                        overlay.zoom(ZOOM_IN_FACTOR);
                    }
                    if ui.button("Zoom out").clicked()
                        && let Some(overlay) = self.overlay.as_mut()
                    {
                        overlay.zoom(ZOOM_OUT_FACTOR);
                    }
                    if ui.button("Reset").clicked()
                        && let Some(overlay) = self.overlay.as_mut()
                    {
                        overlay.reset();
                        self.opacity_percent = DEFAULT_OPACITY_PERCENT;
                    }
                });
            });
        });
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if quit_requested(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.panel_ui(ctx);

        if let Some(overlay) = self.overlay.as_mut() {
            show_overlay(ctx, overlay, &mut self.texture);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(overlay) = &self.overlay {
            let (x, y) = overlay.position_px();
            self.settings.remember_position(x, y);
            match self.settings.save() {
                Ok(()) => info!(x, y, "Persisted overlay position"),
                Err(err) => error!(error = ?err, "Failed to persist overlay position"),
            }
        }
        info!("Panel exiting");
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Transparent clear so the overlay viewport shows only its image
        egui::Rgba::TRANSPARENT.to_array()
    }
}

/// Q or Escape quits from either window.
fn quit_requested(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape))
}

/// Draw the overlay as a borderless, always-on-top child viewport.
fn show_overlay(
    ctx: &egui::Context,
    overlay: &mut OverlayState,
    texture: &mut Option<egui::TextureHandle>,
) {
    let builder = egui::ViewportBuilder::default()
        .with_title("refpin overlay")
        .with_position(overlay.geometry.pos)
        .with_inner_size(overlay.geometry.size)
        .with_transparent(true)
        .with_decorations(false)
        .with_resizable(false)
        .with_taskbar(false)
        .with_always_on_top()
        .with_mouse_passthrough(overlay.mode == InteractionMode::Passthrough);

    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("refpin_overlay"),
        builder,
        |ctx, _class| {
            if quit_requested(ctx) {
                ctx.send_viewport_cmd_to(egui::ViewportId::ROOT, egui::ViewportCommand::Close);
            }

            upload_texture(ctx, overlay, texture);

            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    let rect = ui.max_rect();
                    if let Some(texture) = texture.as_ref() {
                        ui.put(
                            rect,
                            egui::Image::new(egui::load::SizedTexture::new(
                                texture.id(),
                                rect.size(),
                            )),
                        );
                    }

                    let response =
                        ui.interact(rect, egui::Id::new("overlay_drag"), egui::Sense::drag());
                    if response.drag_started() {
                        overlay.begin_drag();
                    }
                    if overlay.dragging && response.dragged() {
                        let delta = response.drag_delta();
                        overlay.move_by(delta.x, delta.y);
                    }
                    if response.drag_stopped() {
                        overlay.end_drag();
                    }
                });

            handle_wheel_zoom(ctx, overlay);
        },
    );
}

/// Wheel input over the overlay: one notch scales by 1 +/- 0.1.
fn handle_wheel_zoom(ctx: &egui::Context, overlay: &mut OverlayState) {
    ctx.input(|i| {
        for event in &i.events {
            if let egui::Event::MouseWheel { unit, delta, .. } = event {
                let steps = match unit {
                    egui::MouseWheelUnit::Line | egui::MouseWheelUnit::Page => delta.y,
                    egui::MouseWheelUnit::Point => delta.y / POINTS_PER_SCROLL_LINE,
                };
                overlay.zoom(1.0 + steps * WHEEL_ZOOM_STEP);
            }
        }
    });
}

/// Re-upload the rendered bitmap after an opacity change or image swap.
fn upload_texture(
    ctx: &egui::Context,
    overlay: &mut OverlayState,
    texture: &mut Option<egui::TextureHandle>,
) {
    if !overlay.needs_upload() && texture.is_some() {
        return;
    }
    let rendered = overlay.rendered();
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [rendered.width as usize, rendered.height as usize],
        &rendered.rgba,
    );
    match texture {
        Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
        None => *texture = Some(ctx.load_texture("overlay-image", image, egui::TextureOptions::LINEAR)),
    }
    overlay.mark_uploaded();
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn app() -> PanelApp {
        PanelApp {
            overlay: None,
            texture: None,
            opacity_percent: DEFAULT_OPACITY_PERCENT,
            settings: Settings::default(),
            status: None,
        }
    }

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let pixels = vec![200u8; (width * height * 4) as usize];
        image::RgbaImage::from_raw(width, height, pixels)
            .unwrap()
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn first_load_constructs_overlay_at_restored_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "a.png", 4, 4);

        let mut app = app();
        app.settings.remember_position(321, 123);
        app.load_from_path(&path, DEFAULT_OPACITY_PERCENT);

        let overlay = app.overlay.as_ref().unwrap();
        assert_eq!(overlay.geometry.pos, pos2(321.0, 123.0));
        assert_eq!(overlay.opacity_percent(), 35);
        assert_eq!(app.opacity_percent, 35);
        assert_eq!(app.status.as_ref().unwrap().color, STATUS_OK);
    }

    #[test]
    fn decode_failure_leaves_state_untouched_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"not an image").unwrap();

        let mut app = app();
        app.load_from_path(&bad, DEFAULT_OPACITY_PERCENT);

        assert!(app.overlay.is_none());
        assert_eq!(app.status.as_ref().unwrap().color, STATUS_ERROR);
    }

    #[test]
    fn failed_load_keeps_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_test_png(dir.path(), "good.png", 6, 2);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"not an image").unwrap();

        let mut app = app();
        app.load_from_path(&good, DEFAULT_OPACITY_PERCENT);
        app.load_from_path(&bad, DEFAULT_OPACITY_PERCENT);

        let overlay = app.overlay.as_ref().unwrap();
        assert_eq!(overlay.native_size(), egui::vec2(6.0, 2.0));
        assert_eq!(app.status.as_ref().unwrap().color, STATUS_ERROR);
    }

    #[test]
    fn second_load_reuses_overlay_and_keeps_position() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_test_png(dir.path(), "first.png", 4, 4);
        let second = write_test_png(dir.path(), "second.png", 9, 5);

        let mut app = app();
        app.load_from_path(&first, DEFAULT_OPACITY_PERCENT);
        app.overlay.as_mut().unwrap().move_by(40.0, 0.0);
        app.overlay.as_mut().unwrap().set_opacity(80);
        app.opacity_percent = 80;

        app.load_from_path(&second, DEFAULT_OPACITY_PERCENT);

        let overlay = app.overlay.as_ref().unwrap();
        assert_eq!(overlay.geometry.pos, pos2(240.0, 200.0));
        assert_eq!(overlay.geometry.size, egui::vec2(9.0, 5.0));
        // Default opacity is re-applied on every load
        assert_eq!(overlay.opacity_percent(), 35);
        assert_eq!(app.opacity_percent, 35);
    }

    #[test]
    fn startup_opacity_override_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "a.png", 2, 2);

        let mut app = app();
        app.load_from_path(&path, 60);

        assert_eq!(app.overlay.as_ref().unwrap().opacity_percent(), 60);
        assert_eq!(app.opacity_percent, 60);
    }
}
