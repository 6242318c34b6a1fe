//! Application-wide constants
//!
//! Single source of truth for default values and panel layout numbers.

/// Overlay defaults
pub mod overlay {
    /// Opacity applied after every load and by Reset, in percent
    pub const DEFAULT_OPACITY_PERCENT: u8 = 35;

    /// Fallback overlay position when no previous position was persisted
    pub const DEFAULT_POSITION: (i32, i32) = (200, 200);

    /// Fixed zoom factor for the panel's zoom-in button
    pub const ZOOM_IN_FACTOR: f32 = 1.1;

    /// Fixed zoom factor for the panel's zoom-out button
    pub const ZOOM_OUT_FACTOR: f32 = 0.9;

    /// Zoom step per mouse-wheel notch (factor = 1 + steps * step)
    pub const WHEEL_ZOOM_STEP: f32 = 0.1;

    /// Logical points egui reports per wheel notch when the backend
    /// delivers pixel-based scroll deltas
    pub const POINTS_PER_SCROLL_LINE: f32 = 50.0;
}

/// File loading
pub mod files {
    /// Extensions offered by the file-open dialog
    pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "xpm", "jpg", "bmp", "gif"];
}

/// Settings store
pub mod config {
    /// Directory under the user config dir holding the settings file
    pub const APP_DIR: &str = "refpin";

    /// Settings file name
    pub const FILENAME: &str = "settings.json";
}

/// Panel window layout
pub mod panel {
    pub const WINDOW_WIDTH: f32 = 320.0;
    pub const WINDOW_HEIGHT: f32 = 260.0;

    pub const SECTION_SPACING: f32 = 12.0;
    pub const PADDING: f32 = 6.0;

    pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
    pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
}
