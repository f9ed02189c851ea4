//! Global constants for the editor

/// Canvas size of a new project.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1920;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1080;

/// Zoom factors per Alt+wheel notch.
pub const ZOOM_IN_FACTOR: f32 = 1.1;
pub const ZOOM_OUT_FACTOR: f32 = 0.9;

/// Checkerboard behind the composite: tile side and cell side in screen pixels.
pub const CHECKER_TILE_SIZE: u32 = 16;
pub const CHECKER_CELL_SIZE: u32 = 8;

/// Layer list geometry.
pub const THUMBNAIL_SIZE: f32 = 64.0;
pub const EYE_ICON_SIZE: f32 = 16.0;
pub const LIST_MARGIN: f32 = 10.0;
pub const LAYER_NAME_FONT_SIZE: f32 = 13.0;

/// Tool palette geometry.
pub const TOOL_ICON_SIZE: u32 = 24;
pub const TOOL_PADDING: f32 = 3.0;
pub const TOOL_SPACING: f32 = 3.0;

/// Window chrome.
pub const TOP_BAR_HEIGHT: f32 = 36.0;
pub const LAYERS_TOOLBAR_HEIGHT: f32 = 32.0;
pub const DEFAULT_LAYERS_PANEL_WIDTH: f32 = 260.0;
pub const MIN_LAYERS_PANEL_WIDTH: f32 = 160.0;

/// Window size on startup.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1400, 860);
pub const MIN_WINDOW_SIZE: (u32, u32) = (640, 400);

/// File extensions offered by the import dialog.
pub const IMPORT_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg"];
