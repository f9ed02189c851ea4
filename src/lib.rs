//! AIE - Awesome Image Editor
//!
//! A layered raster image editor: import images as layers, reorder, hide
//! and move them, and pan/zoom around the composited canvas.

mod app;
mod ui;

pub mod canvas_view;
pub mod compositor;
pub mod config;
pub mod constants;
pub mod error;
pub mod import;
pub mod keybindings;
pub mod layer_list;
pub mod model;
pub mod test_image;
pub mod tools;
pub mod viewport;

pub use app::EditorApp;
