//! Window chrome around the canvas.
//!
//! Each component keeps only hover/press state and reports the editor
//! command a click maps to; the app performs it.

mod layers_panel;
mod progress;
mod tool_palette;
mod topbar;

pub use layers_panel::LayersPanel;
pub use progress::draw_progress_overlay;
pub use tool_palette::{ToolPalette, PALETTE_WIDTH};
pub use topbar::TopBar;

use aie_ui::Bounds;

use crate::constants::{MIN_LAYERS_PANEL_WIDTH, TOP_BAR_HEIGHT};
use crate::keybindings::EditorAction;

/// What a component made of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    pub redraw: bool,
    pub action: Option<EditorAction>,
}

impl Response {
    pub fn merge(&mut self, other: Response) {
        self.redraw |= other.redraw;
        if self.action.is_none() {
            self.action = other.action;
        }
    }
}

/// Window regions, left to right below the top bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Regions {
    pub top_bar: Bounds,
    pub tool_palette: Bounds,
    pub canvas: Bounds,
    pub layers_panel: Bounds,
}

impl Regions {
    pub fn compute(width: f32, height: f32, layers_panel_width: f32) -> Regions {
        let body_y = TOP_BAR_HEIGHT.min(height);
        let body_h = (height - body_y).max(0.0);
        let panel_w = layers_panel_width
            .max(MIN_LAYERS_PANEL_WIDTH)
            .min((width - PALETTE_WIDTH).max(0.0));
        let canvas_x = PALETTE_WIDTH.min(width);
        let canvas_w = (width - canvas_x - panel_w).max(0.0);

        Regions {
            top_bar: Bounds::new(0.0, 0.0, width, body_y),
            tool_palette: Bounds::new(0.0, body_y, canvas_x, body_h),
            canvas: Bounds::new(canvas_x, body_y, canvas_w, body_h),
            layers_panel: Bounds::new(canvas_x + canvas_w, body_y, panel_w, body_h),
        }
    }
}
