use super::{CanvasTool, ToolInput, ToolKind};
use crate::model::Project;

/// Selectable from the palette but does not edit anything yet.
#[derive(Debug, Default)]
pub struct CropTool;

impl CropTool {
    pub fn new() -> Self {
        Self
    }
}

impl CanvasTool for CropTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Crop
    }

    fn mouse_press(&mut self, _input: &ToolInput, _project: &mut Project) -> bool {
        false
    }

    fn mouse_move(&mut self, _input: &ToolInput, _project: &mut Project) -> bool {
        false
    }

    fn mouse_release(&mut self, _input: &ToolInput, _project: &mut Project) -> bool {
        false
    }
}
