//! Canvas tools.
//!
//! Navigation (pan and zoom) is handled by the canvas view before any
//! tool sees input; whatever is left goes to the current tool.

mod crop;
mod move_tool;

pub use crop::CropTool;
pub use move_tool::MoveTool;

use aie_ui::{Key, Modifiers, MouseButton, Point};
use serde::{Deserialize, Serialize};

use crate::model::Project;

/// Available canvas tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    /// Drags the selected layers
    #[default]
    Move,
    /// Placeholder for cropping
    Crop,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Move => "Move",
            ToolKind::Crop => "Crop",
        }
    }

    /// Palette order.
    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::Move, ToolKind::Crop]
    }

    /// Icon cache key and SVG data.
    pub fn icon(&self) -> (&'static str, &'static [u8]) {
        match self {
            ToolKind::Move => ("move", aie_ui::icons::MOVE),
            ToolKind::Crop => ("crop", aie_ui::icons::CROP),
        }
    }
}

/// Pointer input already mapped into model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolInput {
    /// Position in canvas (model) coordinates.
    pub model: Point,
    /// `None` for plain moves.
    pub button: Option<MouseButton>,
    pub modifiers: Modifiers,
}

/// A tool receiving the canvas input left over after navigation.
///
/// Every handler returns whether it changed something worth a repaint.
/// Mutations go through [`Project`] so their notifications reach every
/// observer.
pub trait CanvasTool {
    fn kind(&self) -> ToolKind;

    fn mouse_press(&mut self, input: &ToolInput, project: &mut Project) -> bool;
    fn mouse_move(&mut self, input: &ToolInput, project: &mut Project) -> bool;
    fn mouse_release(&mut self, input: &ToolInput, project: &mut Project) -> bool;

    fn key_press(&mut self, _key: Key, _modifiers: Modifiers) -> bool {
        false
    }

    fn key_release(&mut self, _key: Key, _modifiers: Modifiers) -> bool {
        false
    }

    /// Drop any in-progress interaction (tool switch, cursor left).
    fn reset(&mut self) {}
}

/// Owns one instance of every tool; exactly one is current.
pub struct ToolBox {
    tools: Vec<Box<dyn CanvasTool>>,
    current: ToolKind,
}

impl ToolBox {
    pub fn new() -> Self {
        Self {
            tools: vec![
                Box::new(MoveTool::new()) as Box<dyn CanvasTool>,
                Box::new(CropTool::new()),
            ],
            current: ToolKind::default(),
        }
    }

    pub fn current(&self) -> ToolKind {
        self.current
    }

    /// Returns `false` when `kind` was already current.
    pub fn select(&mut self, kind: ToolKind) -> bool {
        if self.current == kind {
            return false;
        }
        if let Some(tool) = self.current_mut() {
            tool.reset();
        }
        log::info!("Tool switched: {} -> {}", self.current.name(), kind.name());
        self.current = kind;
        true
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn CanvasTool + 'static)> {
        let kind = self.current;
        self.tools
            .iter_mut()
            .find(|tool| tool.kind() == kind)
            .map(|tool| &mut **tool)
    }
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_tool() {
        let mut toolbox = ToolBox::new();
        for &kind in ToolKind::all() {
            toolbox.select(kind);
            let tool = toolbox.current_mut().expect("tool for kind");
            assert_eq!(tool.kind(), kind);
        }
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut toolbox = ToolBox::new();
        assert_eq!(toolbox.current(), ToolKind::Move);
        assert!(toolbox.select(ToolKind::Crop));
        assert!(!toolbox.select(ToolKind::Crop));
        assert_eq!(toolbox.current(), ToolKind::Crop);
    }
}
