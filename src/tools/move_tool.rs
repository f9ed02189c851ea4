use aie_ui::{MouseButton, Point};

use super::{CanvasTool, ToolInput, ToolKind};
use crate::model::Project;

/// Drags every selected layer by the pointer's model-space motion.
#[derive(Debug, Default)]
pub struct MoveTool {
    last: Option<Point>,
}

impl MoveTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}

impl CanvasTool for MoveTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Move
    }

    fn mouse_press(&mut self, input: &ToolInput, project: &mut Project) -> bool {
        if input.button == Some(MouseButton::Left) && project.has_selection() {
            self.last = Some(input.model);
        }
        false
    }

    fn mouse_move(&mut self, input: &ToolInput, project: &mut Project) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        let delta = input.model - last;
        self.last = Some(input.model);
        if delta == Point::zero() {
            return false;
        }
        project.translate_selected(delta);
        true
    }

    fn mouse_release(&mut self, input: &ToolInput, _project: &mut Project) -> bool {
        if input.button == Some(MouseButton::Left) {
            self.last = None;
        }
        false
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Layer, ProjectEvent};
    use crate::test_image;
    use aie_ui::Modifiers;

    fn input(x: f32, y: f32, button: Option<MouseButton>) -> ToolInput {
        ToolInput {
            model: Point::new(x, y),
            button,
            modifiers: Modifiers::NONE,
        }
    }

    fn project_with_two_layers() -> Project {
        let mut project = Project::new(100, 100);
        project.add_layers(vec![
            Layer::from_pixmap("a", test_image::solid(4, 4, [255, 0, 0, 255])),
            Layer::from_pixmap("b", test_image::solid(4, 4, [0, 255, 0, 255])),
        ]);
        project.drain_events();
        project
    }

    #[test]
    fn test_drag_moves_selected_layers_only() {
        let mut project = project_with_two_layers();
        let first = project.layers()[0].id();
        project.select_only(first);
        project.drain_events();

        let mut tool = MoveTool::new();
        tool.mouse_press(&input(10.0, 10.0, Some(MouseButton::Left)), &mut project);
        assert!(tool.is_dragging());
        assert!(tool.mouse_move(&input(15.0, 12.0, None), &mut project));
        assert!(tool.mouse_move(&input(20.0, 20.0, None), &mut project));
        tool.mouse_release(&input(20.0, 20.0, Some(MouseButton::Left)), &mut project);
        assert!(!tool.is_dragging());

        assert_eq!(project.layers()[0].position, Point::new(10.0, 10.0));
        assert_eq!(project.layers()[1].position, Point::zero());

        let events = project.drain_events();
        assert_eq!(events, vec![ProjectEvent::LayersVisibilityChanged; 2]);
    }

    #[test]
    fn test_press_without_selection_does_nothing() {
        let mut project = project_with_two_layers();
        let mut tool = MoveTool::new();
        tool.mouse_press(&input(0.0, 0.0, Some(MouseButton::Left)), &mut project);
        assert!(!tool.is_dragging());
        assert!(!tool.mouse_move(&input(5.0, 5.0, None), &mut project));
        assert!(project.drain_events().is_empty());
    }

    #[test]
    fn test_right_button_does_not_start_drag() {
        let mut project = project_with_two_layers();
        let first = project.layers()[0].id();
        project.select_only(first);
        let mut tool = MoveTool::new();
        tool.mouse_press(&input(0.0, 0.0, Some(MouseButton::Right)), &mut project);
        assert!(!tool.is_dragging());
    }
}
