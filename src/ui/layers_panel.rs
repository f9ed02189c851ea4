//! Right-hand panel: layer list above a toolbar acting on the selection.

use aie_ui::{icons, Bounds, ButtonContent, ButtonState, Event, Renderer, Theme};

use super::Response;
use crate::constants::{LAYERS_TOOLBAR_HEIGHT, TOOL_SPACING};
use crate::keybindings::EditorAction;
use crate::layer_list::LayerList;
use crate::model::{Project, ProjectEvent, ProjectObserver};

const ICON_SIZE: u32 = 16;

struct ToolbarButton {
    state: ButtonState,
    name: &'static str,
    svg: &'static [u8],
    action: EditorAction,
}

pub struct LayersPanel {
    bounds: Bounds,
    toolbar: Bounds,
    pub list: LayerList,
    buttons: [ToolbarButton; 3],
}

impl LayersPanel {
    pub fn new() -> Self {
        let button = |name: &'static str, svg: &'static [u8], action| ToolbarButton {
            state: ButtonState::new(),
            name,
            svg,
            action,
        };
        Self {
            bounds: Bounds::default(),
            toolbar: Bounds::default(),
            list: LayerList::new(),
            buttons: [
                button("arrow-down", icons::ARROW_DOWN, EditorAction::LowerSelected),
                button("arrow-up", icons::ARROW_UP, EditorAction::RaiseSelected),
                button("trash", icons::TRASH, EditorAction::DeleteSelected),
            ],
        }
    }

    pub fn layout(&mut self, bounds: Bounds, project: &Project) {
        self.bounds = bounds;
        let toolbar_h = LAYERS_TOOLBAR_HEIGHT.min(bounds.height);
        self.list.bounds = Bounds::new(bounds.x, bounds.y, bounds.width, bounds.height - toolbar_h);
        self.toolbar = Bounds::new(bounds.x, self.list.bounds.bottom(), bounds.width, toolbar_h);
        self.list.clamp_scroll(project);

        let size = (toolbar_h - 2.0 * TOOL_SPACING).max(0.0);
        let mut x = self.toolbar.right();
        for button in self.buttons.iter_mut().rev() {
            x -= size + TOOL_SPACING;
            button.state.bounds = Bounds::new(x, self.toolbar.y + TOOL_SPACING, size, size);
        }
    }

    pub fn on_event(&mut self, event: &Event, project: &mut Project) -> Response {
        let mut response = Response {
            redraw: self.list.on_event(event, project),
            action: None,
        };
        for button in &mut self.buttons {
            let r = button.state.on_event(event);
            response.redraw |= r.needs_redraw;
            if r.clicked {
                response.action = Some(button.action);
            }
        }
        response
    }

    pub fn draw(&self, renderer: &mut Renderer, theme: &Theme, project: &Project) {
        self.list.draw(renderer, theme, project);
        renderer.fill_rect(self.toolbar, theme.window);
        renderer.fill_rect(
            Bounds::new(self.bounds.x, self.bounds.y, 1.0, self.bounds.height),
            theme.divider,
        );
        for button in &self.buttons {
            button.state.draw(
                renderer,
                theme,
                ButtonContent::Icon {
                    name: button.name,
                    svg: button.svg,
                    size: ICON_SIZE,
                },
                false,
            );
        }
    }
}

impl Default for LayersPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectObserver for LayersPanel {
    fn on_project_event(&mut self, event: ProjectEvent, project: &Project) {
        self.list.on_project_event(event, project);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aie_ui::{Modifiers, MouseButton};

    #[test]
    fn test_toolbar_buttons_emit_actions() {
        let mut project = Project::new(10, 10);
        let mut panel = LayersPanel::new();
        panel.layout(Bounds::new(0.0, 0.0, 200.0, 300.0), &project);
        assert_eq!(panel.list.bounds.height, 300.0 - LAYERS_TOOLBAR_HEIGHT);

        let expected = [
            EditorAction::LowerSelected,
            EditorAction::RaiseSelected,
            EditorAction::DeleteSelected,
        ];
        for (i, action) in expected.into_iter().enumerate() {
            let at = panel.buttons[i].state.bounds.center();
            panel.on_event(
                &Event::MousePressed {
                    button: MouseButton::Left,
                    position: at,
                    modifiers: Modifiers::NONE,
                },
                &mut project,
            );
            let response = panel.on_event(
                &Event::MouseReleased {
                    button: MouseButton::Left,
                    position: at,
                    modifiers: Modifiers::NONE,
                },
                &mut project,
            );
            assert_eq!(response.action, Some(action));
        }
    }

    #[test]
    fn test_buttons_are_right_aligned_in_toolbar() {
        let project = Project::new(10, 10);
        let mut panel = LayersPanel::new();
        panel.layout(Bounds::new(100.0, 50.0, 200.0, 300.0), &project);
        let last = panel.buttons[2].state.bounds;
        assert_eq!(last.right(), 300.0 - TOOL_SPACING);
        assert!(panel.toolbar.contains(last.center()));
    }
}
