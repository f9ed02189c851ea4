//! Vertical strip of tool buttons on the left.

use aie_ui::{Bounds, ButtonContent, ButtonState, Event, Renderer, Theme};

use super::Response;
use crate::constants::{TOOL_ICON_SIZE, TOOL_PADDING, TOOL_SPACING};
use crate::keybindings::EditorAction;
use crate::tools::ToolKind;

const BUTTON_SIZE: f32 = TOOL_ICON_SIZE as f32 + 2.0 * TOOL_PADDING;
pub const PALETTE_WIDTH: f32 = BUTTON_SIZE + 2.0 * TOOL_SPACING;

pub struct ToolPalette {
    bounds: Bounds,
    buttons: Vec<(ToolKind, ButtonState)>,
}

impl ToolPalette {
    pub fn new() -> Self {
        Self {
            bounds: Bounds::default(),
            buttons: ToolKind::all()
                .iter()
                .map(|&kind| (kind, ButtonState::new()))
                .collect(),
        }
    }

    pub fn layout(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        let mut y = bounds.y + TOOL_SPACING;
        for (_, button) in &mut self.buttons {
            button.bounds = Bounds::new(bounds.x + TOOL_SPACING, y, BUTTON_SIZE, BUTTON_SIZE);
            y += BUTTON_SIZE + TOOL_SPACING;
        }
    }

    pub fn on_event(&mut self, event: &Event) -> Response {
        let mut response = Response::default();
        for (kind, button) in &mut self.buttons {
            let r = button.on_event(event);
            response.redraw |= r.needs_redraw;
            if r.clicked {
                response.action = Some(EditorAction::SelectTool(*kind));
            }
        }
        response
    }

    pub fn draw(&self, renderer: &mut Renderer, theme: &Theme, current: ToolKind) {
        renderer.fill_rect(self.bounds, theme.window);
        for (kind, button) in &self.buttons {
            let (name, svg) = kind.icon();
            button.draw(
                renderer,
                theme,
                ButtonContent::Icon {
                    name,
                    svg,
                    size: TOOL_ICON_SIZE,
                },
                *kind == current,
            );
        }
    }
}

impl Default for ToolPalette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aie_ui::{Modifiers, MouseButton, Point};

    fn click(palette: &mut ToolPalette, at: Point) -> Response {
        let mut response = palette.on_event(&Event::MousePressed {
            button: MouseButton::Left,
            position: at,
            modifiers: Modifiers::NONE,
        });
        response.merge(palette.on_event(&Event::MouseReleased {
            button: MouseButton::Left,
            position: at,
            modifiers: Modifiers::NONE,
        }));
        response
    }

    #[test]
    fn test_buttons_stack_vertically() {
        let mut palette = ToolPalette::new();
        palette.layout(Bounds::new(0.0, 36.0, PALETTE_WIDTH, 500.0));
        let first = palette.buttons[0].1.bounds;
        let second = palette.buttons[1].1.bounds;
        assert_eq!(first, Bounds::new(3.0, 39.0, 30.0, 30.0));
        assert_eq!(second.y, first.bottom() + TOOL_SPACING);
    }

    #[test]
    fn test_click_selects_tool() {
        let mut palette = ToolPalette::new();
        palette.layout(Bounds::new(0.0, 0.0, PALETTE_WIDTH, 500.0));
        let crop_center = palette.buttons[1].1.bounds.center();
        assert_eq!(
            click(&mut palette, crop_center).action,
            Some(EditorAction::SelectTool(ToolKind::Crop))
        );
        assert_eq!(click(&mut palette, Point::new(18.0, 400.0)).action, None);
    }
}
