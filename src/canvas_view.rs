//! Central canvas: navigation first, then the current tool.

use aie_ui::{Bounds, CursorKind, Event, Key, Modifiers, MouseButton, Point, Renderer, Theme};

use crate::compositor::Compositor;
use crate::model::Project;
use crate::tools::{ToolBox, ToolInput};
use crate::viewport::Viewport;

pub struct CanvasView {
    pub bounds: Bounds,
    viewport: Viewport,
    space_held: bool,
    /// Button that started the pan in progress.
    pan_button: Option<MouseButton>,
    /// A button pressed inside the view that the tool is tracking.
    tool_button: Option<MouseButton>,
}

impl CanvasView {
    pub fn new() -> Self {
        Self {
            bounds: Bounds::default(),
            viewport: Viewport::new(),
            space_held: false,
            pan_button: None,
            tool_button: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> CursorKind {
        if self.viewport.is_panning() {
            CursorKind::Grabbing
        } else if self.space_held {
            CursorKind::Grab
        } else {
            CursorKind::Default
        }
    }

    fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.bounds.x, p.y - self.bounds.y)
    }

    /// Scale the canvas (or the layer bounds) to fit the view.
    pub fn fit_to_view(&mut self, project: &Project, use_layer_bounds: bool) -> bool {
        let content = if use_layer_bounds {
            project.layers_bounds_size()
        } else {
            project.canvas_size()
        };
        let fitted = self
            .viewport
            .fit_to_view(content, self.bounds.width, self.bounds.height);
        if !fitted {
            log::debug!(
                "Fit to view skipped: content {}x{}, view {}x{}",
                content.width,
                content.height,
                self.bounds.width,
                self.bounds.height
            );
        }
        fitted
    }

    /// Returns whether a repaint is needed.
    pub fn on_event(&mut self, event: &Event, project: &mut Project, tools: &mut ToolBox) -> bool {
        match event {
            Event::KeyPressed { key, modifiers, .. } => {
                if *key == Key::Space {
                    let changed = !self.space_held;
                    self.space_held = true;
                    return changed;
                }
                tools
                    .current_mut()
                    .is_some_and(|tool| tool.key_press(*key, *modifiers))
            }
            Event::KeyReleased { key, modifiers } => {
                if *key == Key::Space {
                    let changed = self.space_held;
                    self.space_held = false;
                    return changed;
                }
                tools
                    .current_mut()
                    .is_some_and(|tool| tool.key_release(*key, *modifiers))
            }
            Event::MousePressed {
                button,
                position,
                modifiers,
            } => {
                if !self.bounds.contains(*position) || self.viewport.is_panning() {
                    return false;
                }
                let local = self.to_local(*position);
                let starts_pan = *button == MouseButton::Middle
                    || (*button == MouseButton::Left && self.space_held);
                if starts_pan {
                    self.viewport.begin_pan(local);
                    self.pan_button = Some(*button);
                    return true;
                }
                self.tool_button = Some(*button);
                self.forward(local, Some(*button), *modifiers, project, tools, Phase::Press)
            }
            Event::MouseMoved {
                position,
                modifiers,
            } => {
                let local = self.to_local(*position);
                if self.viewport.update_pan(local) {
                    return true;
                }
                if self.tool_button.is_none() && !self.bounds.contains(*position) {
                    return false;
                }
                self.forward(local, None, *modifiers, project, tools, Phase::Move)
            }
            Event::MouseReleased {
                button,
                position,
                modifiers,
            } => {
                let local = self.to_local(*position);
                if self.viewport.is_panning() && self.pan_button == Some(*button) {
                    self.pan_button = None;
                    return self.viewport.end_pan();
                }
                if self.tool_button != Some(*button) {
                    return false;
                }
                self.tool_button = None;
                self.forward(local, Some(*button), *modifiers, project, tools, Phase::Release)
            }
            Event::MouseWheel {
                delta,
                position,
                modifiers,
            } => {
                if !modifiers.alt || !self.bounds.contains(*position) || *delta == 0.0 {
                    return false;
                }
                self.viewport.zoom_at(self.to_local(*position), *delta > 0.0);
                true
            }
            Event::CursorLeft => {
                self.pan_button = None;
                let mut changed = self.viewport.end_pan();
                if self.tool_button.take().is_some() {
                    if let Some(tool) = tools.current_mut() {
                        tool.reset();
                    }
                    changed = true;
                }
                changed
            }
            Event::Resized { .. } => false,
        }
    }

    fn forward(
        &self,
        local: Point,
        button: Option<MouseButton>,
        modifiers: Modifiers,
        project: &mut Project,
        tools: &mut ToolBox,
        phase: Phase,
    ) -> bool {
        let Some(model) = self.viewport.screen_to_model(local) else {
            return false;
        };
        let Some(tool) = tools.current_mut() else {
            return false;
        };
        let input = ToolInput {
            model,
            button,
            modifiers,
        };
        match phase {
            Phase::Press => tool.mouse_press(&input, project),
            Phase::Move => tool.mouse_move(&input, project),
            Phase::Release => tool.mouse_release(&input, project),
        }
    }

    pub fn draw(&self, renderer: &mut Renderer, theme: &Theme, compositor: &Compositor) {
        renderer.push_clip(self.bounds);
        renderer.fill_rect(self.bounds, theme.base);
        let transform = self
            .viewport
            .effective()
            .then_translate(self.bounds.x, self.bounds.y);
        compositor.render(renderer, transform.to_skia());
        renderer.pop_clip();
    }
}

impl Default for CanvasView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Press,
    Move,
    Release,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;
    use crate::test_image;

    fn setup() -> (CanvasView, Project, ToolBox) {
        let mut view = CanvasView::new();
        view.bounds = Bounds::new(100.0, 50.0, 400.0, 300.0);
        let mut project = Project::new(200, 200);
        project.add_layers(vec![Layer::from_pixmap(
            "a",
            test_image::solid(10, 10, [255, 0, 0, 255]),
        )]);
        let id = project.layers()[0].id();
        project.select_only(id);
        project.drain_events();
        (view, project, ToolBox::new())
    }

    fn press(button: MouseButton, x: f32, y: f32) -> Event {
        Event::MousePressed {
            button,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    fn moved(x: f32, y: f32) -> Event {
        Event::MouseMoved {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    fn release(button: MouseButton, x: f32, y: f32) -> Event {
        Event::MouseReleased {
            button,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    fn space(pressed: bool) -> Event {
        if pressed {
            Event::KeyPressed {
                key: Key::Space,
                modifiers: Modifiers::NONE,
                repeat: false,
            }
        } else {
            Event::KeyReleased {
                key: Key::Space,
                modifiers: Modifiers::NONE,
            }
        }
    }

    #[test]
    fn test_middle_drag_pans_without_touching_layers() {
        let (mut view, mut project, mut tools) = setup();
        view.on_event(&press(MouseButton::Middle, 150.0, 100.0), &mut project, &mut tools);
        assert_eq!(view.cursor(), CursorKind::Grabbing);
        view.on_event(&moved(170.0, 90.0), &mut project, &mut tools);
        view.on_event(&release(MouseButton::Middle, 170.0, 90.0), &mut project, &mut tools);

        let committed = view.viewport().committed();
        assert_eq!((committed.dx, committed.dy), (20.0, -10.0));
        assert_eq!(project.layers()[0].position, Point::zero());
        assert!(project.drain_events().is_empty());
    }

    #[test]
    fn test_space_turns_left_drag_into_pan() {
        let (mut view, mut project, mut tools) = setup();
        view.on_event(&space(true), &mut project, &mut tools);
        assert_eq!(view.cursor(), CursorKind::Grab);
        view.on_event(&press(MouseButton::Left, 150.0, 100.0), &mut project, &mut tools);
        view.on_event(&moved(160.0, 100.0), &mut project, &mut tools);
        view.on_event(&release(MouseButton::Left, 160.0, 100.0), &mut project, &mut tools);
        view.on_event(&space(false), &mut project, &mut tools);

        assert_eq!(view.cursor(), CursorKind::Default);
        assert_eq!(view.viewport().committed().dx, 10.0);
        assert_eq!(project.layers()[0].position, Point::zero());
    }

    #[test]
    fn test_left_drag_reaches_move_tool_in_model_space() {
        let (mut view, mut project, mut tools) = setup();
        // Zoom 2x about the view origin so screen deltas halve in model space
        view.on_event(
            &Event::MouseWheel {
                delta: 1.0,
                position: Point::new(100.0, 50.0),
                modifiers: Modifiers {
                    alt: true,
                    ..Modifiers::NONE
                },
            },
            &mut project,
            &mut tools,
        );
        let scale = view.viewport().committed().scale;

        view.on_event(&press(MouseButton::Left, 120.0, 60.0), &mut project, &mut tools);
        view.on_event(&moved(142.0, 60.0), &mut project, &mut tools);
        view.on_event(&release(MouseButton::Left, 142.0, 60.0), &mut project, &mut tools);

        let moved_by = project.layers()[0].position.x;
        assert!((moved_by - 22.0 / scale).abs() < 0.001);
    }

    #[test]
    fn test_pan_ends_only_on_its_own_button() {
        let (mut view, mut project, mut tools) = setup();
        view.on_event(&press(MouseButton::Left, 110.0, 60.0), &mut project, &mut tools);
        view.on_event(&press(MouseButton::Middle, 110.0, 60.0), &mut project, &mut tools);
        assert!(view.viewport().is_panning());

        // Releasing the tool's button leaves the middle-button pan running
        view.on_event(&release(MouseButton::Left, 110.0, 60.0), &mut project, &mut tools);
        assert!(view.viewport().is_panning());
        view.on_event(&release(MouseButton::Middle, 110.0, 60.0), &mut project, &mut tools);
        assert!(!view.viewport().is_panning());

        // No button held: hovering must not drag the selection
        view.on_event(&moved(160.0, 90.0), &mut project, &mut tools);
        assert_eq!(project.layers()[0].position, Point::zero());
    }

    #[test]
    fn test_tool_press_ignored_while_panning() {
        let (mut view, mut project, mut tools) = setup();
        view.on_event(&press(MouseButton::Middle, 110.0, 60.0), &mut project, &mut tools);
        assert!(!view.on_event(&press(MouseButton::Left, 110.0, 60.0), &mut project, &mut tools));
        view.on_event(&release(MouseButton::Middle, 110.0, 60.0), &mut project, &mut tools);
        view.on_event(&release(MouseButton::Left, 110.0, 60.0), &mut project, &mut tools);
        view.on_event(&moved(150.0, 80.0), &mut project, &mut tools);
        assert_eq!(project.layers()[0].position, Point::zero());
    }

    #[test]
    fn test_wheel_without_alt_does_not_zoom() {
        let (mut view, mut project, mut tools) = setup();
        let changed = view.on_event(
            &Event::MouseWheel {
                delta: 1.0,
                position: Point::new(150.0, 100.0),
                modifiers: Modifiers::NONE,
            },
            &mut project,
            &mut tools,
        );
        assert!(!changed);
        assert_eq!(view.viewport().committed().scale, 1.0);
    }

    #[test]
    fn test_press_outside_bounds_is_ignored() {
        let (mut view, mut project, mut tools) = setup();
        assert!(!view.on_event(&press(MouseButton::Middle, 10.0, 10.0), &mut project, &mut tools));
        assert!(!view.viewport().is_panning());
    }

    #[test]
    fn test_fit_to_view_uses_view_size() {
        let (mut view, project, _) = setup();
        assert!(view.fit_to_view(&project, false));
        // 200x200 canvas in a 400x300 view
        assert_eq!(view.viewport().committed().scale, 1.5);
        assert!(view.fit_to_view(&project, true));
        assert_eq!(view.viewport().committed().scale, 30.0);
    }

    #[test]
    fn test_fit_to_view_skips_empty_view() {
        let (mut view, project, _) = setup();
        view.bounds = Bounds::default();
        assert!(!view.fit_to_view(&project, false));
    }
}
