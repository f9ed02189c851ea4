//! Push button state shared by toolbars.

use crate::event::{Event, MouseButton};
use crate::layout::{Bounds, Point};
use crate::renderer::{Color, Renderer};
use crate::theme::Theme;

/// Corner radius of button backgrounds.
pub const BUTTON_RADIUS: f32 = 3.0;

/// What a button shows.
#[derive(Debug, Clone, Copy)]
pub enum ButtonContent<'a> {
    Icon {
        name: &'static str,
        svg: &'static [u8],
        size: u32,
    },
    Label(&'a str),
    IconLabel {
        name: &'static str,
        svg: &'static [u8],
        size: u32,
        label: &'a str,
    },
}

/// Result of feeding an event to a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonResponse {
    pub clicked: bool,
    pub needs_redraw: bool,
    /// The event was inside the button and should not reach widgets below.
    pub consumed: bool,
}

/// Hover and press tracking for one button. Bounds are set by the owner
/// during layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub bounds: Bounds,
    hovered: bool,
    pressed: bool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Clicks fire on release inside the button after a press inside it.
    pub fn on_event(&mut self, event: &Event) -> ButtonResponse {
        let mut response = ButtonResponse::default();
        match event {
            Event::MouseMoved { position, .. } => {
                let hovered = self.bounds.contains(*position);
                if hovered != self.hovered {
                    self.hovered = hovered;
                    response.needs_redraw = true;
                }
            }
            Event::MousePressed {
                button: MouseButton::Left,
                position,
                ..
            } if self.bounds.contains(*position) => {
                self.pressed = true;
                response.needs_redraw = true;
                response.consumed = true;
            }
            Event::MouseReleased {
                button: MouseButton::Left,
                position,
                ..
            } => {
                if self.pressed {
                    self.pressed = false;
                    response.needs_redraw = true;
                    if self.bounds.contains(*position) {
                        response.clicked = true;
                        response.consumed = true;
                    }
                }
            }
            Event::CursorLeft => {
                if self.hovered || self.pressed {
                    self.hovered = false;
                    self.pressed = false;
                    response.needs_redraw = true;
                }
            }
            _ => {}
        }
        response
    }

    /// Draw the button. `active` paints the checked look (tinted icon and
    /// background) used by the tool palette.
    pub fn draw(
        &self,
        renderer: &mut Renderer,
        theme: &Theme,
        content: ButtonContent<'_>,
        active: bool,
    ) {
        let background = if self.pressed {
            Some(theme.button_pressed)
        } else if active {
            Some(theme.base)
        } else if self.hovered {
            Some(theme.button_hover)
        } else {
            None
        };
        if let Some(color) = background {
            renderer.fill_rounded_rect(self.bounds, BUTTON_RADIUS, color);
        }

        let tint = if active {
            theme.highlighted_text
        } else {
            theme.window_text
        };
        draw_content(renderer, self.bounds, content, tint);
    }
}

fn draw_content(renderer: &mut Renderer, bounds: Bounds, content: ButtonContent<'_>, tint: Color) {
    const LABEL_SIZE: f32 = 13.0;
    const GAP: f32 = 6.0;

    match content {
        ButtonContent::Icon { name, svg, size } => {
            let half = size as f32 / 2.0;
            let center = bounds.center();
            renderer.draw_icon(name, svg, Point::new(center.x - half, center.y - half), size, tint);
        }
        ButtonContent::Label(label) => {
            let (w, h) = renderer.measure_text(label, LABEL_SIZE);
            let center = bounds.center();
            renderer.draw_text(
                label,
                Point::new(center.x - w / 2.0, center.y - h / 2.0),
                LABEL_SIZE,
                tint,
            );
        }
        ButtonContent::IconLabel {
            name,
            svg,
            size,
            label,
        } => {
            let (w, h) = renderer.measure_text(label, LABEL_SIZE);
            let total = size as f32 + GAP + w;
            let center = bounds.center();
            let x = center.x - total / 2.0;
            renderer.draw_icon(
                name,
                svg,
                Point::new(x, center.y - size as f32 / 2.0),
                size,
                tint,
            );
            renderer.draw_text(
                label,
                Point::new(x + size as f32 + GAP, center.y - h / 2.0),
                LABEL_SIZE,
                tint,
            );
        }
    }
}

/// Width a button needs for `content` with `padding` on each side.
pub fn preferred_width(renderer: &mut Renderer, content: ButtonContent<'_>, padding: f32) -> f32 {
    let inner = match content {
        ButtonContent::Icon { size, .. } => size as f32,
        ButtonContent::Label(label) => renderer.measure_text(label, 13.0).0,
        ButtonContent::IconLabel { size, label, .. } => {
            size as f32 + 6.0 + renderer.measure_text(label, 13.0).0
        }
    };
    inner + 2.0 * padding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    fn button() -> ButtonState {
        ButtonState {
            bounds: Bounds::new(0.0, 0.0, 30.0, 30.0),
            ..Default::default()
        }
    }

    fn press(x: f32, y: f32) -> Event {
        Event::MousePressed {
            button: MouseButton::Left,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    fn release(x: f32, y: f32) -> Event {
        Event::MouseReleased {
            button: MouseButton::Left,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_press_and_release_inside_clicks() {
        let mut b = button();
        assert!(b.on_event(&press(5.0, 5.0)).consumed);
        assert!(b.on_event(&release(6.0, 6.0)).clicked);
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut b = button();
        b.on_event(&press(5.0, 5.0));
        let response = b.on_event(&release(50.0, 50.0));
        assert!(!response.clicked);
        assert!(response.needs_redraw);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut b = button();
        assert_eq!(b.on_event(&release(5.0, 5.0)), ButtonResponse::default());
    }

    #[test]
    fn test_hover_tracking() {
        let mut b = button();
        let moved = |x, y| Event::MouseMoved {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        };
        assert!(b.on_event(&moved(10.0, 10.0)).needs_redraw);
        assert!(b.is_hovered());
        assert!(!b.on_event(&moved(11.0, 10.0)).needs_redraw);
        b.on_event(&Event::CursorLeft);
        assert!(!b.is_hovered());
    }
}
