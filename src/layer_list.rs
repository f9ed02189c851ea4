//! Scrollable list of layers, topmost first.
//!
//! Row geometry is derived from the project and the scroll offset each
//! time it is needed; the list keeps no per-row state.

use tiny_skia::{FilterQuality, Transform};
use aie_ui::{icons, Bounds, Event, MouseButton, Point, Renderer, Theme};

use crate::constants::{EYE_ICON_SIZE, LAYER_NAME_FONT_SIZE, LIST_MARGIN, THUMBNAIL_SIZE};
use crate::model::{Layer, LayerId, Project, ProjectEvent, ProjectObserver};

pub const ROW_HEIGHT: f32 = THUMBNAIL_SIZE;

/// What a point in the list lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHit {
    Visibility(LayerId),
    Row(LayerId),
    Empty,
}

#[derive(Debug, Default)]
pub struct LayerList {
    pub bounds: Bounds,
    scroll: f32,
}

impl LayerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    fn content_height(project: &Project) -> f32 {
        project.len() as f32 * ROW_HEIGHT
    }

    pub fn max_scroll(&self, project: &Project) -> f32 {
        (Self::content_height(project) - self.bounds.height).max(0.0)
    }

    /// Returns whether the offset changed.
    pub fn set_scroll(&mut self, offset: f32, project: &Project) -> bool {
        let clamped = offset.clamp(0.0, self.max_scroll(project));
        let changed = clamped != self.scroll;
        self.scroll = clamped;
        changed
    }

    /// Re-clamp after the row count or the viewport changed.
    pub fn clamp_scroll(&mut self, project: &Project) -> bool {
        self.set_scroll(self.scroll, project)
    }

    /// Bounds of the `index`-th row from the top.
    fn row_bounds(&self, index: usize) -> Bounds {
        Bounds::new(
            self.bounds.x,
            self.bounds.y + index as f32 * ROW_HEIGHT - self.scroll,
            self.bounds.width,
            ROW_HEIGHT,
        )
    }

    fn eye_bounds(row: Bounds) -> Bounds {
        Bounds::new(
            row.x + LIST_MARGIN,
            row.y + (row.height - EYE_ICON_SIZE) / 2.0,
            EYE_ICON_SIZE,
            EYE_ICON_SIZE,
        )
    }

    fn thumbnail_bounds(row: Bounds) -> Bounds {
        Bounds::new(
            row.x + LIST_MARGIN + EYE_ICON_SIZE + LIST_MARGIN,
            row.y,
            THUMBNAIL_SIZE,
            THUMBNAIL_SIZE,
        )
    }

    pub fn hit_test(&self, project: &Project, position: Point) -> RowHit {
        if !self.bounds.contains(position) {
            return RowHit::Empty;
        }
        let offset = position.y - self.bounds.y + self.scroll;
        if offset < 0.0 {
            return RowHit::Empty;
        }
        let index = (offset / ROW_HEIGHT) as usize;
        let Some(layer) = project.iter_front_to_back().nth(index) else {
            return RowHit::Empty;
        };
        if Self::eye_bounds(self.row_bounds(index)).contains(position) {
            RowHit::Visibility(layer.id())
        } else {
            RowHit::Row(layer.id())
        }
    }

    /// Returns whether a repaint is needed.
    pub fn on_event(&mut self, event: &Event, project: &mut Project) -> bool {
        match event {
            Event::MousePressed {
                button: MouseButton::Left,
                position,
                modifiers,
            } => {
                if !self.bounds.contains(*position) {
                    return false;
                }
                match self.hit_test(project, *position) {
                    RowHit::Visibility(id) => project.toggle_hidden(id),
                    RowHit::Row(id) if modifiers.ctrl || modifiers.shift => {
                        project.toggle_selected(id)
                    }
                    RowHit::Row(id) => project.select_only(id),
                    RowHit::Empty => project.deselect_all(),
                }
                true
            }
            Event::MouseWheel {
                delta,
                position,
                modifiers,
            } if self.bounds.contains(*position) && !modifiers.alt => {
                self.set_scroll(self.scroll - delta, project)
            }
            _ => false,
        }
    }

    pub fn draw(&self, renderer: &mut Renderer, theme: &Theme, project: &Project) {
        renderer.push_clip(self.bounds);
        renderer.fill_rect(self.bounds, theme.base);

        for (index, layer) in project.iter_front_to_back().enumerate() {
            let row = self.row_bounds(index);
            if row.bottom() < self.bounds.y {
                continue;
            }
            if row.y > self.bounds.bottom() {
                break;
            }
            self.draw_row(renderer, theme, project, layer, row);
        }

        renderer.pop_clip();
    }

    fn draw_row(
        &self,
        renderer: &mut Renderer,
        theme: &Theme,
        project: &Project,
        layer: &Layer,
        row: Bounds,
    ) {
        let tint = if layer.is_selected {
            renderer.fill_rect(row, theme.highlight);
            theme.highlighted_text
        } else {
            theme.text
        };

        let eye = Self::eye_bounds(row);
        let (name, svg) = if layer.is_hidden {
            ("hide", icons::HIDE)
        } else {
            ("show", icons::SHOW)
        };
        renderer.draw_icon(name, svg, Point::new(eye.x, eye.y), EYE_ICON_SIZE as u32, tint);

        let thumb = Self::thumbnail_bounds(row);
        let size = layer.size();
        if !size.is_empty() {
            let (w, h) = size.scaled_to_fit(thumb.width, thumb.height);
            let scale = w / size.width as f32;
            let transform = Transform::from_row(
                scale,
                0.0,
                0.0,
                scale,
                thumb.x + (thumb.width - w) / 2.0,
                thumb.y + (thumb.height - h) / 2.0,
            );
            renderer.draw_pixmap(layer.pixmap().as_ref(), transform, FilterQuality::Bilinear);
        }

        let (_, text_h) = renderer.measure_text(&layer.name, LAYER_NAME_FONT_SIZE);
        renderer.draw_text(
            &layer.name,
            Point::new(thumb.right() + LIST_MARGIN, row.y + (row.height - text_h) / 2.0),
            LAYER_NAME_FONT_SIZE,
            tint,
        );

        if project.active_layer_id() == Some(layer.id()) {
            renderer.stroke_rect(row, 1.0, theme.highlighted_text);
        }
    }
}

impl ProjectObserver for LayerList {
    fn on_project_event(&mut self, event: ProjectEvent, project: &Project) {
        if matches!(event, ProjectEvent::LayersAdded | ProjectEvent::LayersDeleted) {
            self.clamp_scroll(project);
        }
    }
}
