//! Model-to-screen mapping: pan, zoom-at-cursor and fit-to-view.
//!
//! Screen coordinates here are relative to the canvas view's top-left
//! corner. A point maps as `screen = model * scale + (dx, dy)`.

use aie_ui::Point;

use crate::constants::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::model::Size;

/// Uniform scale followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub dx: f32,
    pub dy: f32,
}

impl ViewTransform {
    pub const fn new(scale: f32, dx: f32, dy: f32) -> Self {
        Self { scale, dx, dy }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn map(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.dx, p.y * self.scale + self.dy)
    }

    /// `None` when the scale is zero or not finite.
    pub fn invert(&self) -> Option<ViewTransform> {
        if self.scale == 0.0 || !self.scale.is_finite() || !self.dx.is_finite() || !self.dy.is_finite()
        {
            return None;
        }
        let inv = 1.0 / self.scale;
        Some(ViewTransform::new(inv, -self.dx * inv, -self.dy * inv))
    }

    /// This transform followed by a screen-space translation.
    pub fn then_translate(&self, tx: f32, ty: f32) -> ViewTransform {
        ViewTransform::new(self.scale, self.dx + tx, self.dy + ty)
    }

    /// This transform followed by scaling about the screen point `p`,
    /// i.e. `translate(p) * scale(factor) * translate(-p)`.
    pub fn then_scale_about(&self, p: Point, factor: f32) -> ViewTransform {
        ViewTransform::new(
            self.scale * factor,
            (self.dx - p.x) * factor + p.x,
            (self.dy - p.y) * factor + p.y,
        )
    }

    /// Transform that fits `content` inside a `width`x`height` viewport,
    /// aspect preserved and centered. `None` for degenerate sizes.
    pub fn fit(content: Size, width: f32, height: f32) -> Option<ViewTransform> {
        if content.is_empty() || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let (scaled_w, scaled_h) = content.scaled_to_fit(width, height);
        let scale = scaled_w / content.width as f32;
        Some(ViewTransform::new(
            scale,
            width / 2.0 - scaled_w / 2.0,
            height / 2.0 - scaled_h / 2.0,
        ))
    }

    pub fn to_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(self.scale, 0.0, 0.0, self.scale, self.dx, self.dy)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    Panning { start: Point, delta: Point },
}

/// Committed transform plus the pan in progress.
///
/// The pan delta is kept apart until the drag ends so a cancelled or
/// ongoing drag never accumulates rounding into the committed transform.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    committed: ViewTransform,
    pan: PanState,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed(&self) -> ViewTransform {
        self.committed
    }

    pub fn pan_state(&self) -> PanState {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.pan, PanState::Panning { .. })
    }

    /// Committed transform with the in-progress pan applied.
    pub fn effective(&self) -> ViewTransform {
        match self.pan {
            PanState::Idle => self.committed,
            PanState::Panning { delta, .. } => self.committed.then_translate(delta.x, delta.y),
        }
    }

    pub fn begin_pan(&mut self, at: Point) {
        self.pan = PanState::Panning {
            start: at,
            delta: Point::zero(),
        };
    }

    /// Returns `false` when not panning.
    pub fn update_pan(&mut self, at: Point) -> bool {
        match &mut self.pan {
            PanState::Panning { start, delta } => {
                *delta = at - *start;
                true
            }
            PanState::Idle => false,
        }
    }

    /// Commit the pan delta. Returns `false` when not panning.
    pub fn end_pan(&mut self) -> bool {
        match self.pan {
            PanState::Panning { delta, .. } => {
                self.committed = self.committed.then_translate(delta.x, delta.y);
                self.pan = PanState::Idle;
                true
            }
            PanState::Idle => false,
        }
    }

    /// One zoom step anchored at the screen point `at`.
    pub fn zoom_at(&mut self, at: Point, zoom_in: bool) {
        let factor = if zoom_in { ZOOM_IN_FACTOR } else { ZOOM_OUT_FACTOR };
        self.committed = self.committed.then_scale_about(at, factor);
        log::trace!("Zoom {:.3} at ({}, {})", self.committed.scale, at.x, at.y);
    }

    /// Replace the committed transform so `content` fits the viewport.
    /// Returns `false` (and changes nothing) for degenerate sizes.
    pub fn fit_to_view(&mut self, content: Size, width: f32, height: f32) -> bool {
        match ViewTransform::fit(content, width, height) {
            Some(transform) => {
                self.committed = transform;
                self.pan = PanState::Idle;
                true
            }
            None => false,
        }
    }

    /// Screen to model through the effective transform.
    pub fn screen_to_model(&self, p: Point) -> Option<Point> {
        self.effective().invert().map(|inv| inv.map(p))
    }

    pub fn model_to_screen(&self, p: Point) -> Point {
        self.effective().map(p)
    }
}
