//! Software renderer over a tiny-skia pixmap.
//!
//! Every frame is drawn on the CPU and handed to the GPU presenter as one
//! RGBA buffer. Clipping is a stack of rectangles intersected into a mask.

use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Rect,
    Stroke, Transform,
};

use crate::error::{Result, UiError};
use crate::icon::IconCache;
use crate::layout::{Bounds, Point};
use crate::text::TextRenderer;

/// RGBA color with components in `0.0..=1.0` (straight alpha).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b), c(self.a)]
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        let [r, g, b, a] = self.to_rgba8();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }
}

/// Draws into an owned frame pixmap.
pub struct Renderer {
    pixmap: Pixmap,
    clip_stack: Vec<Bounds>,
    clip_mask: Option<Mask>,
    icons: IconCache,
    text: Option<TextRenderer>,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            clip_stack: Vec::new(),
            clip_mask: None,
            icons: IconCache::new(),
            text: None,
        })
    }

    /// Reallocate the frame if the size changed. Clips are reset.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (width, height) = (width.max(1), height.max(1));
        if self.pixmap.width() != width || self.pixmap.height() != height {
            self.pixmap = allocate(width, height)?;
        }
        self.clip_stack.clear();
        self.clip_mask = None;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA8 bytes of the frame.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    // ------------------------------------------------------------------
    // Clipping
    // ------------------------------------------------------------------

    /// Restrict drawing to `bounds` (intersected with the current clip).
    pub fn push_clip(&mut self, bounds: Bounds) {
        let clipped = match self.clip_stack.last() {
            Some(current) => current.intersection(&bounds).unwrap_or_default(),
            None => bounds,
        };
        self.clip_stack.push(clipped);
        self.rebuild_clip_mask();
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.rebuild_clip_mask();
    }

    fn rebuild_clip_mask(&mut self) {
        let Some(bounds) = self.clip_stack.last() else {
            self.clip_mask = None;
            return;
        };
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            log::warn!("Failed to allocate clip mask");
            self.clip_mask = None;
            return;
        };
        // An empty clip leaves the mask all zero.
        if let Some(rect) = bounds.to_rect() {
            let path = PathBuilder::from_rect(rect);
            mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        }
        self.clip_mask = Some(mask);
    }

    // ------------------------------------------------------------------
    // Shapes
    // ------------------------------------------------------------------

    pub fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        let Some(rect) = bounds.to_rect() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), self.clip_mask.as_ref());
    }

    pub fn fill_rounded_rect(&mut self, bounds: Bounds, radius: f32, color: Color) {
        let Some(path) = rounded_rect_path(bounds, radius) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            self.clip_mask.as_ref(),
        );
    }

    /// Outline drawn inside `bounds`.
    pub fn stroke_rect(&mut self, bounds: Bounds, width: f32, color: Color) {
        let inner = bounds.shrink(width / 2.0);
        let Some(rect) = inner.to_rect() else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            Transform::identity(),
            self.clip_mask.as_ref(),
        );
    }

    /// Fill `rect` (in user space) with an arbitrary paint.
    pub fn fill_rect_with(&mut self, rect: Rect, paint: &Paint<'_>, transform: Transform) {
        self.pixmap
            .fill_rect(rect, paint, transform, self.clip_mask.as_ref());
    }

    /// Draw a pixmap with its top-left corner at the user-space origin.
    pub fn draw_pixmap(
        &mut self,
        pixmap: PixmapRef<'_>,
        transform: Transform,
        quality: FilterQuality,
    ) {
        let paint = PixmapPaint {
            quality,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, pixmap, &paint, transform, self.clip_mask.as_ref());
    }

    // ------------------------------------------------------------------
    // Icons and text
    // ------------------------------------------------------------------

    /// Draw an SVG icon of `size` pixels at `position`, tinted with `tint`.
    pub fn draw_icon(
        &mut self,
        name: &'static str,
        svg_data: &[u8],
        position: Point,
        size: u32,
        tint: Color,
    ) {
        let Some(icon) = self
            .icons
            .get_or_rasterize(name, svg_data, size, tint.to_rgba8())
        else {
            return;
        };
        self.pixmap.draw_pixmap(
            position.x.round() as i32,
            position.y.round() as i32,
            icon.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            self.clip_mask.as_ref(),
        );
    }

    /// Draw a single line of text with its top-left at `origin`.
    pub fn draw_text(&mut self, text: &str, origin: Point, size: f32, color: Color) -> f32 {
        let renderer = self.text.get_or_insert_with(TextRenderer::new);
        renderer.draw(
            &mut self.pixmap,
            self.clip_mask.as_ref(),
            text,
            origin,
            size,
            color,
        )
    }

    pub fn measure_text(&mut self, text: &str, size: f32) -> (f32, f32) {
        self.text
            .get_or_insert_with(TextRenderer::new)
            .measure(text, size)
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width.max(1), height.max(1)).ok_or(UiError::FrameAllocation { width, height })
}

fn rounded_rect_path(bounds: Bounds, radius: f32) -> Option<tiny_skia::Path> {
    if bounds.is_empty() {
        return None;
    }
    let r = radius.min(bounds.width / 2.0).min(bounds.height / 2.0).max(0.0);
    let (x, y, right, bottom) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.quad_to(right, y, right, y + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.quad_to(x, bottom, x, bottom - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}
