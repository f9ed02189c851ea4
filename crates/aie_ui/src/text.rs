//! Text shaping and rasterization with cosmic-text.

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Mask, Paint, Pixmap, Rect, Transform};

use crate::layout::Point;
use crate::renderer::Color;

/// Line height relative to font size.
const LINE_HEIGHT_RATIO: f32 = 1.3;

/// Owns the font database and glyph cache.
///
/// Loading system fonts is slow, so the renderer creates this lazily on
/// the first text draw.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRenderer {
    pub fn new() -> Self {
        let font_system = FontSystem::new();
        log::debug!("Loaded {} font faces", font_system.db().len());
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, text: &str, size: f32, max_width: Option<f32>) -> Buffer {
        let metrics = Metrics::new(size, size * LINE_HEIGHT_RATIO);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, max_width, None);
        buffer.set_text(&mut self.font_system, text, &Attrs::new(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Width and height of `text` laid out on one line.
    pub fn measure(&mut self, text: &str, size: f32) -> (f32, f32) {
        let buffer = self.shape(text, size, None);
        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max);
        let lines = buffer.layout_runs().count().max(1);
        (width, lines as f32 * size * LINE_HEIGHT_RATIO)
    }

    /// Draw `text` with its top-left corner at `origin`. Returns the drawn width.
    pub fn draw(
        &mut self,
        pixmap: &mut Pixmap,
        clip: Option<&Mask>,
        text: &str,
        origin: Point,
        size: f32,
        color: Color,
    ) -> f32 {
        if text.is_empty() || size <= 0.0 {
            return 0.0;
        }
        let buffer = self.shape(text, size, None);
        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint {
            anti_alias: false,
            ..Default::default()
        };

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            cosmic_text::Color::rgba(r, g, b, a),
            |x, y, w, h, glyph_color| {
                if glyph_color.a() == 0 {
                    return;
                }
                let Some(rect) = Rect::from_xywh(
                    origin.x + x as f32,
                    origin.y + y as f32,
                    w as f32,
                    h as f32,
                ) else {
                    return;
                };
                paint.set_color_rgba8(
                    glyph_color.r(),
                    glyph_color.g(),
                    glyph_color.b(),
                    glyph_color.a(),
                );
                pixmap.fill_rect(rect, &paint, Transform::identity(), clip);
            },
        );

        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max)
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
