//! Layers: drawable raster units stacked in a project.

use std::sync::atomic::{AtomicU64, Ordering};

use aie_ui::Point;
use tiny_skia::{FilterQuality, Paint, Pattern, Pixmap, Rect, SpreadMode, Transform};

/// Stable identifier, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        LayerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Integer pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise maximum.
    pub fn expanded_to(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Largest size with this aspect ratio that fits in `bounds`, as floats.
    pub fn scaled_to_fit(self, bounds_width: f32, bounds_height: f32) -> (f32, f32) {
        if self.is_empty() {
            return (0.0, 0.0);
        }
        let scale = (bounds_width / self.width as f32).min(bounds_height / self.height as f32);
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

/// What a layer draws. Only raster images exist today.
#[derive(Debug, Clone)]
pub enum LayerContent {
    /// Premultiplied RGBA pixels.
    Image(Pixmap),
}

#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    pub name: String,
    content: LayerContent,
    /// Offset of the top-left corner in model space.
    pub position: Point,
    pub is_hidden: bool,
    pub is_selected: bool,
}

impl Layer {
    pub fn new(name: impl Into<String>, content: LayerContent) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            content,
            position: Point::zero(),
            is_hidden: false,
            is_selected: false,
        }
    }

    pub fn from_pixmap(name: impl Into<String>, pixmap: Pixmap) -> Self {
        Self::new(name, LayerContent::Image(pixmap))
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn content(&self) -> &LayerContent {
        &self.content
    }

    /// Pixels backing this layer.
    pub fn pixmap(&self) -> &Pixmap {
        match &self.content {
            LayerContent::Image(pixmap) => pixmap,
        }
    }

    /// Intrinsic size, fixed at construction.
    pub fn size(&self) -> Size {
        match &self.content {
            LayerContent::Image(pixmap) => Size::new(pixmap.width(), pixmap.height()),
        }
    }

    /// Paint the layer into `target`. The layer's own position is not
    /// applied; callers fold it into `transform`.
    pub fn draw(&self, target: &mut Pixmap, transform: Transform, quality: FilterQuality) {
        match &self.content {
            LayerContent::Image(pixmap) => {
                let Some(rect) = Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
                else {
                    return;
                };
                let paint = Paint {
                    shader: Pattern::new(
                        pixmap.as_ref(),
                        SpreadMode::Pad,
                        quality,
                        1.0,
                        Transform::identity(),
                    ),
                    anti_alias: true,
                    ..Default::default()
                };
                target.fill_rect(rect, &paint, transform, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_image;

    #[test]
    fn test_ids_are_unique() {
        let a = Layer::from_pixmap("a", test_image::solid(2, 2, [255, 0, 0, 255]));
        let b = Layer::from_pixmap("b", test_image::solid(2, 2, [255, 0, 0, 255]));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_size_comes_from_content() {
        let layer = Layer::from_pixmap("a", test_image::solid(30, 20, [0, 0, 0, 255]));
        assert_eq!(layer.size(), Size::new(30, 20));
        assert!(!layer.is_hidden);
        assert!(!layer.is_selected);
        assert_eq!(layer.position, Point::zero());
    }

    #[test]
    fn test_expanded_to_is_componentwise() {
        let size = Size::new(100, 10).expanded_to(Size::new(20, 50));
        assert_eq!(size, Size::new(100, 50));
    }

    #[test]
    fn test_scaled_to_fit_keeps_aspect() {
        let (w, h) = Size::new(200, 100).scaled_to_fit(64.0, 64.0);
        assert_eq!((w, h), (64.0, 32.0));
        assert_eq!(Size::new(0, 10).scaled_to_fit(64.0, 64.0), (0.0, 0.0));
    }

    #[test]
    fn test_draw_applies_transform() {
        let layer = Layer::from_pixmap("red", test_image::solid(2, 2, [255, 0, 0, 255]));
        let mut target = Pixmap::new(4, 4).unwrap();
        layer.draw(&mut target, Transform::from_translate(2.0, 2.0), FilterQuality::Nearest);

        assert_eq!(target.pixel(0, 0).unwrap().alpha(), 0);
        let p = target.pixel(3, 3).unwrap();
        assert_eq!((p.red(), p.alpha()), (255, 255));
    }
}
