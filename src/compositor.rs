//! Cached flattening of the visible layer stack.
//!
//! The composite is rebuilt only when the stack's pixels change (layers
//! added, deleted, reordered, hidden or moved). Panning, zooming and
//! selection changes reuse the cached buffer, so repaint cost is one
//! transformed blit plus the checkerboard.

use std::time::Instant;

use aie_ui::{Renderer, Theme};
use tiny_skia::{FilterQuality, Paint, Pattern, Pixmap, Rect, SpreadMode, Transform};

use crate::constants::{CHECKER_CELL_SIZE, CHECKER_TILE_SIZE};
use crate::error::CanvasError;
use crate::model::{Project, ProjectEvent, ProjectObserver};

pub struct Compositor {
    cache: Option<Pixmap>,
    checker_tile: Option<Pixmap>,
    rebuild_count: u64,
}

impl Compositor {
    pub fn new(theme: &Theme) -> Self {
        Self {
            cache: None,
            checker_tile: checker_tile(theme),
            rebuild_count: 0,
        }
    }

    /// The flattened canvas, `None` for a zero-sized canvas.
    pub fn composite(&self) -> Option<&Pixmap> {
        self.cache.as_ref()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Repaint the cache from scratch: clear, then paint each visible
    /// layer back to front at its position.
    pub fn rebuild(&mut self, project: &Project) -> Result<(), CanvasError> {
        let size = project.canvas_size();
        if size.is_empty() {
            self.cache = None;
            return Ok(());
        }

        let started = Instant::now();
        let reuse = self
            .cache
            .as_ref()
            .is_some_and(|c| c.width() == size.width && c.height() == size.height);
        if !reuse {
            self.cache = Some(Pixmap::new(size.width, size.height).ok_or(
                CanvasError::Allocation {
                    width: size.width,
                    height: size.height,
                },
            )?);
        }
        let Some(cache) = self.cache.as_mut() else {
            return Ok(());
        };
        cache.fill(tiny_skia::Color::TRANSPARENT);

        let mut painted = 0;
        for layer in project.iter_back_to_front().filter(|l| !l.is_hidden) {
            let transform = Transform::from_translate(layer.position.x, layer.position.y);
            layer.draw(cache, transform, layer_quality(layer.position.x, layer.position.y));
            painted += 1;
        }

        self.rebuild_count += 1;
        log::debug!(
            "Rebuilt composite: {} of {} layers in {:.2?}",
            painted,
            project.len(),
            started.elapsed()
        );
        Ok(())
    }

    /// Draw the checkerboard and the cached composite through `transform`
    /// (model to screen).
    ///
    /// The checkerboard keeps a fixed on-screen scale and is anchored to
    /// the canvas' translated top-left corner, so zooming changes how much
    /// of it is visible rather than its cell size.
    pub fn render(&self, renderer: &mut Renderer, transform: Transform) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let Some(canvas_rect) = Rect::from_xywh(0.0, 0.0, cache.width() as f32, cache.height() as f32)
        else {
            return;
        };

        if let (Some(tile), Some(screen_rect)) =
            (self.checker_tile.as_ref(), canvas_rect.transform(transform))
        {
            let offset = Transform::from_translate(transform.tx.trunc(), transform.ty.trunc());
            let paint = Paint {
                shader: Pattern::new(
                    tile.as_ref(),
                    SpreadMode::Repeat,
                    FilterQuality::Nearest,
                    1.0,
                    offset,
                ),
                ..Default::default()
            };
            renderer.fill_rect_with(screen_rect, &paint, Transform::identity());
        }

        let quality = if transform.sx < 1.0 {
            FilterQuality::Bilinear
        } else {
            FilterQuality::Nearest
        };
        renderer.draw_pixmap(cache.as_ref(), transform, quality);
    }
}

impl ProjectObserver for Compositor {
    fn on_project_event(&mut self, event: ProjectEvent, project: &Project) {
        if !event.affects_composite() {
            return;
        }
        if let Err(e) = self.rebuild(project) {
            log::error!("{}", e);
        }
    }
}

/// Integer offsets copy pixels exactly; fractional ones are resampled.
fn layer_quality(x: f32, y: f32) -> FilterQuality {
    if x.fract() == 0.0 && y.fract() == 0.0 {
        FilterQuality::Nearest
    } else {
        FilterQuality::Bilinear
    }
}

fn checker_tile(theme: &Theme) -> Option<Pixmap> {
    let mut tile = Pixmap::new(CHECKER_TILE_SIZE, CHECKER_TILE_SIZE)?;
    let light = theme.checker_light.to_rgba8();
    let dark = theme.checker_dark.to_rgba8();
    let w = tile.width();

    for (i, px) in tile.data_mut().chunks_exact_mut(4).enumerate() {
        let (x, y) = (i as u32 % w, i as u32 / w);
        let even = (x / CHECKER_CELL_SIZE + y / CHECKER_CELL_SIZE) % 2 == 0;
        px.copy_from_slice(if even { &light } else { &dark });
    }
    Some(tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;
    use crate::test_image;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let p = pixmap.pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    fn three_layer_project() -> Project {
        let mut project = Project::new(1920, 1080);
        let mut b = Layer::from_pixmap("B", test_image::solid(100, 100, GREEN)).with_position(50.0, 0.0);
        b.is_hidden = true;
        project.add_layers(vec![
            Layer::from_pixmap("A", test_image::solid(100, 100, RED)),
            b,
            Layer::from_pixmap("C", test_image::solid(100, 100, BLUE)).with_position(50.0, 50.0),
        ]);
        project
    }

    #[test]
    fn test_rebuild_paints_visible_layers_back_to_front() {
        let project = three_layer_project();
        let mut compositor = Compositor::new(&Theme::dark());
        compositor.rebuild(&project).unwrap();
        let composite = compositor.composite().unwrap();

        assert_eq!((composite.width(), composite.height()), (1920, 1080));
        // A alone
        assert_eq!(rgba(composite, 10, 10), RED);
        // Hidden B would have covered this
        assert_eq!(rgba(composite, 120, 10), [0, 0, 0, 0]);
        // C over A
        assert_eq!(rgba(composite, 60, 60), BLUE);
        // C alone
        assert_eq!(rgba(composite, 140, 140), BLUE);
        assert_eq!(rgba(composite, 500, 500), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let mut project = three_layer_project();
        project.add_layers(vec![
            Layer::from_pixmap("disc", test_image::disc(64, [10, 200, 30, 128])).with_position(10.5, 20.25),
        ]);
        let mut compositor = Compositor::new(&Theme::dark());
        compositor.rebuild(&project).unwrap();
        let first = compositor.composite().unwrap().data().to_vec();
        compositor.rebuild(&project).unwrap();
        assert_eq!(compositor.composite().unwrap().data(), first.as_slice());
        assert_eq!(compositor.rebuild_count(), 2);
    }

    #[test]
    fn test_zero_sized_canvas_skips_compositing() {
        let mut project = Project::new(0, 1080);
        project.add_layers(vec![Layer::from_pixmap("A", test_image::solid(4, 4, RED))]);
        let mut compositor = Compositor::new(&Theme::dark());
        compositor.rebuild(&project).unwrap();
        assert!(compositor.composite().is_none());

        let mut renderer = Renderer::new(8, 8).unwrap();
        renderer.clear(aie_ui::Color::BLACK);
        compositor.render(&mut renderer, Transform::identity());
        assert!(renderer.pixmap().pixels().iter().all(|p| p.red() == 0));
    }

    #[test]
    fn test_rebuilds_only_on_structural_events() {
        let project = three_layer_project();
        let mut compositor = Compositor::new(&Theme::dark());
        compositor.on_project_event(ProjectEvent::LayersSelectionChanged, &project);
        assert_eq!(compositor.rebuild_count(), 0);
        for event in [
            ProjectEvent::LayersAdded,
            ProjectEvent::LayersDeleted,
            ProjectEvent::LayersOrderChanged,
            ProjectEvent::LayersVisibilityChanged,
        ] {
            compositor.on_project_event(event, &project);
        }
        assert_eq!(compositor.rebuild_count(), 4);
    }

    #[test]
    fn test_render_draws_checkerboard_under_transparent_pixels() {
        let mut project = Project::new(32, 32);
        project.add_layers(vec![Layer::from_pixmap("A", test_image::solid(8, 8, RED))]);
        let theme = Theme::dark();
        let mut compositor = Compositor::new(&theme);
        compositor.rebuild(&project).unwrap();

        let mut renderer = Renderer::new(64, 64).unwrap();
        renderer.clear(theme.base);
        compositor.render(&mut renderer, Transform::from_translate(10.0, 10.0));
        let frame = renderer.pixmap();

        // Layer pixels
        assert_eq!(rgba(frame, 12, 12), RED);
        // Cells are anchored at the canvas corner (10, 10)
        assert_eq!(rgba(frame, 14, 20), theme.checker_dark.to_rgba8());
        assert_eq!(rgba(frame, 20, 20), theme.checker_light.to_rgba8());
        assert_eq!(rgba(frame, 28, 20), theme.checker_dark.to_rgba8());
        // Outside the canvas stays background
        assert_eq!(rgba(frame, 50, 50), theme.base.to_rgba8());
        assert_eq!(rgba(frame, 5, 5), theme.base.to_rgba8());
    }

    #[test]
    fn test_checkerboard_cell_size_ignores_zoom() {
        let project = Project::new(32, 32);
        let theme = Theme::dark();
        let mut compositor = Compositor::new(&theme);
        compositor.rebuild(&project).unwrap();

        let mut renderer = Renderer::new(64, 64).unwrap();
        compositor.render(&mut renderer, Transform::from_scale(2.0, 2.0));
        let frame = renderer.pixmap();
        assert_eq!(rgba(frame, 4, 4), theme.checker_light.to_rgba8());
        assert_eq!(rgba(frame, 12, 4), theme.checker_dark.to_rgba8());
        assert_eq!(rgba(frame, 20, 4), theme.checker_light.to_rgba8());
    }
}
