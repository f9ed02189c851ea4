//! Synthetic raster content.
//!
//! Used by tests and by the `--demo` startup option to populate a project
//! without touching the filesystem.

use tiny_skia::{Color, Pixmap};

use crate::model::Layer;

/// Pixmap filled with one straight-alpha RGBA color.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Pixmap {
    let mut pixmap = allocate(width, height);
    pixmap.fill(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
    pixmap
}

/// Horizontal gradient from `from` to `to`, both opaque RGB.
pub fn gradient(width: u32, height: u32, from: [u8; 3], to: [u8; 3]) -> Pixmap {
    let mut pixmap = allocate(width, height);
    let w = pixmap.width();
    let lerp = |a: u8, b: u8, t: f32| (a as f32 + (b as f32 - a as f32) * t).round() as u8;

    for (i, px) in pixmap.data_mut().chunks_exact_mut(4).enumerate() {
        let x = i as u32 % w;
        let t = if w > 1 { x as f32 / (w - 1) as f32 } else { 0.0 };
        px[0] = lerp(from[0], to[0], t);
        px[1] = lerp(from[1], to[1], t);
        px[2] = lerp(from[2], to[2], t);
        px[3] = 255;
    }
    pixmap
}

/// Two-color checkerboard with square cells of `cell` pixels.
pub fn checker(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Pixmap {
    let mut pixmap = allocate(width, height);
    let w = pixmap.width();
    let cell = cell.max(1);
    let (a, b) = (premultiply(a), premultiply(b));

    for (i, px) in pixmap.data_mut().chunks_exact_mut(4).enumerate() {
        let (x, y) = (i as u32 % w, i as u32 / w);
        let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
        px.copy_from_slice(&color);
    }
    pixmap
}

/// Circle of `rgba` on a transparent background, for alpha compositing.
pub fn disc(diameter: u32, rgba: [u8; 4]) -> Pixmap {
    let mut pixmap = allocate(diameter, diameter);
    let w = pixmap.width();
    let r = w as f32 / 2.0;
    let color = premultiply(rgba);

    for (i, px) in pixmap.data_mut().chunks_exact_mut(4).enumerate() {
        let dx = (i as u32 % w) as f32 + 0.5 - r;
        let dy = (i as u32 / w) as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            px.copy_from_slice(&color);
        }
    }
    pixmap
}

/// Three overlapping layers for the demo project.
pub fn demo_layers() -> Vec<Layer> {
    log::info!("Generating demo layers");
    vec![
        Layer::from_pixmap("Gradient", gradient(1280, 720, [30, 60, 160], [220, 120, 40])),
        Layer::from_pixmap(
            "Checker",
            checker(640, 480, 40, [240, 240, 240, 255], [40, 40, 40, 255]),
        )
        .with_position(200.0, 150.0),
        Layer::from_pixmap("Disc", disc(400, [167, 0, 72, 200])).with_position(900.0, 400.0),
    ]
}

/// Largest side a generated image may have.
const MAX_SIDE: u32 = 8192;

fn allocate(width: u32, height: u32) -> Pixmap {
    // Sides within 1..=MAX_SIDE always fit tiny-skia's size limits
    match Pixmap::new(width.clamp(1, MAX_SIDE), height.clamp(1, MAX_SIDE)) {
        Some(pixmap) => pixmap,
        None => unreachable!("{width}x{height} clamped into range"),
    }
}

fn premultiply(rgba: [u8; 4]) -> [u8; 4] {
    let c = tiny_skia::ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]).premultiply();
    [c.red(), c.green(), c.blue(), c.alpha()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_fills_every_pixel() {
        let pixmap = solid(3, 2, [10, 20, 30, 255]);
        assert!(pixmap
            .pixels()
            .iter()
            .all(|p| (p.red(), p.green(), p.blue(), p.alpha()) == (10, 20, 30, 255)));
    }

    #[test]
    fn test_gradient_endpoints() {
        let pixmap = gradient(11, 1, [0, 0, 0], [200, 100, 50]);
        let first = pixmap.pixel(0, 0).unwrap();
        let last = pixmap.pixel(10, 0).unwrap();
        assert_eq!((first.red(), first.green()), (0, 0));
        assert_eq!((last.red(), last.green(), last.blue()), (200, 100, 50));
    }

    #[test]
    fn test_checker_alternates() {
        let pixmap = checker(4, 4, 2, [255, 255, 255, 255], [0, 0, 0, 255]);
        assert_eq!(pixmap.pixel(0, 0).unwrap().red(), 255);
        assert_eq!(pixmap.pixel(2, 0).unwrap().red(), 0);
        assert_eq!(pixmap.pixel(2, 2).unwrap().red(), 255);
    }

    #[test]
    fn test_disc_corners_are_transparent() {
        let pixmap = disc(10, [255, 0, 0, 255]);
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(5, 5).unwrap().alpha(), 255);
    }

    #[test]
    fn test_demo_layers() {
        let layers = demo_layers();
        assert_eq!(layers.len(), 3);
        assert!(layers.iter().all(|l| !l.size().is_empty()));
    }
}
