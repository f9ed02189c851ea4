//! SVG icon rasterization and caching.
//!
//! Icons are authored with `currentColor`, which is substituted with the
//! requested tint before parsing, so every tint is its own cache entry.

use std::collections::HashMap;

use tiny_skia::Pixmap;

/// Rasterized icons keyed by (name, size, tint).
#[derive(Default)]
pub struct IconCache {
    cache: HashMap<(&'static str, u32, [u8; 4]), Pixmap>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an icon from the cache, rasterizing it on first use.
    pub fn get_or_rasterize(
        &mut self,
        name: &'static str,
        svg_data: &[u8],
        size: u32,
        tint: [u8; 4],
    ) -> Option<&Pixmap> {
        let key = (name, size, tint);
        if !self.cache.contains_key(&key) {
            let pixmap = rasterize_svg(svg_data, size, tint)?;
            self.cache.insert(key, pixmap);
        }
        self.cache.get(&key)
    }
}

/// Rasterize an SVG into a square `size`x`size` pixmap, aspect preserved.
pub fn rasterize_svg(svg_data: &[u8], size: u32, tint: [u8; 4]) -> Option<Pixmap> {
    let svg_str = std::str::from_utf8(svg_data).ok()?;
    let hex_color = format!("#{:02x}{:02x}{:02x}", tint[0], tint[1], tint[2]);
    let svg_with_color = svg_str.replace("currentColor", &hex_color);

    let tree = match resvg::usvg::Tree::from_str(&svg_with_color, &resvg::usvg::Options::default())
    {
        Ok(tree) => tree,
        Err(e) => {
            log::error!("Failed to parse SVG: {:?}", e);
            return None;
        }
    };

    let svg_size = tree.size();
    let scale = size as f32 / svg_size.width().max(svg_size.height());
    let offset_x = (size as f32 - svg_size.width() * scale) / 2.0;
    let offset_y = (size as f32 - svg_size.height() * scale) / 2.0;

    let mut pixmap = Pixmap::new(size, size)?;
    let transform =
        tiny_skia::Transform::from_translate(offset_x, offset_y).pre_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    if tint[3] < 255 {
        let alpha = tint[3] as f32 / 255.0;
        for px in pixmap.data_mut().iter_mut() {
            *px = (*px as f32 * alpha).round() as u8;
        }
    }

    Some(pixmap)
}

/// Built-in icons.
pub mod icons {
    pub const SHOW: &[u8] = include_bytes!("../assets/icons/show.svg");
    pub const HIDE: &[u8] = include_bytes!("../assets/icons/hide.svg");

    // Canvas tools
    pub const MOVE: &[u8] = include_bytes!("../assets/icons/move.svg");
    pub const CROP: &[u8] = include_bytes!("../assets/icons/crop.svg");

    // Layer actions
    pub const ARROW_UP: &[u8] = include_bytes!("../assets/icons/arrow-up.svg");
    pub const ARROW_DOWN: &[u8] = include_bytes!("../assets/icons/arrow-down.svg");
    pub const TRASH: &[u8] = include_bytes!("../assets/icons/trash.svg");
    pub const FOLDER_OPEN: &[u8] = include_bytes!("../assets/icons/folder-open.svg");
}
