use aie_ui::{Bounds, Point, Renderer, Theme};

use crate::import::ImportProgress;

const BAR_WIDTH: f32 = 280.0;
const BAR_HEIGHT: f32 = 6.0;
const FONT_SIZE: f32 = 13.0;

/// Dim `area` and show which file is loading with a progress bar.
pub fn draw_progress_overlay(
    renderer: &mut Renderer,
    theme: &Theme,
    area: Bounds,
    current: Option<&str>,
    progress: ImportProgress,
) {
    renderer.push_clip(area);
    renderer.fill_rect(area, theme.overlay);

    let center = area.center();
    let label = match current {
        Some(name) => format!("Loading image: {name}"),
        None => "Loading images".to_string(),
    };
    let (w, h) = renderer.measure_text(&label, FONT_SIZE);
    renderer.draw_text(
        &label,
        Point::new(center.x - w / 2.0, center.y - h - BAR_HEIGHT),
        FONT_SIZE,
        theme.window_text,
    );

    let track = Bounds::new(center.x - BAR_WIDTH / 2.0, center.y, BAR_WIDTH, BAR_HEIGHT);
    renderer.fill_rounded_rect(track, BAR_HEIGHT / 2.0, theme.window);
    let filled = Bounds::new(
        track.x,
        track.y,
        track.width * progress.fraction().clamp(0.0, 1.0),
        track.height,
    );
    if !filled.is_empty() {
        renderer.fill_rounded_rect(filled, BAR_HEIGHT / 2.0, theme.highlighted_text);
    }

    let counter = format!("{} / {}  (Esc to cancel)", progress.done, progress.total);
    let (cw, _) = renderer.measure_text(&counter, FONT_SIZE - 2.0);
    renderer.draw_text(
        &counter,
        Point::new(center.x - cw / 2.0, track.bottom() + BAR_HEIGHT),
        FONT_SIZE - 2.0,
        theme.window_text,
    );
    renderer.pop_clip();
}
