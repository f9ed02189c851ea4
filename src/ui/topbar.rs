//! Top bar with the import and fit buttons.

use aie_ui::{
    icons, preferred_width, Bounds, ButtonContent, ButtonState, Event, Point, Renderer, Theme,
};

use super::Response;
use crate::keybindings::EditorAction;

const IMPORT_LABEL: &str = "Import Image/s";
const FIT_LABEL: &str = "Fit";
const BUTTON_PADDING: f32 = 8.0;
const SPACING: f32 = 6.0;

fn import_content() -> ButtonContent<'static> {
    ButtonContent::IconLabel {
        name: "folder-open",
        svg: icons::FOLDER_OPEN,
        size: 16,
        label: IMPORT_LABEL,
    }
}

pub struct TopBar {
    bounds: Bounds,
    import: ButtonState,
    fit: ButtonState,
}

impl TopBar {
    pub fn new() -> Self {
        Self {
            bounds: Bounds::default(),
            import: ButtonState::new(),
            fit: ButtonState::new(),
        }
    }

    /// Button widths depend on text metrics, hence the renderer.
    pub fn layout(&mut self, bounds: Bounds, renderer: &mut Renderer) {
        self.bounds = bounds;
        let inner = bounds.shrink(4.0);
        let import_w = preferred_width(renderer, import_content(), BUTTON_PADDING);
        let fit_w = preferred_width(renderer, ButtonContent::Label(FIT_LABEL), BUTTON_PADDING);
        self.import.bounds = Bounds::new(inner.x + SPACING, inner.y, import_w, inner.height);
        self.fit.bounds = Bounds::new(
            self.import.bounds.right() + SPACING,
            inner.y,
            fit_w,
            inner.height,
        );
    }

    pub fn on_event(&mut self, event: &Event) -> Response {
        let import = self.import.on_event(event);
        let fit = self.fit.on_event(event);
        let action = if import.clicked {
            Some(EditorAction::Import)
        } else if fit.clicked {
            Some(EditorAction::FitView)
        } else {
            None
        };
        Response {
            redraw: import.needs_redraw || fit.needs_redraw,
            action,
        }
    }

    /// `status` is drawn right-aligned, e.g. the zoom level.
    pub fn draw(&self, renderer: &mut Renderer, theme: &Theme, status: &str) {
        renderer.fill_rect(self.bounds, theme.window);
        renderer.fill_rect(
            Bounds::new(self.bounds.x, self.bounds.bottom() - 1.0, self.bounds.width, 1.0),
            theme.divider,
        );
        self.import.draw(renderer, theme, import_content(), false);
        self.fit
            .draw(renderer, theme, ButtonContent::Label(FIT_LABEL), false);

        let (w, h) = renderer.measure_text(status, 12.0);
        renderer.draw_text(
            status,
            Point::new(
                self.bounds.right() - w - 2.0 * SPACING,
                self.bounds.y + (self.bounds.height - h) / 2.0,
            ),
            12.0,
            theme.window_text,
        );
    }
}

impl Default for TopBar {
    fn default() -> Self {
        Self::new()
    }
}
