//! The editor's dark palette.
//!
//! Roles mirror a desktop palette: `window` for panels, `base` for the
//! canvas backdrop, `highlight` for selected rows.

use crate::renderer::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Panel and toolbar background.
    pub window: Color,
    /// Default text on panels.
    pub window_text: Color,
    /// Canvas area background.
    pub base: Color,
    pub text: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_pressed: Color,
    /// Selected row background.
    pub highlight: Color,
    /// Text and icon tint on selected rows.
    pub highlighted_text: Color,
    pub link: Color,
    pub divider: Color,
    /// Checkerboard cells behind the composite.
    pub checker_light: Color,
    pub checker_dark: Color,
    /// Dim layer drawn over the window while importing.
    pub overlay: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            window: Color::rgb8(53, 53, 53),
            window_text: Color::rgb8(175, 175, 175),
            base: Color::rgb8(25, 25, 25),
            text: Color::rgb8(175, 175, 175),
            button: Color::rgb8(53, 53, 53),
            button_hover: Color::rgb8(70, 70, 70),
            button_pressed: Color::rgb8(40, 40, 40),
            highlight: Color::rgb8(56, 20, 35),
            highlighted_text: Color::rgb8(167, 0, 72),
            link: Color::rgb8(42, 130, 218),
            divider: Color::rgb8(35, 35, 35),
            checker_light: Color::rgb8(255, 255, 255),
            checker_dark: Color::rgb8(160, 160, 160),
            overlay: Color::rgba8(0, 0, 0, 160),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_palette_roles() {
        let theme = Theme::dark();
        assert_eq!(theme.window.to_rgba8(), [53, 53, 53, 255]);
        assert_eq!(theme.base.to_rgba8(), [25, 25, 25, 255]);
        assert_eq!(theme.highlighted_text.to_rgba8(), [167, 0, 72, 255]);
    }
}
