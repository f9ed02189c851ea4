//! aie_ui - windowing, input and software drawing for the editor.
//!
//! The application draws each frame into a [`Renderer`] (a tiny-skia
//! pixmap) and [`run`] presents it through `aie_gpu`.

mod application;
mod button;
mod error;
mod event;
mod layout;
mod renderer;
mod text;

pub mod icon;
pub mod theme;

pub use application::{init_logging, run, Application, CursorKind, Settings};
pub use button::{preferred_width, ButtonContent, ButtonResponse, ButtonState, BUTTON_RADIUS};
pub use error::{Result, UiError};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use icon::{icons, IconCache};
pub use layout::{Bounds, Point};
pub use renderer::{Color, Renderer};
pub use text::TextRenderer;
pub use theme::Theme;

pub use tiny_skia;
