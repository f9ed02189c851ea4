//! Document model: layers, the project that stacks them, and change events.

mod event;
mod layer;
mod project;

pub use event::{dispatch, ProjectEvent, ProjectObserver};
pub use layer::{Layer, LayerContent, LayerId, Size};
pub use project::Project;
