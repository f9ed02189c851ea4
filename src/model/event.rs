//! Change notifications emitted by [`crate::model::Project`].

use super::Project;

/// What changed in the layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectEvent {
    LayersAdded,
    LayersDeleted,
    LayersOrderChanged,
    /// Hidden flag or position changed.
    LayersVisibilityChanged,
    LayersSelectionChanged,
}

impl ProjectEvent {
    /// Whether the composite must be rebuilt. Selection does not affect pixels.
    pub fn affects_composite(self) -> bool {
        !matches!(self, ProjectEvent::LayersSelectionChanged)
    }
}

/// Receives project events after each mutation, in emission order.
pub trait ProjectObserver {
    fn on_project_event(&mut self, event: ProjectEvent, project: &Project);
}

/// Deliver every queued event to every observer, in order.
pub fn dispatch(project: &mut Project, observers: &mut [&mut dyn ProjectObserver]) -> usize {
    let events = project.drain_events();
    for event in &events {
        log::debug!("Project event: {:?}", event);
        for observer in observers.iter_mut() {
            observer.on_project_event(*event, project);
        }
    }
    events.len()
}
