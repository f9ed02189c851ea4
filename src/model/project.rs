//! The document: canvas size plus an ordered layer stack.

use aie_ui::Point;

use super::event::ProjectEvent;
use super::layer::{Layer, LayerId, Size};

/// Owns the layer stack. Index 0 is the bottom layer and paints first.
///
/// Every mutation that other components care about queues a
/// [`ProjectEvent`]; the owner drains the queue with
/// [`Project::drain_events`] and hands the events to its observers.
#[derive(Debug)]
pub struct Project {
    canvas_size: Size,
    layers: Vec<Layer>,
    active: Option<LayerId>,
    events: Vec<ProjectEvent>,
}

impl Project {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_size: Size::new(canvas_width, canvas_height),
            layers: Vec::new(),
            active: None,
            events: Vec::new(),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter_back_to_front(&self) -> impl DoubleEndedIterator<Item = &Layer> + '_ {
        self.layers.iter()
    }

    pub fn iter_front_to_back(&self) -> impl DoubleEndedIterator<Item = &Layer> + '_ {
        self.layers.iter().rev()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active
    }

    /// The active layer, if it is still in the stack.
    pub fn active_layer(&self) -> Option<&Layer> {
        self.active.and_then(|id| self.layer(id))
    }

    pub fn selected_count(&self) -> usize {
        self.layers.iter().filter(|l| l.is_selected).count()
    }

    pub fn has_selection(&self) -> bool {
        self.layers.iter().any(|l| l.is_selected)
    }

    /// Component-wise maximum of all layer sizes.
    pub fn layers_bounds_size(&self) -> Size {
        self.layers
            .iter()
            .fold(Size::default(), |acc, layer| acc.expanded_to(layer.size()))
    }

    /// Take all queued events in emission order.
    pub fn drain_events(&mut self) -> Vec<ProjectEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ProjectEvent) {
        self.events.push(event);
    }

    // ------------------------------------------------------------------
    // Stack mutations
    // ------------------------------------------------------------------

    /// Append `layers` on top, keeping their relative order.
    pub fn add_layers(&mut self, layers: impl IntoIterator<Item = Layer>) {
        let before = self.layers.len();
        self.layers.extend(layers);
        log::debug!("Added {} layer(s)", self.layers.len() - before);
        self.emit(ProjectEvent::LayersAdded);
    }

    /// Remove every selected layer. Emits even when nothing was selected.
    pub fn delete_selected(&mut self) {
        let before = self.layers.len();
        self.layers.retain(|l| !l.is_selected);
        if let Some(id) = self.active {
            if self.layer(id).is_none() {
                self.active = None;
            }
        }
        log::debug!("Deleted {} layer(s)", before - self.layers.len());
        self.emit(ProjectEvent::LayersDeleted);
    }

    /// Move each selected layer one step up, past an unselected neighbour.
    ///
    /// A single pass from the top down, so a selected block moves as one
    /// and a selected layer already at the top stays there.
    pub fn raise_selected_layers(&mut self) {
        let n = self.layers.len();
        for i in (0..n.saturating_sub(1)).rev() {
            if self.layers[i].is_selected && !self.layers[i + 1].is_selected {
                self.layers.swap(i, i + 1);
            }
        }
        self.emit(ProjectEvent::LayersOrderChanged);
    }

    /// Mirror of [`Project::raise_selected_layers`]: one pass bottom up.
    pub fn lower_selected_layers(&mut self) {
        let n = self.layers.len();
        for i in 0..n.saturating_sub(1) {
            if self.layers[i + 1].is_selected && !self.layers[i].is_selected {
                self.layers.swap(i, i + 1);
            }
        }
        self.emit(ProjectEvent::LayersOrderChanged);
    }

    // ------------------------------------------------------------------
    // Per-layer state
    // ------------------------------------------------------------------

    /// Clear every selection flag. Emits nothing; callers that need a
    /// repaint schedule it themselves.
    pub fn deselect_all(&mut self) {
        for layer in &mut self.layers {
            layer.is_selected = false;
        }
    }

    /// Select exactly `id` and make it active.
    pub fn select_only(&mut self, id: LayerId) {
        if self.layer(id).is_none() {
            return;
        }
        for layer in &mut self.layers {
            layer.is_selected = layer.id() == id;
        }
        self.active = Some(id);
        self.emit(ProjectEvent::LayersSelectionChanged);
    }

    /// Flip membership of `id` in the selection; a newly selected layer
    /// becomes active.
    pub fn toggle_selected(&mut self, id: LayerId) {
        let Some(layer) = self.layer_mut(id) else {
            return;
        };
        layer.is_selected = !layer.is_selected;
        if layer.is_selected {
            self.active = Some(id);
        }
        self.emit(ProjectEvent::LayersSelectionChanged);
    }

    pub fn set_hidden(&mut self, id: LayerId, hidden: bool) {
        let Some(layer) = self.layer_mut(id) else {
            return;
        };
        if layer.is_hidden != hidden {
            layer.is_hidden = hidden;
            self.emit(ProjectEvent::LayersVisibilityChanged);
        }
    }

    pub fn toggle_hidden(&mut self, id: LayerId) {
        if let Some(hidden) = self.layer(id).map(|l| l.is_hidden) {
            self.set_hidden(id, !hidden);
        }
    }

    /// Offset every selected layer by `delta` (model space).
    pub fn translate_selected(&mut self, delta: Point) {
        if !self.has_selection() {
            return;
        }
        for layer in self.layers.iter_mut().filter(|l| l.is_selected) {
            layer.position = layer.position + delta;
        }
        self.emit(ProjectEvent::LayersVisibilityChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_image;

    fn layer(name: &str) -> Layer {
        Layer::from_pixmap(name, test_image::solid(4, 4, [255, 255, 255, 255]))
    }

    fn project_with(names: &[&str]) -> Project {
        let mut project = Project::new(1920, 1080);
        project.add_layers(names.iter().map(|n| layer(n)));
        project.drain_events();
        project
    }

    fn names(project: &Project) -> Vec<String> {
        project.iter_back_to_front().map(|l| l.name.clone()).collect()
    }

    fn select(project: &mut Project, names: &[&str]) {
        for layer in project.layers.iter_mut() {
            layer.is_selected = names.contains(&layer.name.as_str());
        }
    }

    fn selected(project: &Project) -> Vec<String> {
        let mut v: Vec<String> = project
            .layers()
            .iter()
            .filter(|l| l.is_selected)
            .map(|l| l.name.clone())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn test_add_layers_appends_on_top() {
        let mut project = project_with(&["a"]);
        project.add_layers(vec![layer("b"), layer("c")]);
        assert_eq!(names(&project), ["a", "b", "c"]);
        assert_eq!(project.drain_events(), vec![ProjectEvent::LayersAdded]);
    }

    #[test]
    fn test_front_to_back_is_reverse() {
        let project = project_with(&["a", "b", "c"]);
        let back: Vec<_> = project.iter_back_to_front().map(|l| l.id()).collect();
        let mut front: Vec<_> = project.iter_front_to_back().map(|l| l.id()).collect();
        front.reverse();
        assert_eq!(back, front);
    }

    #[test]
    fn test_raise_moves_selected_past_unselected() {
        let mut project = project_with(&["a", "b", "c"]);
        select(&mut project, &["a", "c"]);
        project.raise_selected_layers();
        assert_eq!(names(&project), ["b", "a", "c"]);
        assert_eq!(project.drain_events(), vec![ProjectEvent::LayersOrderChanged]);
    }

    #[test]
    fn test_raise_moves_selected_block_once() {
        let mut project = project_with(&["a", "b", "c", "d"]);
        select(&mut project, &["a", "b"]);
        project.raise_selected_layers();
        assert_eq!(names(&project), ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_lower_is_symmetric() {
        let mut project = project_with(&["a", "b", "c"]);
        select(&mut project, &["a", "c"]);
        project.lower_selected_layers();
        assert_eq!(names(&project), ["a", "c", "b"]);

        let mut project = project_with(&["a", "b", "c", "d"]);
        select(&mut project, &["c", "d"]);
        project.lower_selected_layers();
        assert_eq!(names(&project), ["a", "c", "d", "b"]);
    }

    #[test]
    fn test_reorder_keeps_selection_set() {
        let mut project = project_with(&["a", "b", "c", "d", "e"]);
        select(&mut project, &["b", "d"]);
        for _ in 0..3 {
            project.raise_selected_layers();
            assert_eq!(selected(&project), ["b", "d"]);
        }
        for _ in 0..5 {
            project.lower_selected_layers();
            assert_eq!(selected(&project), ["b", "d"]);
        }
        assert_eq!(project.len(), 5);
    }

    #[test]
    fn test_delete_with_nothing_selected_still_emits() {
        let mut project = project_with(&["a", "b"]);
        project.delete_selected();
        assert_eq!(names(&project), ["a", "b"]);
        assert_eq!(project.drain_events(), vec![ProjectEvent::LayersDeleted]);
    }

    #[test]
    fn test_delete_preserves_order_and_clears_active() {
        let mut project = project_with(&["a", "b", "c", "d"]);
        let b = project.layers()[1].id();
        project.select_only(b);
        project.toggle_selected(project.layers()[3].id());
        assert_eq!(project.active_layer_id(), Some(project.layers()[3].id()));
        project.delete_selected();
        assert_eq!(names(&project), ["a", "c"]);
        assert!(project.active_layer().is_none());
        assert!(project.active_layer_id().is_none());
    }

    #[test]
    fn test_empty_stack_operations_are_noops() {
        let mut project = Project::new(100, 100);
        project.raise_selected_layers();
        project.lower_selected_layers();
        project.delete_selected();
        project.deselect_all();
        assert!(project.is_empty());
        assert_eq!(
            project.drain_events(),
            vec![
                ProjectEvent::LayersOrderChanged,
                ProjectEvent::LayersOrderChanged,
                ProjectEvent::LayersDeleted,
            ]
        );
    }

    #[test]
    fn test_deselect_all_emits_nothing() {
        let mut project = project_with(&["a", "b"]);
        select(&mut project, &["a", "b"]);
        project.deselect_all();
        assert!(!project.has_selection());
        assert!(project.drain_events().is_empty());
    }

    #[test]
    fn test_select_only_and_toggle() {
        let mut project = project_with(&["a", "b", "c"]);
        let (a, c) = (project.layers()[0].id(), project.layers()[2].id());
        project.select_only(a);
        project.toggle_selected(c);
        assert_eq!(selected(&project), ["a", "c"]);
        project.toggle_selected(a);
        assert_eq!(selected(&project), ["c"]);
        project.select_only(a);
        assert_eq!(selected(&project), ["a"]);
        assert_eq!(project.active_layer().map(|l| l.name.as_str()), Some("a"));
        assert_eq!(
            project.drain_events(),
            vec![ProjectEvent::LayersSelectionChanged; 4]
        );
    }

    #[test]
    fn test_toggle_hidden_emits_visibility() {
        let mut project = project_with(&["a"]);
        let a = project.layers()[0].id();
        project.toggle_hidden(a);
        assert!(project.layer(a).unwrap().is_hidden);
        project.set_hidden(a, true);
        assert_eq!(
            project.drain_events(),
            vec![ProjectEvent::LayersVisibilityChanged]
        );
    }

    #[test]
    fn test_translate_selected_moves_only_selection() {
        let mut project = project_with(&["a", "b"]);
        select(&mut project, &["b"]);
        project.translate_selected(Point::new(5.0, -2.5));
        assert_eq!(project.layers()[0].position, Point::zero());
        assert_eq!(project.layers()[1].position, Point::new(5.0, -2.5));
        assert_eq!(
            project.drain_events(),
            vec![ProjectEvent::LayersVisibilityChanged]
        );
    }

    #[test]
    fn test_layers_bounds_size() {
        let mut project = Project::new(10, 10);
        assert_eq!(project.layers_bounds_size(), Size::default());
        project.add_layers(vec![
            Layer::from_pixmap("wide", test_image::solid(100, 10, [0, 0, 0, 255])),
            Layer::from_pixmap("tall", test_image::solid(20, 50, [0, 0, 0, 255])),
        ]);
        assert_eq!(project.layers_bounds_size(), Size::new(100, 50));
    }
}
