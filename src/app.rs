//! The editor application: top bar, tool palette, canvas and layers panel
//! around a single [`Project`].

use std::path::PathBuf;

use aie_ui::{Application, CursorKind, Event, Renderer, Theme};

use crate::canvas_view::CanvasView;
use crate::compositor::Compositor;
use crate::config::AppConfig;
use crate::constants::IMPORT_EXTENSIONS;
use crate::import::ImportJob;
use crate::keybindings::EditorAction;
use crate::model::{dispatch, Layer, Project, ProjectObserver};
use crate::tools::ToolBox;
use crate::ui::{draw_progress_overlay, LayersPanel, Regions, Response, ToolPalette, TopBar};

pub struct EditorApp {
    config: AppConfig,
    /// Where the config is saved; `None` keeps it in memory only.
    config_path: Option<PathBuf>,
    theme: Theme,

    project: Project,
    compositor: Compositor,
    tools: ToolBox,

    regions: Regions,
    top_bar: TopBar,
    top_bar_dirty: bool,
    palette: ToolPalette,
    canvas: CanvasView,
    layers: LayersPanel,

    import: Option<ImportJob>,
    /// Fit the canvas once the view has a size.
    fit_pending: bool,
}

impl EditorApp {
    pub fn new(config: AppConfig) -> Self {
        let theme = Theme::dark();
        let prefs = &config.preferences;
        let project = Project::new(prefs.canvas_width, prefs.canvas_height);
        let mut compositor = Compositor::new(&theme);
        if let Err(e) = compositor.rebuild(&project) {
            log::error!("{}", e);
        }

        Self {
            config_path: None,
            theme,
            project,
            compositor,
            tools: ToolBox::new(),
            regions: Regions::default(),
            top_bar: TopBar::new(),
            top_bar_dirty: true,
            palette: ToolPalette::new(),
            canvas: CanvasView::new(),
            layers: LayersPanel::new(),
            import: None,
            fit_pending: true,
            config,
        }
    }

    /// Persist config changes (last import folder) to `path`.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn is_importing(&self) -> bool {
        self.import.is_some()
    }

    /// Add ready-made layers, e.g. generated demo content.
    pub fn add_layers(&mut self, layers: Vec<Layer>) {
        self.project.add_layers(layers);
        self.flush_project_events();
    }

    /// Queue `paths` for import. Ignored while another import runs.
    pub fn import_paths(&mut self, paths: Vec<PathBuf>) -> bool {
        if paths.is_empty() {
            return false;
        }
        if self.import.is_some() {
            log::warn!("Import already running, ignoring {} file(s)", paths.len());
            return false;
        }
        self.import = Some(ImportJob::new(paths));
        true
    }

    // ========================================================================
    // Model plumbing
    // ========================================================================

    /// Deliver queued project events to the compositor and the list.
    /// Returns whether anything was delivered.
    fn flush_project_events(&mut self) -> bool {
        let observers: &mut [&mut dyn ProjectObserver] =
            &mut [&mut self.compositor, &mut self.layers];
        dispatch(&mut self.project, observers) > 0
    }

    fn layout(&mut self, width: u32, height: u32) {
        self.regions = Regions::compute(
            width as f32,
            height as f32,
            self.config.preferences.layers_panel_width,
        );
        self.palette.layout(self.regions.tool_palette);
        self.canvas.bounds = self.regions.canvas;
        self.layers.layout(self.regions.layers_panel, &self.project);
        self.top_bar_dirty = true;

        if self.fit_pending && self.canvas.fit_to_view(&self.project, false) {
            self.fit_pending = false;
        }
    }

    fn perform(&mut self, action: EditorAction) -> bool {
        log::debug!("Action: {:?}", action);
        match action {
            EditorAction::SelectTool(kind) => self.tools.select(kind),
            EditorAction::Import => {
                if self.import.is_some() {
                    return false;
                }
                let paths = pick_import_files(self.import_start_folder());
                if let Some(folder) = paths.first().and_then(|p| p.parent()) {
                    self.config.preferences.import_folder = folder.display().to_string();
                }
                self.import_paths(paths)
            }
            EditorAction::FitView => self.canvas.fit_to_view(&self.project, false),
            EditorAction::DeleteSelected => {
                self.project.delete_selected();
                true
            }
            EditorAction::RaiseSelected => {
                self.project.raise_selected_layers();
                true
            }
            EditorAction::LowerSelected => {
                self.project.lower_selected_layers();
                true
            }
            EditorAction::CancelImport => match self.import.as_mut() {
                Some(job) => {
                    job.cancel();
                    true
                }
                None => false,
            },
        }
    }

    fn import_start_folder(&self) -> Option<PathBuf> {
        self.config
            .preferences
            .import_folder()
            .filter(|folder| folder.is_dir())
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
    }

    fn finish_import(&mut self, job: ImportJob) {
        let report = job.finish(&mut self.project);
        self.flush_project_events();
        if let Some((title, text)) = report.warning() {
            show_warning(&title, &text);
        }
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                log::warn!("Failed to save configuration: {}", e);
            }
        }
    }

    fn zoom_status(&self) -> String {
        format!(
            "{} x {}  |  {:.0}%",
            self.project.canvas_size().width,
            self.project.canvas_size().height,
            self.canvas.viewport().effective().scale * 100.0
        )
    }
}

impl Application for EditorApp {
    fn title(&self) -> String {
        "Awesome Image Editor".to_string()
    }

    fn update(&mut self, event: &Event) -> bool {
        let mut redraw = false;

        match event {
            Event::Resized { width, height } => {
                self.layout(*width, *height);
                return true;
            }
            Event::KeyPressed { key, modifiers, .. } => {
                if let Some(action) = self.config.keybindings.action_for(*key, *modifiers) {
                    redraw |= self.perform(action);
                    redraw |= self.flush_project_events();
                    return redraw;
                }
            }
            _ => {}
        }

        let mut response = Response::default();
        response.merge(self.top_bar.on_event(event));
        response.merge(self.palette.on_event(event));
        response.merge(self.layers.on_event(event, &mut self.project));
        redraw |= response.redraw;
        redraw |= self.canvas.on_event(event, &mut self.project, &mut self.tools);
        if let Some(action) = response.action {
            redraw |= self.perform(action);
        }
        redraw |= self.flush_project_events();
        redraw
    }

    fn draw(&mut self, renderer: &mut Renderer) {
        if self.top_bar_dirty {
            self.top_bar.layout(self.regions.top_bar, renderer);
            self.top_bar_dirty = false;
        }

        renderer.clear(self.theme.window);
        let status = self.zoom_status();
        self.top_bar.draw(renderer, &self.theme, &status);
        self.palette.draw(renderer, &self.theme, self.tools.current());
        self.canvas.draw(renderer, &self.theme, &self.compositor);
        self.layers.draw(renderer, &self.theme, &self.project);

        if let Some(job) = &self.import {
            draw_progress_overlay(
                renderer,
                &self.theme,
                self.regions.canvas,
                job.current_name().as_deref(),
                job.progress(),
            );
        }
    }

    fn tick(&mut self) -> bool {
        let Some(job) = self.import.as_mut() else {
            return false;
        };
        job.step();
        if job.is_finished() {
            if let Some(job) = self.import.take() {
                self.finish_import(job);
            }
        }
        true
    }

    fn is_busy(&self) -> bool {
        self.import.is_some()
    }

    fn cursor(&self) -> CursorKind {
        if self.import.is_some() && !self.canvas.viewport().is_panning() {
            return CursorKind::Wait;
        }
        self.canvas.cursor()
    }
}

// ============================================================================
// Native dialogs
// ============================================================================

fn pick_import_files(start: Option<PathBuf>) -> Vec<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Import Image/s")
        .add_filter("Image Files", IMPORT_EXTENSIONS);
    if let Some(folder) = start {
        dialog = dialog.set_directory(folder);
    }
    dialog.pick_files().unwrap_or_default()
}

fn show_warning(title: &str, text: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(text)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_image;
    use aie_ui::{Key, Modifiers, MouseButton, Point};

    fn app() -> EditorApp {
        let mut app = EditorApp::new(AppConfig::new());
        app.update(&Event::Resized {
            width: 1400,
            height: 860,
        });
        app
    }

    fn key(app: &mut EditorApp, key: Key) -> bool {
        app.update(&Event::KeyPressed {
            key,
            modifiers: Modifiers::NONE,
            repeat: false,
        })
    }

    fn two_layers(app: &mut EditorApp) {
        app.add_layers(vec![
            Layer::from_pixmap("a", test_image::solid(8, 8, [255, 0, 0, 255])),
            Layer::from_pixmap("b", test_image::solid(8, 8, [0, 0, 255, 255])),
        ]);
    }

    #[test]
    fn test_first_resize_fits_canvas() {
        let app = app();
        let scale = app.canvas.viewport().committed().scale;
        let expected = (app.regions.canvas.width / 1920.0).min(app.regions.canvas.height / 1080.0);
        assert!((scale - expected).abs() < 1e-4);
        assert!(!app.fit_pending);
    }

    #[test]
    fn test_keyboard_actions_mutate_project() {
        let mut app = app();
        two_layers(&mut app);
        let bottom = app.project.layers()[0].id();
        app.project.select_only(bottom);
        app.flush_project_events();

        assert!(key(&mut app, Key::PageUp));
        assert_eq!(app.project.layers()[1].id(), bottom);
        assert!(key(&mut app, Key::PageDown));
        assert_eq!(app.project.layers()[0].id(), bottom);

        let rebuilds = app.compositor.rebuild_count();
        assert!(key(&mut app, Key::Delete));
        assert_eq!(app.project.len(), 1);
        assert_eq!(app.compositor.rebuild_count(), rebuilds + 1);
    }

    #[test]
    fn test_tool_hotkeys() {
        let mut app = app();
        assert!(key(&mut app, Key::Char('c')));
        assert_eq!(app.tools.current(), crate::tools::ToolKind::Crop);
        assert!(key(&mut app, Key::Char('m')));
        assert_eq!(app.tools.current(), crate::tools::ToolKind::Move);
    }

    #[test]
    fn test_selection_click_does_not_rebuild() {
        let mut app = app();
        two_layers(&mut app);
        let rebuilds = app.compositor.rebuild_count();
        let list = app.layers.list.bounds;
        app.update(&Event::MousePressed {
            button: MouseButton::Left,
            position: Point::new(list.right() - 5.0, list.y + 5.0),
            modifiers: Modifiers::NONE,
        });
        assert_eq!(app.project.selected_count(), 1);
        assert_eq!(app.compositor.rebuild_count(), rebuilds);
    }

    #[test]
    fn test_import_runs_one_file_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..2)
            .map(|i| {
                let path = dir.path().join(format!("img{i}.png"));
                image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255]))
                    .save(&path)
                    .unwrap();
                path
            })
            .collect();

        let mut app = app();
        assert!(app.import_paths(paths));
        assert!(app.is_busy());
        assert_eq!(app.cursor(), CursorKind::Wait);

        assert!(app.tick());
        assert!(app.is_busy());
        assert!(app.project.is_empty());
        assert!(app.tick());
        assert!(!app.is_busy());
        assert_eq!(app.project.len(), 2);
        assert!(!app.tick());
    }

    #[test]
    fn test_escape_cancels_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.png");
        image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let mut app = app();
        app.import_paths(vec![path.clone(), path]);
        assert!(app.tick());
        assert!(key(&mut app, Key::Escape));
        assert!(app.tick());
        assert!(!app.is_importing());
        assert_eq!(app.project.len(), 1);
    }
}
