use std::sync::Arc;

use aie_gpu::{FrameTexture, GpuConfig, GpuContext, PresentPipeline};
use winit::window::{CursorIcon, Window};

use crate::error::Result;
use crate::event::{Event, Key, Modifiers, MouseButton};
use crate::layout::Point;
use crate::renderer::Renderer;

/// Lifecycle of an application driven by [`run`].
///
/// Everything happens on the event loop thread: input arrives through
/// [`Application::update`], frames are produced by [`Application::draw`],
/// and long-running work is split into [`Application::tick`] steps that run
/// between input batches while [`Application::is_busy`] holds.
pub trait Application {
    fn title(&self) -> String;

    /// Handle one input event. Returns `true` if the window must be redrawn.
    fn update(&mut self, event: &Event) -> bool;

    /// Draw the whole window.
    fn draw(&mut self, renderer: &mut Renderer);

    /// One step of background work. Returns `true` if a redraw is needed.
    fn tick(&mut self) -> bool {
        false
    }

    /// While `true` the loop polls and calls [`Application::tick`] instead
    /// of sleeping until the next event.
    fn is_busy(&self) -> bool {
        false
    }

    fn cursor(&self) -> CursorKind {
        CursorKind::Default
    }
}

/// Mouse cursor shapes the application can request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorKind {
    #[default]
    Default,
    Pointer,
    /// Open hand, ready to pan.
    Grab,
    /// Closed hand, panning.
    Grabbing,
    Move,
    Wait,
}

impl CursorKind {
    fn to_winit(self) -> CursorIcon {
        match self {
            CursorKind::Default => CursorIcon::Default,
            CursorKind::Pointer => CursorIcon::Pointer,
            CursorKind::Grab => CursorIcon::Grab,
            CursorKind::Grabbing => CursorIcon::Grabbing,
            CursorKind::Move => CursorIcon::Move,
            CursorKind::Wait => CursorIcon::Progress,
        }
    }
}

/// Settings for running an application.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Overrides [`Application::title`] when set.
    pub window_title: Option<String>,
    pub window_size: (u32, u32),
    pub min_window_size: Option<(u32, u32)>,
    pub resizable: bool,
    /// Default log level; `RUST_LOG` takes precedence.
    pub log_level: log::LevelFilter,
    pub gpu: GpuConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: None,
            window_size: (1280, 800),
            min_window_size: None,
            resizable: true,
            log_level: log::LevelFilter::Info,
            gpu: GpuConfig::default(),
        }
    }
}

/// Initialize `env_logger` at `level` unless `RUST_LOG` says otherwise.
pub fn init_logging(level: log::LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Frame resources: CPU renderer, GPU texture and present pipeline.
struct FrameState {
    renderer: Renderer,
    texture: FrameTexture,
    pipeline: PresentPipeline,
}

impl FrameState {
    fn new(gpu: &GpuContext) -> Result<Self> {
        Ok(Self {
            renderer: Renderer::new(gpu.width(), gpu.height())?,
            texture: FrameTexture::new(gpu, gpu.width(), gpu.height()),
            pipeline: PresentPipeline::new(gpu),
        })
    }

    fn redraw<A: Application>(&mut self, gpu: &mut GpuContext, app: &mut A) -> Result<()> {
        let (width, height) = (gpu.width(), gpu.height());
        self.renderer.resize(width, height)?;
        app.draw(&mut self.renderer);

        if !self.texture.matches(width, height) {
            self.texture = FrameTexture::new(gpu, width, height);
        }
        self.texture.upload(gpu, self.renderer.data())?;
        self.pipeline.present(gpu, &self.texture)?;
        Ok(())
    }
}

/// Run `app` until its window is closed.
///
/// Creates the window and GPU context, translates winit events into
/// [`Event`]s and presents one CPU-rendered frame per redraw request.
pub fn run<A: Application + 'static>(mut app: A, settings: Settings) -> Result<()> {
    use winit::dpi::PhysicalSize;
    use winit::event::{ElementState, Event as WinitEvent, MouseScrollDelta, WindowEvent};
    use winit::event_loop::{ControlFlow, EventLoop};
    use winit::window::WindowBuilder;

    init_logging(settings.log_level);

    let event_loop = EventLoop::new()?;

    let title = settings.window_title.clone().unwrap_or_else(|| app.title());
    let mut builder = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(
            settings.window_size.0,
            settings.window_size.1,
        ))
        .with_resizable(settings.resizable);
    if let Some((w, h)) = settings.min_window_size {
        builder = builder.with_min_inner_size(PhysicalSize::new(w, h));
    }
    let window: Arc<Window> = Arc::new(builder.build(&event_loop)?);

    let mut gpu = pollster::block_on(GpuContext::with_config(
        Arc::clone(&window),
        settings.gpu.clone(),
    ))?;
    let mut frame = FrameState::new(&gpu)?;
    log::info!("Window ready at {}x{}", gpu.width(), gpu.height());

    app.update(&Event::Resized {
        width: gpu.width(),
        height: gpu.height(),
    });

    let mut cursor_position = Point::zero();
    let mut modifiers = Modifiers::default();
    let mut current_cursor = CursorKind::Default;

    event_loop.run(move |event, elwt| {
        let mut needs_redraw = false;

        match event {
            WinitEvent::WindowEvent { event, window_id } if window_id == window.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        log::info!("Close requested");
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => {
                        gpu.resize(size.width, size.height);
                        app.update(&Event::Resized {
                            width: gpu.width(),
                            height: gpu.height(),
                        });
                        needs_redraw = true;
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = frame.redraw(&mut gpu, &mut app) {
                            log::error!("Failed to render frame: {}", e);
                        }
                    }
                    WindowEvent::ModifiersChanged(new_modifiers) => {
                        modifiers = Modifiers::from_winit(new_modifiers.state());
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor_position = Point::new(position.x as f32, position.y as f32);
                        needs_redraw |= app.update(&Event::MouseMoved {
                            position: cursor_position,
                            modifiers,
                        });
                    }
                    WindowEvent::CursorLeft { .. } => {
                        needs_redraw |= app.update(&Event::CursorLeft);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        if let Some(button) = MouseButton::from_winit(button) {
                            let ui_event = match state {
                                ElementState::Pressed => Event::MousePressed {
                                    button,
                                    position: cursor_position,
                                    modifiers,
                                },
                                ElementState::Released => Event::MouseReleased {
                                    button,
                                    position: cursor_position,
                                    modifiers,
                                },
                            };
                            needs_redraw |= app.update(&ui_event);
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let delta = match delta {
                            MouseScrollDelta::LineDelta(x, y) => {
                                // Some platforms report Alt+wheel as horizontal.
                                if y == 0.0 { x * 20.0 } else { y * 20.0 }
                            }
                            MouseScrollDelta::PixelDelta(pos) => {
                                if pos.y == 0.0 { pos.x as f32 } else { pos.y as f32 }
                            }
                        };
                        needs_redraw |= app.update(&Event::MouseWheel {
                            delta,
                            position: cursor_position,
                            modifiers,
                        });
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let Some(key) = Key::from_winit(&event.logical_key) {
                            let ui_event = match event.state {
                                ElementState::Pressed => Event::KeyPressed {
                                    key,
                                    modifiers,
                                    repeat: event.repeat,
                                },
                                ElementState::Released => Event::KeyReleased { key, modifiers },
                            };
                            needs_redraw |= app.update(&ui_event);
                        }
                    }
                    _ => {}
                }
            }
            WinitEvent::AboutToWait => {
                if app.is_busy() {
                    needs_redraw |= app.tick();
                }
                // The tick may have finished the work.
                if app.is_busy() {
                    elwt.set_control_flow(ControlFlow::Poll);
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        }

        let cursor = app.cursor();
        if cursor != current_cursor {
            window.set_cursor_icon(cursor.to_winit());
            current_cursor = cursor;
        }

        if needs_redraw {
            window.request_redraw();
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.window_title.is_none());
        assert!(settings.resizable);
        assert_eq!(settings.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(CursorKind::Grab.to_winit(), CursorIcon::Grab);
        assert_eq!(CursorKind::Grabbing.to_winit(), CursorIcon::Grabbing);
        assert_eq!(CursorKind::default().to_winit(), CursorIcon::Default);
    }
}
