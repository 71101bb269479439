//! Application lifecycle management.
//!
//! Owns the window and renderer and drives the demo scene from the winit
//! event loop.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use nxe_render::{Renderer, ResolutionMode};
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::EngineConfig;
use crate::demo::DemoScene;
use crate::timing::FpsCounter;
use crate::window_backend::WindowBackend;

/// Size of the window before the renderer picks a resolution.
const INITIAL_WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(640, 480);

/// Application state.
struct NxeApp {
    /// Engine configuration
    config: EngineConfig,
    /// Renderer (initialized after window creation)
    renderer: Option<Renderer<WindowBackend>>,
    /// Scene drawn every frame
    scene: DemoScene,
    /// FPS counter for the title bar
    fps_counter: FpsCounter,
}

impl NxeApp {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            renderer: None,
            scene: DemoScene::new(),
            fps_counter: FpsCounter::new(),
        }
    }

    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<Renderer<WindowBackend>> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(INITIAL_WINDOW_SIZE)
            .with_resizable(false)
            .with_visible(false);
        let window = Arc::new(event_loop.create_window(window_attrs)?);
        info!("Window created");

        let backend = WindowBackend::new(window, self.config.vsync);
        let mut renderer = Renderer::new(backend).with_title(self.config.window_title.clone());

        let requested = self.config.resolution_index();
        if let Err(e) = renderer.init(requested) {
            warn!("Resolution {} unavailable ({e}), trying 320x240", self.config.resolution);
            renderer.init_video()?;
            renderer.set_resolution(1, false)?;
            self.config.set_resolution_index(1);
        }
        if self.config.fullscreen {
            renderer.set_fullscreen(true)?;
        }

        renderer.show_loading_screen(self.scene.loading_image())?;
        Ok(renderer)
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::F11 => {
                let enable = !renderer.backend().is_fullscreen();
                match renderer.set_fullscreen(enable) {
                    Ok(()) => self.config.fullscreen = enable,
                    Err(e) => warn!("Fullscreen toggle failed: {e}"),
                }
            },
            KeyCode::PageUp | KeyCode::PageDown => {
                let forward = code == KeyCode::PageUp;
                let Some(next) =
                    next_enabled(renderer.resolutions(), renderer.current_resolution(), forward)
                else {
                    return;
                };
                match renderer.set_resolution(next, true) {
                    Ok(_) => {
                        self.config.set_resolution_index(next);
                        info!("Resolution now {}", self.config.resolution);
                    },
                    Err(e) => warn!("Resolution change failed: {e}"),
                }
            },
            KeyCode::Tab => self.scene.tinted = !self.scene.tinted,
            KeyCode::F12 => {
                let stamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                let path = self.config.screenshot_dir.join(format!("nxe-{stamp}.png"));
                if let Err(e) = renderer.screenshot().save_png(&path) {
                    warn!("Screenshot failed: {e}");
                }
            },
            _ => {},
        }
    }

    fn redraw(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if !renderer.is_window_visible() {
            return;
        }

        self.scene.draw(renderer);
        if let Err(e) = renderer.flip() {
            warn!("Present failed: {e}");
        }

        if let Some(fps) = self.fps_counter.tick() {
            debug!("{fps:.1} FPS");
            if self.config.show_fps {
                let title = format!("{} - {fps:.0} FPS", self.config.window_title);
                renderer.backend().window().set_title(&title);
            }
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        info!("Last measured {:.1} FPS", self.fps_counter.fps());
        if let Some(renderer) = &mut self.renderer {
            renderer.close();
        }
        if let Err(e) = self.config.save() {
            warn!("Failed to save config: {e}");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for NxeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        info!("Application resumed, creating window...");

        match self.create_renderer(event_loop) {
            Ok(renderer) => {
                info!(
                    "NXE ready - {}x{} base, scale {}",
                    renderer.screen_width(),
                    renderer.screen_height(),
                    renderer.scale()
                );
                renderer.backend().window().request_redraw();
                self.renderer = Some(renderer);
            },
            Err(e) => {
                error!("Failed to start renderer: {e:#}");
                event_loop.exit();
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                self.shutdown(event_loop);
            },
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.backend_mut().surface_resized(new_size);
                }
            },
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(renderer) = &self.renderer {
                    renderer.backend().window().request_redraw();
                }
            },
            _ => {},
        }
    }
}

/// Finds the next selectable mode after `current`, wrapping around.
fn next_enabled(modes: &[ResolutionMode], current: Option<usize>, forward: bool) -> Option<usize> {
    let count = modes.len();
    if count == 0 {
        return None;
    }
    let start = current.unwrap_or(0);
    (1..=count)
        .map(|step| {
            if forward {
                (start + step) % count
            } else {
                (start + count * step - step) % count
            }
        })
        .find(|&index| modes[index].enabled && Some(index) != current)
}

/// Runs the main application loop.
pub fn run(config: EngineConfig) -> Result<()> {
    info!("Configuration loaded:");
    info!("  Resolution: {}", config.resolution);
    info!("  Fullscreen: {}", config.fullscreen);
    info!("  VSync: {}", config.vsync);

    info!("Creating event loop...");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = NxeApp::new(config);

    info!("Starting event loop...");
    event_loop.run_app(&mut app)?;

    Ok(())
}
