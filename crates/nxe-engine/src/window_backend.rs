//! winit + wgpu display backend.
//!
//! Presents renderer frames in a real window through `FramePresenter`.

use std::sync::Arc;

use anyhow::{Context, Result};
use nxe_common::{RenderError, RenderResult};
use nxe_render::{DisplayBackend, FramePresenter, Surface, Viewport};
use tracing::{debug, info, warn};
use winit::{
    dpi::PhysicalSize,
    window::{Fullscreen, Window},
};

/// GPU objects tied to the window surface.
struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    presenter: FramePresenter,
}

impl GpuContext {
    async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("Failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find a suitable GPU adapter")?;

        info!("Using GPU adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("NXE Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await
            .context("Failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let presenter = FramePresenter::new(&device, surface_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            presenter,
        })
    }

    fn reconfigure(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        debug!("Surface configured at {width}x{height}");
    }

    fn present(&mut self, window: &Window, frame: &Surface) -> RenderResult<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one uses the fresh surface
                self.reconfigure(self.config.width, self.config.height);
                return Ok(());
            },
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timeout, dropping frame");
                return Ok(());
            },
            Err(e) => return Err(RenderError::Present(e.to_string())),
        };

        self.presenter.upload(&self.device, &self.queue, frame);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let viewport = Viewport::fit(
            self.config.width,
            self.config.height,
            frame.width(),
            frame.height(),
        );
        self.presenter.render(&mut encoder, &view, viewport);

        self.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();
        Ok(())
    }
}

/// A winit window presenting frames with wgpu.
pub struct WindowBackend {
    window: Arc<Window>,
    vsync: bool,
    gpu: Option<GpuContext>,
}

impl WindowBackend {
    /// Wraps a created (possibly hidden) window. GPU setup happens in `open`.
    pub fn new(window: Arc<Window>, vsync: bool) -> Self {
        Self {
            window,
            vsync,
            gpu: None,
        }
    }

    /// The wrapped window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Whether the window is currently fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    /// Follows a size change reported by the window system.
    pub fn surface_resized(&mut self, size: PhysicalSize<u32>) {
        if let Some(gpu) = &mut self.gpu {
            gpu.reconfigure(size.width, size.height);
        }
    }
}

impl DisplayBackend for WindowBackend {
    fn open(&mut self, title: &str, width: u32, height: u32) -> RenderResult<()> {
        self.window.set_title(title);

        let mut gpu = pollster::block_on(GpuContext::new(self.window.clone(), self.vsync))
            .map_err(|e| RenderError::WindowCreation(format!("{e:#}")))?;

        // A deferred size arrives later as a Resized event.
        match self.window.request_inner_size(PhysicalSize::new(width, height)) {
            Some(applied) => gpu.reconfigure(applied.width, applied.height),
            None => debug!("Window size {width}x{height} requested, waiting for resize"),
        }
        self.gpu = Some(gpu);
        self.window.set_visible(true);

        info!("Window opened at {width}x{height}");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        let Some(gpu) = &mut self.gpu else {
            return Err(RenderError::NotInitialized);
        };

        if let Some(monitor) = self.window.current_monitor() {
            let display = monitor.size();
            if width > display.width || height > display.height {
                return Err(RenderError::Resize {
                    width,
                    height,
                    reason: format!("display is {}x{}", display.width, display.height),
                });
            }
        }

        if self.window.fullscreen().is_some() {
            debug!("Fullscreen: keeping window size, canvas is letterboxed");
            return Ok(());
        }

        if let Some(applied) = self.window.request_inner_size(PhysicalSize::new(width, height)) {
            gpu.reconfigure(applied.width, applied.height);
        }
        Ok(())
    }

    fn set_fullscreen(&mut self, enable: bool) -> RenderResult<()> {
        if self.gpu.is_none() {
            return Err(RenderError::NotInitialized);
        }
        self.window
            .set_fullscreen(enable.then_some(Fullscreen::Borderless(None)));
        self.window.set_cursor_visible(!enable);
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.gpu.is_some()
            && self.window.is_visible().unwrap_or(true)
            && !self.window.is_minimized().unwrap_or(false)
    }

    fn desktop_size(&self) -> Option<(u32, u32)> {
        self.window.current_monitor().map(|monitor| {
            let size = monitor.size();
            (size.width, size.height)
        })
    }

    fn present(&mut self, frame: &Surface) -> RenderResult<()> {
        let Some(gpu) = &mut self.gpu else {
            return Err(RenderError::NotInitialized);
        };
        gpu.present(&self.window, frame)
    }

    fn close(&mut self) {
        if self.gpu.take().is_some() {
            self.window.set_visible(false);
            info!("Window closed");
        }
    }
}
