//! Display backends.
//!
//! The renderer never talks to a window system directly. It rasterizes
//! into its own canvas and hands finished frames to a `DisplayBackend`,
//! which owns the window, the fullscreen state and presentation.

use nxe_common::{RenderError, RenderResult};
use tracing::{debug, info};

use crate::surface::Surface;

/// A window (or window stand-in) that frames are presented to.
pub trait DisplayBackend {
    /// Creates the window at the given size.
    fn open(&mut self, title: &str, width: u32, height: u32) -> RenderResult<()>;

    /// Changes the window size.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Enters or leaves desktop fullscreen.
    fn set_fullscreen(&mut self, enable: bool) -> RenderResult<()>;

    /// Whether the window is open, shown and not minimized.
    fn is_visible(&self) -> bool;

    /// Size of the display the window lives on, if known.
    fn desktop_size(&self) -> Option<(u32, u32)>;

    /// Shows a finished frame.
    fn present(&mut self, frame: &Surface) -> RenderResult<()>;

    /// Destroys the window. Closing twice is harmless.
    fn close(&mut self);
}

/// An in-memory backend with no window.
///
/// Keeps the last presented frame so callers can inspect or save it.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    open: bool,
    hidden: bool,
    title: String,
    window_size: (u32, u32),
    desktop: Option<(u32, u32)>,
    max_window: Option<(u32, u32)>,
    fullscreen: bool,
    frames_presented: u64,
    last_frame: Option<Surface>,
}

impl HeadlessBackend {
    /// Creates a backend with no desktop and no size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports a desktop of the given size.
    #[must_use]
    pub fn with_desktop(mut self, width: u32, height: u32) -> Self {
        self.desktop = Some((width, height));
        self
    }

    /// Rejects any resize beyond the given size.
    #[must_use]
    pub fn with_max_window(mut self, width: u32, height: u32) -> Self {
        self.max_window = Some((width, height));
        self
    }

    /// Changes or lifts the resize limit on a live backend.
    pub fn set_max_window(&mut self, limit: Option<(u32, u32)>) {
        self.max_window = limit;
    }

    /// Reports the window as not visible even while open.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether `open` has been called without a matching `close`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Title passed to `open`.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current window size.
    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Whether fullscreen is on.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Number of frames presented since creation.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// The most recently presented frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Surface> {
        self.last_frame.as_ref()
    }

    fn check_size(&self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::Resize {
                width,
                height,
                reason: "zero-sized window".to_string(),
            });
        }
        if let Some((max_w, max_h)) = self.max_window {
            if width > max_w || height > max_h {
                return Err(RenderError::Resize {
                    width,
                    height,
                    reason: format!("exceeds {max_w}x{max_h} limit"),
                });
            }
        }
        Ok(())
    }
}

impl DisplayBackend for HeadlessBackend {
    fn open(&mut self, title: &str, width: u32, height: u32) -> RenderResult<()> {
        self.check_size(width, height)
            .map_err(|e| RenderError::WindowCreation(e.to_string()))?;
        self.open = true;
        self.title = title.to_string();
        self.window_size = (width, height);
        info!("Headless display opened at {width}x{height}");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if !self.open {
            return Err(RenderError::NotInitialized);
        }
        self.check_size(width, height)?;
        self.window_size = (width, height);
        debug!("Headless display resized to {width}x{height}");
        Ok(())
    }

    fn set_fullscreen(&mut self, enable: bool) -> RenderResult<()> {
        if !self.open {
            return Err(RenderError::NotInitialized);
        }
        self.fullscreen = enable;
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.open && !self.hidden
    }

    fn desktop_size(&self) -> Option<(u32, u32)> {
        self.desktop
    }

    fn present(&mut self, frame: &Surface) -> RenderResult<()> {
        if !self.open {
            return Err(RenderError::NotInitialized);
        }
        match &mut self.last_frame {
            Some(last) if last.width() == frame.width() && last.height() == frame.height() => {
                last.clone_from(frame);
            },
            slot => *slot = Some(frame.clone()),
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            info!("Headless display closed after {} frames", self.frames_presented);
        }
        self.open = false;
        self.fullscreen = false;
    }
}
