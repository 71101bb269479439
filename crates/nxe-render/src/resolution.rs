//! Display resolution table.
//!
//! The renderer draws at a small base resolution and magnifies every
//! pixel by an integer scale factor. Each table entry pairs a window size
//! with the base size and scale that produce it. Entry 0 is the desktop
//! sentinel: its geometry is derived from the display at runtime.

use tracing::debug;

/// Default base width.
pub const BASE_WIDTH: u32 = 320;

/// Default base height.
pub const BASE_HEIGHT: u32 = 240;

/// Index of the "fit the desktop" entry.
pub const DESKTOP_RESOLUTION: usize = 0;

/// A display mode descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionMode {
    /// Display name shown in menus.
    pub name: &'static str,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Logical width drawing coordinates refer to.
    pub base_width: u32,
    /// Logical height drawing coordinates refer to.
    pub base_height: u32,
    /// Integer magnification from base to window pixels.
    pub scale: u32,
    /// Whether the base area is wider than 4:3.
    pub widescreen: bool,
    /// Whether the mode can be selected.
    pub enabled: bool,
}

impl ResolutionMode {
    const fn new(
        name: &'static str,
        width: u32,
        height: u32,
        base_width: u32,
        base_height: u32,
        scale: u32,
        widescreen: bool,
        enabled: bool,
    ) -> Self {
        Self {
            name,
            width,
            height,
            base_width,
            base_height,
            scale,
            widescreen,
            enabled,
        }
    }

    /// Size of the canvas the renderer allocates for this mode.
    #[must_use]
    pub const fn canvas_size(&self) -> (u32, u32) {
        (self.base_width * self.scale, self.base_height * self.scale)
    }

    /// Whether the window fits on a display of the given size.
    #[must_use]
    pub const fn fits(&self, display_width: u32, display_height: u32) -> bool {
        self.width <= display_width && self.height <= display_height
    }
}

/// Every known mode, 4:3 first then widescreen.
pub const RESOLUTIONS: &[ResolutionMode] = &[
    ResolutionMode::new("---", 0, 0, 0, 0, 1, false, true),
    // 4:3
    ResolutionMode::new("320x240", 320, 240, 320, 240, 1, false, true),
    ResolutionMode::new("640x480", 640, 480, 320, 240, 2, false, true),
    ResolutionMode::new("800x600", 800, 600, 320, 240, 2, false, false),
    ResolutionMode::new("1024x768", 1024, 768, 341, 256, 3, false, true),
    ResolutionMode::new("1280x1024", 1280, 1024, 320, 256, 4, false, true),
    ResolutionMode::new("1600x1200", 1600, 1200, 320, 240, 5, false, true),
    // 16:9
    ResolutionMode::new("480x272", 480, 272, 480, 272, 1, true, true),
    ResolutionMode::new("1280x720", 1280, 720, 426, 240, 3, true, true),
    ResolutionMode::new("1360x768", 1360, 768, 453, 256, 3, true, true),
    ResolutionMode::new("1366x768", 1366, 768, 455, 256, 3, true, true),
    ResolutionMode::new("1440x900", 1440, 900, 480, 300, 3, true, true),
    ResolutionMode::new("1600x900", 1600, 900, 533, 300, 3, true, true),
    ResolutionMode::new("1920x1080", 1920, 1080, 480, 270, 4, true, true),
    ResolutionMode::new("2560x1440", 2560, 1440, 426, 240, 6, true, true),
    ResolutionMode::new("3840x2160", 3840, 2160, 480, 270, 8, true, true),
];

/// Resolves the desktop sentinel against a concrete display size.
///
/// The scale is the largest integer that keeps the base height at or
/// above `BASE_HEIGHT`; the base area is whatever remains of the display.
#[must_use]
pub fn desktop_mode(display_width: u32, display_height: u32) -> ResolutionMode {
    let scale = (display_height / BASE_HEIGHT).max(1);
    let base_width = display_width / scale;
    let base_height = display_height / scale;

    ResolutionMode {
        width: display_width,
        height: display_height,
        base_width,
        base_height,
        scale,
        widescreen: base_width * 3 > base_height * 4,
        ..RESOLUTIONS[DESKTOP_RESOLUTION]
    }
}

/// Builds the selectable table for a display.
///
/// Modes larger than the display are disabled. Without a known display
/// the desktop sentinel is disabled and the static flags are kept.
#[must_use]
pub fn resolutions_for_display(display: Option<(u32, u32)>) -> Vec<ResolutionMode> {
    let mut table = RESOLUTIONS.to_vec();
    match display {
        Some((width, height)) => {
            for (index, mode) in table.iter_mut().enumerate().skip(1) {
                if mode.enabled && !mode.fits(width, height) {
                    debug!("Disabling {} (index {index}) on {width}x{height} display", mode.name);
                    mode.enabled = false;
                }
            }
        },
        None => table[DESKTOP_RESOLUTION].enabled = false,
    }
    table
}

/// Looks up a mode index by its display name.
#[must_use]
pub fn find_resolution(name: &str) -> Option<usize> {
    RESOLUTIONS.iter().position(|mode| mode.name == name)
}

/// Placement of the canvas inside the window, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X offset (for pillarboxing).
    pub x: f32,
    /// Y offset (for letterboxing).
    pub y: f32,
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

impl Viewport {
    /// Creates a new viewport.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Places a frame inside a window.
    ///
    /// A frame that fits is centered at 1:1 so magnified pixels stay
    /// square; a larger frame is shrunk to fit with its aspect kept.
    #[must_use]
    pub fn fit(window_width: u32, window_height: u32, frame_width: u32, frame_height: u32) -> Self {
        let (ww, wh) = (window_width as f32, window_height as f32);
        let (fw, fh) = (frame_width as f32, frame_height as f32);

        if ww <= 0.0 || wh <= 0.0 || fw <= 0.0 || fh <= 0.0 {
            return Self::new(0.0, 0.0, ww.max(1.0), wh.max(1.0));
        }

        if fw <= ww && fh <= wh {
            return Self::new(((ww - fw) / 2.0).floor(), ((wh - fh) / 2.0).floor(), fw, fh);
        }

        let window_aspect = ww / wh;
        let frame_aspect = fw / fh;
        if window_aspect > frame_aspect {
            // Pillarbox (black bars on sides)
            let width = wh * frame_aspect;
            Self::new((ww - width) / 2.0, 0.0, width, wh)
        } else {
            // Letterbox (black bars on top/bottom)
            let height = ww / frame_aspect;
            Self::new(0.0, (wh - height) / 2.0, ww, height)
        }
    }
}
