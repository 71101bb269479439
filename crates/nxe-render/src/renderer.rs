//! The renderer facade.
//!
//! `Renderer` owns a display backend and a canvas. Drawing calls take
//! coordinates in base pixels (the logical screen, 320x240 by default)
//! and rasterize them magnified by the current scale. `flip` hands the
//! canvas to the backend.

use nxe_common::{Color, Rect, RenderError, RenderResult};
use tracing::{debug, info, warn};

use crate::backend::DisplayBackend;
use crate::clip;
use crate::resolution::{
    desktop_mode, resolutions_for_display, ResolutionMode, BASE_HEIGHT, BASE_WIDTH,
    DESKTOP_RESOLUTION,
};
use crate::surface::Surface;

/// Window title used by `init_video`.
pub const DEFAULT_TITLE: &str = "NXEngine";

/// Alpha of the black overlay drawn by `tint_screen`.
pub const TINT_ALPHA: u8 = 150;

/// Corner coordinates are clamped to this magnitude. It lies far outside
/// any canvas, so clamping never changes what is visible.
const COORD_LIMIT: i32 = 1 << 24;

/// Immediate-mode 2D renderer over a display backend.
#[derive(Debug)]
pub struct Renderer<B: DisplayBackend> {
    backend: B,
    canvas: Surface,
    title: String,
    screen_width: u32,
    screen_height: u32,
    widescreen: bool,
    scale: u32,
    resolutions: Vec<ResolutionMode>,
    current_res: Option<usize>,
    clip_rect: Option<Rect>,
    video_open: bool,
}

impl<B: DisplayBackend> Renderer<B> {
    /// Creates a renderer at 320x240, scale 1. Nothing is opened yet.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            canvas: Surface::filled(BASE_WIDTH, BASE_HEIGHT, Color::BLACK),
            title: DEFAULT_TITLE.to_string(),
            screen_width: BASE_WIDTH,
            screen_height: BASE_HEIGHT,
            widescreen: false,
            scale: 1,
            resolutions: resolutions_for_display(None),
            current_res: None,
            clip_rect: None,
            video_open: false,
        }
    }

    /// Sets the title used when the window is opened.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    // === Lifecycle ===

    /// Opens the window and switches to `resolution`.
    pub fn init(&mut self, resolution: usize) -> RenderResult<()> {
        self.init_video()?;
        self.set_resolution(resolution, false)?;
        info!(
            "Renderer ready: {}x{} base, scale {}",
            self.screen_width, self.screen_height, self.scale
        );
        Ok(())
    }

    /// Closes the window. The renderer can be re-initialized afterwards.
    pub fn close(&mut self) {
        self.clip_rect = None;
        self.current_res = None;
        if self.video_open {
            self.backend.close();
            self.video_open = false;
            info!("Renderer closed");
        }
    }

    /// Whether the window can currently be seen.
    pub fn is_window_visible(&self) -> bool {
        self.video_open && self.backend.is_visible()
    }

    /// Opens the backend window at the current canvas size and adapts the
    /// resolution table to the display.
    pub fn init_video(&mut self) -> RenderResult<()> {
        if self.video_open {
            debug!("init_video: already open");
            return Ok(());
        }

        self.backend
            .open(&self.title, self.canvas.width(), self.canvas.height())?;
        self.video_open = true;

        let desktop = self.backend.desktop_size();
        match desktop {
            Some((w, h)) => info!("Display size {w}x{h}"),
            None => debug!("Display size unknown, desktop mode disabled"),
        }
        self.resolutions = resolutions_for_display(desktop);
        Ok(())
    }

    /// Enters or leaves fullscreen.
    pub fn set_fullscreen(&mut self, enable: bool) -> RenderResult<()> {
        if !self.video_open {
            return Err(RenderError::NotInitialized);
        }
        info!("Fullscreen {}", if enable { "on" } else { "off" });
        self.backend.set_fullscreen(enable)
    }

    // === Resolution ===

    /// Switches to a resolution table entry.
    ///
    /// Returns `Ok(false)` when `index` is already active. On failure the
    /// current resolution becomes unset; with `restore_on_failure` the
    /// previous mode is re-applied before the error is returned.
    pub fn set_resolution(&mut self, index: usize, restore_on_failure: bool) -> RenderResult<bool> {
        info!("set_resolution({index})");
        if !self.video_open {
            return Err(RenderError::NotInitialized);
        }
        if self.current_res == Some(index) {
            return Ok(false);
        }

        let mode = self.resolve_mode(index)?;
        let previous = self.current_res;

        match self.apply_mode(&mode) {
            Ok(()) => {
                self.current_res = Some(index);
                Ok(true)
            },
            Err(err) => {
                warn!("Failed to switch to {}: {err}", mode.name);
                self.current_res = None;
                if let (true, Some(previous)) = (restore_on_failure, previous) {
                    match self.set_resolution(previous, false) {
                        Ok(_) => info!("Restored resolution {previous}"),
                        Err(restore_err) => {
                            warn!("Failed to restore resolution {previous}: {restore_err}");
                        },
                    }
                }
                Err(err)
            },
        }
    }

    fn resolve_mode(&self, index: usize) -> RenderResult<ResolutionMode> {
        let mode = self
            .resolutions
            .get(index)
            .ok_or(RenderError::UnknownResolution(index))?;
        if !mode.enabled {
            return Err(RenderError::ResolutionDisabled(mode.name.to_string()));
        }
        if index == DESKTOP_RESOLUTION {
            let (w, h) = self
                .backend
                .desktop_size()
                .ok_or_else(|| RenderError::ResolutionDisabled(mode.name.to_string()))?;
            return Ok(desktop_mode(w, h));
        }
        Ok(*mode)
    }

    fn apply_mode(&mut self, mode: &ResolutionMode) -> RenderResult<()> {
        self.backend.resize(mode.width, mode.height)?;

        self.scale = mode.scale.max(1);
        self.screen_width = mode.base_width;
        self.screen_height = mode.base_height;
        self.widescreen = mode.widescreen;
        info!(
            "Window {}x{}, base {}x{}, scale {}",
            mode.width, mode.height, self.screen_width, self.screen_height, self.scale
        );

        self.flush_all()
    }

    /// The resolution table, with modes the display cannot show disabled.
    pub fn resolutions(&self) -> &[ResolutionMode] {
        &self.resolutions
    }

    /// Number of table entries.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.len()
    }

    /// Index of the active mode, unset before the first switch.
    pub fn current_resolution(&self) -> Option<usize> {
        self.current_res
    }

    /// Rebuilds the canvas for the current geometry.
    ///
    /// The new canvas is black and any clip rectangle is dropped.
    pub fn flush_all(&mut self) -> RenderResult<()> {
        let width = self.screen_width * self.scale;
        let height = self.screen_height * self.scale;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurface {
                width,
                height,
                expected: 0,
                len: 0,
            });
        }

        if self.canvas.width() == width && self.canvas.height() == height {
            self.canvas.fill(Color::BLACK);
        } else {
            self.canvas = Surface::filled(width, height, Color::BLACK);
        }
        self.clip_rect = None;
        debug!("Canvas rebuilt at {width}x{height}");
        Ok(())
    }

    // === Geometry ===

    /// Base screen width.
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Base screen height.
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Integer magnification from base to canvas pixels.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Whether the base screen is wider than 4:3.
    pub fn is_widescreen(&self) -> bool {
        self.widescreen
    }

    fn scale_i(&self) -> i32 {
        self.scale as i32
    }

    fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.screen_width as i32, self.screen_height as i32)
    }

    /// Visible area in base pixels: the clip rectangle within the screen.
    fn visible_rect(&self) -> Option<Rect> {
        match self.clip_rect {
            Some(clip_rect) => clip_rect.intersect(&self.screen_rect()),
            None => Some(self.screen_rect()),
        }
    }

    // === Drawing ===

    /// Shows a centered image on black and presents it.
    pub fn show_loading_screen(&mut self, image: &Surface) -> RenderResult<()> {
        self.clear_screen(Color::BLACK);
        let x = (self.screen_width as i32 / 2) - (image.width() as i32 / 2);
        let y = (self.screen_height as i32 / 2) - (image.height() as i32 / 2);
        self.draw_surface(image, x, y);
        self.flip()
    }

    /// Draws a whole surface with its top-left corner at `(x, y)`.
    pub fn draw_surface(&mut self, src: &Surface, x: i32, y: i32) {
        self.draw_surface_region(src, x, y, 0, 0, src.width() as i32, src.height() as i32);
    }

    /// Draws the `w` x `h` region of `src` at `(srcx, srcy)` to `(dstx, dsty)`.
    pub fn draw_surface_region(
        &mut self,
        src: &Surface,
        dstx: i32,
        dsty: i32,
        srcx: i32,
        srcy: i32,
        w: i32,
        h: i32,
    ) {
        let (src_rect, dst_x, dst_y) =
            clip::clamp_source(src.bounds(), Rect::new(srcx, srcy, w, h), dstx, dsty, 1);
        if src_rect.is_empty() {
            return;
        }

        // clip in base pixels so scaling only ever sees on-screen values
        let dst_rect = Rect::new(dst_x, dst_y, src_rect.w, src_rect.h);
        let Some(area) = self.visible_rect().and_then(|v| v.intersect(&dst_rect)) else {
            return;
        };
        let src_rect = Rect::new(
            src_rect.x + (area.x - dst_rect.x),
            src_rect.y + (area.y - dst_rect.y),
            area.w,
            area.h,
        );
        self.canvas
            .blit_scaled(src, src_rect, area.scaled(self.scale_i()), self.scale);
    }

    /// Tiles `height` rows of `src`, starting at row `y_src`, across the
    /// screen from `x_dst` to the right edge.
    pub fn blit_pattern_across(
        &mut self,
        src: &Surface,
        x_dst: i32,
        y_dst: i32,
        y_src: i32,
        height: i32,
    ) {
        let tile_width = i64::from(src.width());
        if tile_width == 0 || height <= 0 {
            return;
        }
        let Some(visible) = self.visible_rect() else {
            return;
        };

        // skip whole tiles that end left of the visible area
        let left = i64::from(visible.x);
        let mut x = i64::from(x_dst);
        if x + tile_width <= left {
            x += (left - x) / tile_width * tile_width;
        }

        while x < i64::from(visible.right()) {
            self.draw_surface_region(src, x as i32, y_dst, 0, y_src, tile_width as i32, height);
            x += tile_width;
        }
    }

    /// Fills the whole canvas, ignoring the clip rectangle.
    pub fn clear_screen(&mut self, color: Color) {
        self.canvas.fill(color);
    }

    /// `clear_screen` with separate channels.
    pub fn clear_screen_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.clear_screen(Color::rgb(r, g, b));
    }

    /// Draws a one-pixel line between two points, both inclusive.
    ///
    /// The line is clipped to the visible area before it is walked.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let Some(visible) = self.visible_rect() else {
            return;
        };
        let Some((x1, y1, x2, y2)) = clip::clip_line(visible, x1, y1, x2, y2) else {
            return;
        };

        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let (mut x, mut y) = (x1, y1);
        let mut err = dx + dy;

        loop {
            self.fill_base(Rect::new(x, y, 1, 1), color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws a one-pixel outline between inclusive corners.
    pub fn draw_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let rect = normalized(x1, y1, x2, y2);
        let (right, bottom) = rect.last_corner();

        self.fill_base(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_base(Rect::new(rect.x, bottom, rect.w, 1), color);
        self.fill_base(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_base(Rect::new(right, rect.y, 1, rect.h), color);
    }

    /// `draw_rect` with separate channels.
    pub fn draw_rect_rgb(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, r: u8, g: u8, b: u8) {
        self.draw_rect(x1, y1, x2, y2, Color::rgb(r, g, b));
    }

    /// Outlines a rectangle.
    pub fn draw_rect_at(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (x2, y2) = rect.last_corner();
        self.draw_rect(rect.x, rect.y, x2, y2, color);
    }

    /// Fills the area between inclusive corners.
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.fill_base(normalized(x1, y1, x2, y2), color);
    }

    /// `fill_rect` with separate channels.
    pub fn fill_rect_rgb(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, r: u8, g: u8, b: u8) {
        self.fill_rect(x1, y1, x2, y2, Color::rgb(r, g, b));
    }

    /// Fills a rectangle.
    pub fn fill_rect_at(&mut self, rect: Rect, color: Color) {
        self.fill_base(rect, color);
    }

    /// Sets one base pixel.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.fill_base(Rect::new(x, y, 1, 1), color);
    }

    /// `draw_pixel` with separate channels.
    pub fn draw_pixel_rgb(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.draw_pixel(x, y, Color::rgb(r, g, b));
    }

    /// Darkens everything inside the visible area.
    pub fn tint_screen(&mut self) {
        if let Some(visible) = self.visible_rect() {
            self.canvas
                .blend_rect(visible.scaled(self.scale_i()), Color::BLACK.with_alpha(TINT_ALPHA));
        }
    }

    /// Overwrites a base-pixel rectangle, clipped to the visible area.
    fn fill_base(&mut self, rect: Rect, color: Color) {
        let Some(area) = self.visible_rect().and_then(|v| v.intersect(&rect)) else {
            return;
        };
        self.canvas.fill_rect(area.scaled(self.scale_i()), color);
    }

    // === Clipping ===

    /// Restricts drawing to a base-pixel rectangle.
    pub fn set_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.set_clip_rect(Rect::new(x, y, w, h));
    }

    /// Restricts drawing to `rect`, replacing any previous clip.
    pub fn set_clip_rect(&mut self, rect: Rect) {
        self.clip_rect = Some(rect);
    }

    /// Removes the clip rectangle.
    pub fn clear_clip(&mut self) {
        self.clip_rect = None;
    }

    /// Whether a clip rectangle is active.
    pub fn is_clip_set(&self) -> bool {
        self.clip_rect.is_some()
    }

    /// The active clip rectangle.
    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_rect
    }

    /// Clips a same-unit blit pair against the clip rectangle.
    ///
    /// Pairs pass through unchanged when no clip is set.
    pub fn clip(&self, src: Rect, dst: Rect) -> (Rect, Rect) {
        match self.clip_rect {
            Some(clip_rect) => clip::clip(clip_rect, src, dst),
            None => (src, dst),
        }
    }

    /// Clips a blit pair whose destination is in canvas pixels.
    pub fn clip_scaled(&self, src: Rect, dst: Rect) -> (Rect, Rect) {
        match self.clip_rect {
            Some(clip_rect) => clip::clip_scaled(clip_rect, self.scale_i(), src, dst),
            None => (src, dst),
        }
    }

    // === Presentation ===

    /// Presents the canvas.
    pub fn flip(&mut self) -> RenderResult<()> {
        if !self.video_open {
            return Err(RenderError::NotInitialized);
        }
        self.backend.present(&self.canvas)
    }

    /// A copy of the canvas as it stands.
    pub fn screenshot(&self) -> Surface {
        self.canvas.clone()
    }

    /// The canvas being drawn into.
    pub fn canvas(&self) -> &Surface {
        &self.canvas
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The wrapped backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn normalized(x1: i32, y1: i32, x2: i32, y2: i32) -> Rect {
    let limit = |v: i32| v.clamp(-COORD_LIMIT, COORD_LIMIT);
    let (x1, y1, x2, y2) = (limit(x1), limit(y1), limit(x2), limit(y2));
    Rect::from_corners(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::resolution::find_resolution;

    const RED: Color = Color::rgb(255, 0, 0);

    fn index(name: &str) -> usize {
        find_resolution(name).expect("resolution in table")
    }

    fn renderer_at(name: &str) -> Renderer<HeadlessBackend> {
        let backend = HeadlessBackend::new().with_desktop(1920, 1080);
        let mut renderer = Renderer::new(backend);
        renderer.init(index(name)).unwrap();
        renderer
    }

    fn count(renderer: &Renderer<HeadlessBackend>, color: Color) -> usize {
        renderer
            .canvas()
            .pixels()
            .iter()
            .filter(|c| **c == color)
            .count()
    }

    #[test]
    fn test_defaults() {
        let renderer = Renderer::new(HeadlessBackend::new());
        assert_eq!(renderer.screen_width(), 320);
        assert_eq!(renderer.screen_height(), 240);
        assert_eq!(renderer.scale(), 1);
        assert!(!renderer.is_widescreen());
        assert_eq!(renderer.current_resolution(), None);
        assert!(!renderer.is_window_visible());
        assert!(!renderer.is_clip_set());
    }

    #[test]
    fn test_init_sets_geometry() {
        let renderer = renderer_at("640x480");
        assert_eq!(renderer.scale(), 2);
        assert_eq!(renderer.screen_width(), 320);
        assert_eq!(renderer.canvas().width(), 640);
        assert_eq!(renderer.canvas().height(), 480);
        assert_eq!(renderer.backend().window_size(), (640, 480));
        assert_eq!(renderer.current_resolution(), Some(index("640x480")));
        assert!(renderer.is_window_visible());
    }

    #[test]
    fn test_same_resolution_is_noop() {
        let mut renderer = renderer_at("640x480");
        assert!(!renderer.set_resolution(index("640x480"), true).unwrap());
        assert!(renderer.set_resolution(index("1280x720"), true).unwrap());
        assert!(renderer.is_widescreen());
        assert_eq!(renderer.canvas().width(), 1278);
    }

    #[test]
    fn test_unknown_and_disabled_resolutions() {
        let mut renderer = renderer_at("320x240");
        assert!(matches!(
            renderer.set_resolution(99, true),
            Err(RenderError::UnknownResolution(99))
        ));
        assert!(matches!(
            renderer.set_resolution(index("800x600"), true),
            Err(RenderError::ResolutionDisabled(_))
        ));
        // larger than the 1920x1080 desktop
        assert!(matches!(
            renderer.set_resolution(index("2560x1440"), true),
            Err(RenderError::ResolutionDisabled(_))
        ));
        assert_eq!(renderer.current_resolution(), Some(index("320x240")));
    }

    #[test]
    fn test_desktop_resolution() {
        let mut renderer = renderer_at("320x240");
        renderer.set_resolution(DESKTOP_RESOLUTION, false).unwrap();
        assert_eq!(renderer.scale(), 4);
        assert_eq!(renderer.screen_width(), 480);
        assert_eq!(renderer.screen_height(), 270);
        assert_eq!(renderer.backend().window_size(), (1920, 1080));
    }

    #[test]
    fn test_desktop_unavailable_without_display() {
        let mut renderer = Renderer::new(HeadlessBackend::new());
        assert!(matches!(
            renderer.init(DESKTOP_RESOLUTION),
            Err(RenderError::ResolutionDisabled(_))
        ));
    }

    #[test]
    fn test_failed_switch_restores_previous() {
        let backend = HeadlessBackend::new()
            .with_desktop(1920, 1080)
            .with_max_window(1024, 768);
        let mut renderer = Renderer::new(backend);
        renderer.init(index("640x480")).unwrap();

        let err = renderer
            .set_resolution(index("1280x720"), true)
            .unwrap_err();
        assert!(matches!(err, RenderError::Resize { .. }));
        assert_eq!(renderer.current_resolution(), Some(index("640x480")));
        assert_eq!(renderer.scale(), 2);
        assert_eq!(renderer.backend().window_size(), (640, 480));
    }

    #[test]
    fn test_failed_switch_without_restore() {
        let backend = HeadlessBackend::new()
            .with_desktop(1920, 1080)
            .with_max_window(1024, 768);
        let mut renderer = Renderer::new(backend);
        renderer.init(index("640x480")).unwrap();

        assert!(renderer.set_resolution(index("1280x720"), false).is_err());
        assert_eq!(renderer.current_resolution(), None);
        // the previous mode can be selected again
        assert!(renderer.set_resolution(index("640x480"), false).unwrap());
    }

    #[test]
    fn test_failed_restore_leaves_resolution_unset() {
        let backend = HeadlessBackend::new()
            .with_desktop(1920, 1080)
            .with_max_window(1024, 768);
        let mut renderer = Renderer::new(backend);
        renderer.init(index("640x480")).unwrap();
        renderer.backend_mut().set_max_window(Some((320, 240)));

        let err = renderer
            .set_resolution(index("1280x720"), true)
            .unwrap_err();
        // the error reports the requested mode, not the restore attempt
        assert!(matches!(err, RenderError::Resize { width: 1280, height: 720, .. }));
        assert_eq!(renderer.current_resolution(), None);
        assert_eq!(renderer.backend().window_size(), (640, 480));
        assert_eq!(renderer.scale(), 2);
        assert_eq!(renderer.canvas().width(), 640);
    }

    #[test]
    fn test_desktop_resolution_on_4_3_display() {
        let backend = HeadlessBackend::new().with_desktop(1024, 768);
        let mut renderer = Renderer::new(backend);
        renderer.init(DESKTOP_RESOLUTION).unwrap();
        assert_eq!(renderer.scale(), 3);
        assert_eq!(renderer.screen_width(), 341);
        assert_eq!(renderer.screen_height(), 256);
        assert!(!renderer.is_widescreen());
        assert_eq!(renderer.backend().window_size(), (1024, 768));
        assert_eq!(renderer.current_resolution(), Some(DESKTOP_RESOLUTION));
    }

    #[test]
    fn test_resolution_requires_video() {
        let mut renderer = Renderer::new(HeadlessBackend::new());
        assert!(matches!(
            renderer.set_resolution(1, true),
            Err(RenderError::NotInitialized)
        ));
        assert!(matches!(renderer.flip(), Err(RenderError::NotInitialized)));
        assert!(renderer.set_fullscreen(true).is_err());
    }

    #[test]
    fn test_flush_drops_clip() {
        let mut renderer = renderer_at("320x240");
        renderer.set_clip(0, 0, 10, 10);
        renderer.set_resolution(index("640x480"), false).unwrap();
        assert!(!renderer.is_clip_set());
    }

    #[test]
    fn test_fill_rect_is_inclusive_and_scaled() {
        let mut renderer = renderer_at("640x480");
        renderer.fill_rect(1, 1, 2, 3, RED);
        // 2x3 base pixels at scale 2
        assert_eq!(count(&renderer, RED), 2 * 3 * 4);
        assert_eq!(renderer.canvas().pixel(2, 2), Some(RED));
        assert_eq!(renderer.canvas().pixel(5, 7), Some(RED));
        assert_eq!(renderer.canvas().pixel(6, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_fill_rect_swapped_corners() {
        let mut renderer = renderer_at("320x240");
        renderer.fill_rect(4, 4, 2, 2, RED);
        assert_eq!(count(&renderer, RED), 9);
    }

    #[test]
    fn test_rect_variants_agree() {
        let mut a = renderer_at("320x240");
        let mut b = renderer_at("320x240");
        a.fill_rect_rgb(3, 4, 10, 12, 255, 0, 0);
        b.fill_rect_at(Rect::from_corners(3, 4, 10, 12), RED);
        assert_eq!(a.canvas(), b.canvas());

        a.draw_rect_rgb(20, 20, 30, 25, 0, 255, 0);
        b.draw_rect_at(Rect::from_corners(20, 20, 30, 25), Color::rgb(0, 255, 0));
        assert_eq!(a.canvas(), b.canvas());
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut renderer = renderer_at("320x240");
        renderer.draw_rect(10, 10, 14, 13, RED);
        // 5x4 outline: perimeter pixels only
        assert_eq!(count(&renderer, RED), 5 * 2 + 2 * 2);
        assert_eq!(renderer.canvas().pixel(12, 11), Some(Color::BLACK));
        assert_eq!(renderer.canvas().pixel(14, 13), Some(RED));
    }

    #[test]
    fn test_draw_pixel_scaled() {
        let mut renderer = renderer_at("1024x768");
        renderer.draw_pixel_rgb(1, 1, 255, 0, 0);
        assert_eq!(count(&renderer, RED), 9);
        assert_eq!(renderer.canvas().pixel(3, 3), Some(RED));
        assert_eq!(renderer.canvas().pixel(6, 6), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_line() {
        let mut renderer = renderer_at("320x240");
        renderer.draw_line(0, 0, 9, 0, RED);
        assert_eq!(count(&renderer, RED), 10);

        renderer.clear_screen(Color::BLACK);
        renderer.draw_line(5, 5, 0, 0, RED);
        assert_eq!(count(&renderer, RED), 6);
        for i in 0..6 {
            assert_eq!(renderer.canvas().pixel(i, i), Some(RED));
        }
    }

    #[test]
    fn test_line_offscreen_is_clipped() {
        let mut renderer = renderer_at("320x240");
        renderer.draw_line(-10, 5, 330, 5, RED);
        assert_eq!(count(&renderer, RED), 320);
    }

    #[test]
    fn test_fill_rect_extreme_corners() {
        let mut renderer = renderer_at("640x480");
        renderer.fill_rect(0, 0, i32::MAX, i32::MAX, RED);
        assert_eq!(count(&renderer, RED), 640 * 480);

        renderer.clear_screen(Color::BLACK);
        renderer.fill_rect(i32::MIN, 7, i32::MAX, 7, RED);
        assert_eq!(count(&renderer, RED), 640 * 2);

        renderer.clear_screen(Color::BLACK);
        renderer.draw_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, RED);
        assert_eq!(count(&renderer, RED), 0);
    }

    #[test]
    fn test_huge_clip_is_cut_to_screen() {
        let mut renderer = renderer_at("640x480");
        renderer.set_clip(10, 10, i32::MAX, i32::MAX);
        renderer.fill_rect(0, 0, 319, 239, RED);
        assert_eq!(count(&renderer, RED), 310 * 230 * 4);
    }

    #[test]
    fn test_draw_line_extreme_endpoints() {
        let mut renderer = renderer_at("640x480");
        renderer.draw_line(-1_500_000_000, 5, 1_500_000_000, 5, RED);
        assert_eq!(count(&renderer, RED), 640 * 2);

        renderer.clear_screen(Color::BLACK);
        renderer.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, RED);
        assert_eq!(renderer.canvas().pixel(0, 0), Some(RED));
        assert_eq!(renderer.canvas().pixel(479, 479), Some(RED));

        renderer.clear_screen(Color::BLACK);
        renderer.draw_line(i32::MIN, -5, i32::MAX, -5, RED);
        assert_eq!(count(&renderer, RED), 0);
    }

    #[test]
    fn test_draw_surface_extreme_positions() {
        let mut renderer = renderer_at("640x480");
        let sprite = Surface::filled(8, 8, RED);
        renderer.draw_surface(&sprite, i32::MAX / 2 + 10, 0);
        renderer.draw_surface(&sprite, i32::MAX, i32::MAX);
        renderer.draw_surface(&sprite, i32::MIN, i32::MIN);
        renderer.draw_surface_region(&sprite, 0, 0, i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(count(&renderer, RED), 0);
    }

    #[test]
    fn test_blit_pattern_from_far_left() {
        let mut renderer = renderer_at("320x240");
        let tile = Surface::filled(7, 1, RED);
        renderer.blit_pattern_across(&tile, i32::MIN, 0, 0, 1);
        assert_eq!(count(&renderer, RED), 320);
    }

    #[test]
    fn test_clip_limits_drawing() {
        let mut renderer = renderer_at("640x480");
        renderer.set_clip(10, 10, 5, 5);
        assert!(renderer.is_clip_set());
        renderer.fill_rect(0, 0, 319, 239, RED);
        assert_eq!(count(&renderer, RED), 5 * 5 * 4);

        renderer.clear_clip();
        assert!(!renderer.is_clip_set());
        renderer.fill_rect(0, 0, 319, 239, RED);
        assert_eq!(count(&renderer, RED), 640 * 480);
    }

    #[test]
    fn test_clear_ignores_clip() {
        let mut renderer = renderer_at("320x240");
        renderer.set_clip(0, 0, 1, 1);
        renderer.clear_screen_rgb(0, 0, 0x21);
        assert_eq!(count(&renderer, Color::DK_BLUE), 320 * 240);
        assert!(renderer.is_clip_set());
    }

    #[test]
    fn test_clip_pass_through_when_unset() {
        let renderer = renderer_at("320x240");
        let pair = (Rect::new(0, 0, 4, 4), Rect::new(-2, -2, 4, 4));
        assert_eq!(renderer.clip(pair.0, pair.1), pair);
        assert_eq!(renderer.clip_scaled(pair.0, pair.1), pair);
    }

    #[test]
    fn test_clip_scaled_uses_scale() {
        let mut renderer = renderer_at("640x480");
        renderer.set_clip(2, 0, 100, 100);
        let (src, dst) = renderer.clip_scaled(Rect::new(0, 0, 4, 4), Rect::new(0, 0, 8, 8));
        assert_eq!(dst, Rect::new(4, 0, 4, 8));
        assert_eq!(src, Rect::new(2, 0, 2, 4));

        let (src, dst) = renderer.clip(Rect::new(0, 0, 4, 4), Rect::new(0, 0, 4, 4));
        assert_eq!(dst, Rect::new(2, 0, 2, 4));
        assert_eq!(src, Rect::new(2, 0, 2, 4));
    }

    #[test]
    fn test_draw_surface_scaled_and_clipped() {
        let mut renderer = renderer_at("640x480");
        let sprite = Surface::filled(4, 4, RED);

        renderer.draw_surface(&sprite, 10, 10);
        assert_eq!(count(&renderer, RED), 16 * 4);
        assert_eq!(renderer.canvas().pixel(20, 20), Some(RED));

        renderer.clear_screen(Color::BLACK);
        renderer.set_clip(12, 12, 100, 100);
        renderer.draw_surface(&sprite, 10, 10);
        assert_eq!(count(&renderer, RED), 4 * 4);
        assert_eq!(renderer.canvas().pixel(23, 23), Some(Color::BLACK));
        assert_eq!(renderer.canvas().pixel(24, 24), Some(RED));
    }

    #[test]
    fn test_draw_surface_region() {
        let mut renderer = renderer_at("320x240");
        let mut sheet = Surface::filled(4, 2, Color::WHITE);
        sheet.fill_rect(Rect::new(2, 0, 2, 2), RED);

        renderer.draw_surface_region(&sheet, 0, 0, 2, 0, 2, 2);
        assert_eq!(count(&renderer, RED), 4);
        assert_eq!(count(&renderer, Color::WHITE), 0);

        // region hanging off the sheet is clamped
        renderer.clear_screen(Color::BLACK);
        renderer.draw_surface_region(&sheet, 0, 0, 3, 0, 8, 8);
        assert_eq!(count(&renderer, RED), 2);
    }

    #[test]
    fn test_draw_surface_offscreen() {
        let mut renderer = renderer_at("320x240");
        let sprite = Surface::filled(8, 8, RED);
        renderer.draw_surface(&sprite, -4, -4);
        assert_eq!(count(&renderer, RED), 16);
        renderer.draw_surface(&sprite, 400, 0);
        assert_eq!(count(&renderer, RED), 16);
    }

    #[test]
    fn test_blit_pattern_across() {
        let mut renderer = renderer_at("320x240");
        let mut tile = Surface::filled(30, 4, Color::WHITE);
        tile.fill_rect(Rect::new(0, 2, 30, 2), RED);

        renderer.blit_pattern_across(&tile, 5, 100, 2, 2);
        // covers x 5..320 on rows 100 and 101
        assert_eq!(count(&renderer, RED), 315 * 2);
        assert_eq!(count(&renderer, Color::WHITE), 0);
        assert_eq!(renderer.canvas().pixel(319, 101), Some(RED));
        assert_eq!(renderer.canvas().pixel(4, 100), Some(Color::BLACK));
    }

    #[test]
    fn test_blit_pattern_honors_clip() {
        let mut renderer = renderer_at("320x240");
        let tile = Surface::filled(16, 1, RED);
        renderer.set_clip(0, 0, 40, 240);
        renderer.blit_pattern_across(&tile, 0, 0, 0, 1);
        assert_eq!(count(&renderer, RED), 40);
    }

    #[test]
    fn test_tint_screen() {
        let mut renderer = renderer_at("320x240");
        renderer.clear_screen(Color::WHITE);
        renderer.tint_screen();
        let px = renderer.canvas().pixel(0, 0).unwrap();
        assert_eq!(px.r, 105);
        assert!(px.is_opaque());
    }

    #[test]
    fn test_flip_presents_canvas() {
        let mut renderer = renderer_at("640x480");
        renderer.clear_screen(Color::DK_BLUE);
        renderer.flip().unwrap();
        let frame = renderer.backend().last_frame().unwrap();
        assert_eq!(frame, renderer.canvas());
        assert_eq!(renderer.backend().frames_presented(), 1);
    }

    #[test]
    fn test_loading_screen_is_centered() {
        let mut renderer = renderer_at("320x240");
        let image = Surface::filled(20, 10, RED);
        renderer.show_loading_screen(&image).unwrap();

        let frame = renderer.backend().last_frame().unwrap();
        assert_eq!(frame.pixel(150, 115), Some(RED));
        assert_eq!(frame.pixel(169, 124), Some(RED));
        assert_eq!(frame.pixel(149, 115), Some(Color::BLACK));
        assert_eq!(frame.pixel(170, 124), Some(Color::BLACK));
    }

    #[test]
    fn test_fullscreen_and_close() {
        let mut renderer = renderer_at("320x240");
        renderer.set_fullscreen(true).unwrap();
        assert!(renderer.backend().is_fullscreen());

        renderer.set_clip(1, 1, 2, 2);
        renderer.close();
        assert!(!renderer.is_window_visible());
        assert!(!renderer.is_clip_set());
        assert_eq!(renderer.current_resolution(), None);
        assert!(!renderer.backend().is_open());

        // reopening works
        renderer.init(index("640x480")).unwrap();
        assert!(renderer.is_window_visible());
    }

    #[test]
    fn test_screenshot_copies_canvas() {
        let mut renderer = renderer_at("320x240");
        renderer.draw_pixel(0, 0, RED);
        let shot = renderer.screenshot();
        renderer.clear_screen(Color::BLACK);
        assert_eq!(shot.pixel(0, 0), Some(RED));
    }
}
