//! RGBA pixel surfaces.
//!
//! A `Surface` is both the blit source handed to the renderer and the
//! canvas the renderer rasterizes into. All writes are bounds-checked:
//! rectangles are intersected with the surface before touching pixels.

use std::path::Path;

use nxe_common::{Color, Rect, RenderError, RenderResult};
use tracing::info;

/// Bytes per pixel (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Surface {
    /// Creates a fully transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Creates a surface filled with one color.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full extent of the surface.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, ready for texture upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Reads one pixel.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes one pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fills the whole surface.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Overwrites every pixel of `rect` that lies on the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        let stride = self.width as usize;
        for y in area.y..area.bottom() {
            let row = y as usize * stride;
            self.pixels[row + area.x as usize..row + area.right() as usize].fill(color);
        }
    }

    /// Blends `color` over every pixel of `rect` that lies on the surface.
    pub fn blend_rect(&mut self, rect: Rect, color: Color) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        let stride = self.width as usize;
        for y in area.y..area.bottom() {
            let row = y as usize * stride;
            for px in &mut self.pixels[row + area.x as usize..row + area.right() as usize] {
                *px = color.blend_over(*px);
            }
        }
    }

    /// Blends `src` onto this surface with nearest-neighbor magnification.
    ///
    /// `dst` is in this surface's pixels and is expected to be
    /// `src_rect` multiplied by `scale`. Destination pixels whose source
    /// falls outside `src` are skipped.
    pub fn blit_scaled(&mut self, src: &Surface, src_rect: Rect, dst: Rect, scale: u32) {
        let Some(area) = dst.intersect(&self.bounds()) else {
            return;
        };
        let scale = scale.max(1) as i32;
        let stride = self.width as usize;

        for y in area.y..area.bottom() {
            let sy = src_rect.y.saturating_add((y - dst.y) / scale);
            let row = y as usize * stride;
            for x in area.x..area.right() {
                let sx = src_rect.x.saturating_add((x - dst.x) / scale);
                if let Some(color) = src.pixel(sx, sy) {
                    let px = &mut self.pixels[row + x as usize];
                    *px = color.blend_over(*px);
                }
            }
        }
    }

    /// Writes the surface as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let image = image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or_else(|| RenderError::Image("pixel buffer does not match size".to_string()))?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| RenderError::Image(e.to_string()))?;

        info!("Saved {}x{} surface to {}", self.width, self.height, path.display());
        Ok(())
    }
}
