//! Demo scene.
//!
//! Draws a small animated screen that touches every renderer primitive:
//! pattern strips, filled and outlined rectangles, lines, pixels, a
//! clipped sprite and the screen tint. Surfaces are generated in code.

use nxe_common::{Color, Rect};
use nxe_render::{DisplayBackend, Renderer, Surface};

/// Width of the repeating strip tile.
const TILE_WIDTH: u32 = 32;

/// Height of one strip band in the tile.
const BAND_HEIGHT: u32 = 8;

/// Number of stars in the backdrop.
const STAR_COUNT: u32 = 48;

/// Generated surfaces and animation state.
#[derive(Debug, Clone)]
pub struct DemoScene {
    tile: Surface,
    sprite: Surface,
    loading: Surface,
    frame: u64,
    /// Whether `tint_screen` runs at the end of each frame.
    pub tinted: bool,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoScene {
    /// Generates the scene's surfaces.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tile: make_tile(),
            sprite: make_sprite(),
            loading: make_loading_banner(),
            frame: 0,
            tinted: false,
        }
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The image shown while the window comes up.
    #[must_use]
    pub fn loading_image(&self) -> &Surface {
        &self.loading
    }

    /// Draws one frame. Does not flip.
    pub fn draw<B: DisplayBackend>(&mut self, renderer: &mut Renderer<B>) {
        let width = renderer.screen_width() as i32;
        let height = renderer.screen_height() as i32;
        let t = self.frame as i32;

        renderer.clear_screen(Color::DK_BLUE);
        self.draw_stars(renderer, width, height);

        // Two strips scrolling at different speeds
        let top = height - 2 * BAND_HEIGHT as i32;
        let far = -((t / 2) % TILE_WIDTH as i32);
        let near = -(t % TILE_WIDTH as i32);
        renderer.blit_pattern_across(&self.tile, far, top, 0, BAND_HEIGHT as i32);
        renderer.blit_pattern_across(
            &self.tile,
            near,
            top + BAND_HEIGHT as i32,
            BAND_HEIGHT as i32,
            BAND_HEIGHT as i32,
        );

        // Framed panel with a sweeping line
        let panel = Rect::new(16, 16, width / 2 - 24, height / 2 - 24);
        renderer.fill_rect_at(panel, Color::rgb(0x10, 0x10, 0x40));
        renderer.draw_rect_at(panel, Color::WHITE);
        let (px2, py2) = panel.last_corner();
        let sweep = panel.x + (t % panel.w.max(1));
        renderer.draw_line(panel.x, py2, sweep, panel.y, Color::rgb(0xFF, 0xD0, 0x40));
        renderer.draw_line(px2, py2, sweep, panel.y, Color::rgb(0x40, 0xD0, 0xFF));

        // Sprite bouncing inside a clip window
        let window = Rect::new(width / 2 + 8, 16, width / 2 - 24, height / 2 - 24);
        renderer.draw_rect_at(
            Rect::new(window.x - 1, window.y - 1, window.w + 2, window.h + 2),
            Color::rgb(0x80, 0x80, 0x80),
        );
        renderer.set_clip_rect(window);
        let travel = window.w + self.sprite.width() as i32;
        let sx = window.x - self.sprite.width() as i32 + (t % travel.max(1));
        let sy = window.y + window.h / 2 - self.sprite.height() as i32 / 2;
        renderer.draw_surface(&self.sprite, sx, sy);
        renderer.clear_clip();

        if self.tinted {
            renderer.tint_screen();
        }
        self.frame += 1;
    }

    fn draw_stars<B: DisplayBackend>(&self, renderer: &mut Renderer<B>, width: i32, height: i32) {
        let field = (width * height).max(1) as u32;
        for i in 0..STAR_COUNT {
            // Cheap integer hash spreads stars deterministically
            let h = i.wrapping_mul(2_654_435_761) % field;
            let x = (h % width.max(1) as u32) as i32;
            let y = (h / width.max(1) as u32) as i32;
            let twinkle = ((self.frame as u32 + i * 7) % 32) < 24;
            if twinkle {
                renderer.draw_pixel_rgb(x, y, 0xC0, 0xC0, 0xFF);
            }
        }
    }
}

/// Two stacked bands: a brick row and a grass row.
fn make_tile() -> Surface {
    let mut tile = Surface::new(TILE_WIDTH, BAND_HEIGHT * 2);
    let band = BAND_HEIGHT as i32;
    tile.fill_rect(Rect::new(0, 0, TILE_WIDTH as i32, band), Color::rgb(0x80, 0x30, 0x20));
    tile.fill_rect(Rect::new(0, band - 1, TILE_WIDTH as i32, 1), Color::rgb(0x40, 0x18, 0x10));
    tile.fill_rect(Rect::new(TILE_WIDTH as i32 / 2, 0, 1, band), Color::rgb(0x40, 0x18, 0x10));
    tile.fill_rect(Rect::new(0, band, TILE_WIDTH as i32, band), Color::rgb(0x20, 0x80, 0x30));
    for x in (0..TILE_WIDTH as i32).step_by(4) {
        tile.set_pixel(x, band, Color::rgb(0x60, 0xC0, 0x60));
    }
    tile
}

/// A 16x16 ring with a transparent center.
fn make_sprite() -> Surface {
    let mut sprite = Surface::new(16, 16);
    for y in 0..16 {
        for x in 0..16 {
            let (dx, dy) = (x * 2 - 15, y * 2 - 15);
            let d = dx * dx + dy * dy;
            if (100..=225).contains(&d) {
                sprite.set_pixel(x, y, Color::rgb(0xFF, 0x60, 0x60));
            } else if d < 100 {
                sprite.set_pixel(x, y, Color::rgba(0xFF, 0xFF, 0xFF, 0x40));
            }
        }
    }
    sprite
}

/// A plain progress-bar banner.
fn make_loading_banner() -> Surface {
    let mut banner = Surface::filled(96, 12, Color::rgb(0x20, 0x20, 0x20));
    banner.fill_rect(Rect::new(2, 2, 92, 8), Color::rgb(0xE0, 0xE0, 0xE0));
    banner.fill_rect(Rect::new(3, 3, 60, 6), Color::rgb(0x30, 0x60, 0xE0));
    banner
}
