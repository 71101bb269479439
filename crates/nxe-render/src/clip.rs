//! Clip rectangle math for blits and lines.
//!
//! A blit is described by a source rectangle (in source pixels) and a
//! destination rectangle (in canvas pixels). Clipping trims the
//! destination to the clip rectangle and moves the source by the same
//! amount so the visible part of the image stays put.
//!
//! Coordinates may be anywhere in the `i32` range; intermediate values are
//! widened or saturated so extreme input clips instead of overflowing.

use nxe_common::{saturate, Rect};

/// Clips a blit pair whose source and destination share units.
#[must_use]
pub fn clip(clip_rect: Rect, src: Rect, dst: Rect) -> (Rect, Rect) {
    clip_scaled(clip_rect, 1, src, dst)
}

/// Clips a blit pair whose destination is `scale` times the source.
///
/// `clip_rect` is in base pixels and is magnified before use. When
/// nothing remains both rectangles collapse to zero size.
#[must_use]
pub fn clip_scaled(clip_rect: Rect, scale: i32, src: Rect, dst: Rect) -> (Rect, Rect) {
    let scale = i64::from(scale.max(1));
    let clip_x = i64::from(clip_rect.x) * scale;
    let clip_y = i64::from(clip_rect.y) * scale;
    let clip_right = clip_x + i64::from(clip_rect.w) * scale;
    let clip_bottom = clip_y + i64::from(clip_rect.h) * scale;

    let (mut x, mut y) = (i64::from(dst.x), i64::from(dst.y));
    let (mut w, mut h) = (i64::from(dst.w), i64::from(dst.h));
    let (mut src_x, mut src_y) = (i64::from(src.x), i64::from(src.y));

    let dx = clip_x - x;
    if dx > 0 {
        w -= dx;
        x += dx;
        src_x += dx / scale;
    }
    let dy = clip_y - y;
    if dy > 0 {
        h -= dy;
        y += dy;
        src_y += dy / scale;
    }

    let dx = x + w - clip_right;
    if dx > 0 {
        w -= dx;
    }
    let dy = y + h - clip_bottom;
    if dy > 0 {
        h -= dy;
    }

    if w > 0 && h > 0 {
        (
            Rect::new(saturate(src_x), saturate(src_y), saturate(w / scale), saturate(h / scale)),
            Rect::new(saturate(x), saturate(y), saturate(w), saturate(h)),
        )
    } else {
        (
            Rect::new(saturate(src_x), saturate(src_y), 0, 0),
            Rect::new(saturate(x), saturate(y), 0, 0),
        )
    }
}

/// Clamps a source rectangle to the surface it reads from.
///
/// Returns the clamped source and the destination origin shifted by the
/// amount trimmed from the left and top, in destination units.
#[must_use]
pub fn clamp_source(bounds: Rect, src: Rect, dst_x: i32, dst_y: i32, scale: i32) -> (Rect, i32, i32) {
    let scale = i64::from(scale.max(1));
    match src.intersect(&bounds) {
        Some(clamped) => {
            let shift_x = (i64::from(clamped.x) - i64::from(src.x)) * scale;
            let shift_y = (i64::from(clamped.y) - i64::from(src.y)) * scale;
            (
                clamped,
                saturate(i64::from(dst_x) + shift_x),
                saturate(i64::from(dst_y) + shift_y),
            )
        },
        None => (Rect::new(src.x, src.y, 0, 0), dst_x, dst_y),
    }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Clips the segment between two inclusive endpoints to `clip_rect`.
///
/// Returns the visible part, or `None` when the segment misses the
/// rectangle entirely (Cohen-Sutherland).
#[must_use]
pub fn clip_line(clip_rect: Rect, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
    if clip_rect.is_empty() {
        return None;
    }
    let (min_x, min_y) = (i64::from(clip_rect.x), i64::from(clip_rect.y));
    let max_x = min_x + i64::from(clip_rect.w) - 1;
    let max_y = min_y + i64::from(clip_rect.h) - 1;

    let outcode = |x: i64, y: i64| {
        let mut code = INSIDE;
        if x < min_x {
            code |= LEFT;
        } else if x > max_x {
            code |= RIGHT;
        }
        if y < min_y {
            code |= TOP;
        } else if y > max_y {
            code |= BOTTOM;
        }
        code
    };

    let (mut ax, mut ay) = (i64::from(x1), i64::from(y1));
    let (mut bx, mut by) = (i64::from(x2), i64::from(y2));
    let mut code_a = outcode(ax, ay);
    let mut code_b = outcode(bx, by);

    // each pass moves one endpoint onto a clip edge
    for _ in 0..8 {
        if code_a | code_b == INSIDE {
            return Some((ax as i32, ay as i32, bx as i32, by as i32));
        }
        if code_a & code_b != INSIDE {
            return None;
        }

        let code = if code_a == INSIDE { code_b } else { code_a };
        let (x, y) = if code & TOP != 0 {
            (along(ax, bx - ax, min_y - ay, by - ay), min_y)
        } else if code & BOTTOM != 0 {
            (along(ax, bx - ax, max_y - ay, by - ay), max_y)
        } else if code & LEFT != 0 {
            (min_x, along(ay, by - ay, min_x - ax, bx - ax))
        } else {
            (max_x, along(ay, by - ay, max_x - ax, bx - ax))
        };

        if code == code_a {
            (ax, ay) = (x, y);
            code_a = outcode(ax, ay);
        } else {
            (bx, by) = (x, y);
            code_b = outcode(bx, by);
        }
    }
    None
}

/// `start + delta * num / den`, exact for any `i32`-derived inputs.
fn along(start: i64, delta: i64, num: i64, den: i64) -> i64 {
    start + (i128::from(delta) * i128::from(num) / i128::from(den)) as i64
}
