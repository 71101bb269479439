//! # NXE Render
//!
//! Immediate-mode 2D renderer facade.
//!
//! This crate provides:
//! - `Renderer`: drawing primitives, clipping, flip and resolution switching
//! - `Surface`: RGBA pixel buffers used as blit sources and as the canvas
//! - The resolution table and desktop mode derivation
//! - Clip math for blit rectangle pairs
//! - `DisplayBackend`: the window seam, with an in-memory `HeadlessBackend`
//! - `FramePresenter`: wgpu pipeline that shows a canvas in a window
//!
//! ## Coordinates
//!
//! Drawing calls use base pixels (320x240 at the default resolution).
//! The canvas is `scale` times larger and every base pixel becomes a
//! `scale` x `scale` block, so changing resolution never changes what
//! callers pass in.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod clip;
pub mod present;
pub mod renderer;
pub mod resolution;
pub mod surface;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backend::*;
    pub use crate::present::*;
    pub use crate::renderer::*;
    pub use crate::resolution::*;
    pub use crate::surface::*;
    pub use nxe_common::{Color, Rect, RenderError, RenderResult};
}

pub use prelude::*;
