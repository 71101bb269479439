//! # NXE Common
//!
//! Shared value types for the NXE renderer.
//!
//! This crate provides the small types every other crate speaks:
//! - `Color`: 8-bit RGBA color with the renderer's named constants
//! - `Rect`: signed integer rectangle used for clipping and blits
//! - `RenderError`: error taxonomy for renderer and backend operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod error;
pub mod rect;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::*;
    pub use crate::error::*;
    pub use crate::rect::*;
}

pub use prelude::*;
