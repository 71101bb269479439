//! Error types for the NXE renderer.

use thiserror::Error;

/// Errors raised by the renderer and its display backends.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The display window could not be created
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// The window could not be resized to the requested mode
    #[error("Failed to resize window to {width}x{height}: {reason}")]
    Resize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Backend-provided reason
        reason: String,
    },

    /// A frame could not be presented
    #[error("Present failed: {0}")]
    Present(String),

    /// An operation required an open window
    #[error("Renderer not initialized")]
    NotInitialized,

    /// Resolution index outside the table
    #[error("Unknown resolution index {0}")]
    UnknownResolution(usize),

    /// Resolution exists but is not usable on this display
    #[error("Resolution {0} is disabled")]
    ResolutionDisabled(String),

    /// Pixel data does not match the declared dimensions
    #[error("Invalid surface: {width}x{height} needs {expected} bytes, got {len}")]
    InvalidSurface {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Required byte length
        expected: usize,
        /// Actual byte length
        len: usize,
    },

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
