//! Windowless rendering.
//!
//! Runs the demo scene against `HeadlessBackend` for a fixed number of
//! frames, optionally saving the last frame as a PNG.

use std::path::Path;

use anyhow::{Context, Result};
use nxe_render::{HeadlessBackend, Renderer};
use tracing::info;

use crate::config::EngineConfig;
use crate::demo::DemoScene;

/// Display size reported to the renderer when there is no monitor.
pub const HEADLESS_DESKTOP: (u32, u32) = (1920, 1080);

/// Renders `frames` frames and returns the renderer for inspection.
pub fn run(
    config: &EngineConfig,
    frames: u32,
    screenshot: Option<&Path>,
) -> Result<Renderer<HeadlessBackend>> {
    let backend = HeadlessBackend::new().with_desktop(HEADLESS_DESKTOP.0, HEADLESS_DESKTOP.1);
    let mut renderer = Renderer::new(backend).with_title(config.window_title.clone());
    renderer
        .init(config.resolution_index())
        .with_context(|| format!("Failed to initialize at {}", config.resolution))?;

    let mut scene = DemoScene::new();
    renderer
        .show_loading_screen(scene.loading_image())
        .context("Failed to show loading screen")?;

    for _ in 0..frames {
        scene.draw(&mut renderer);
        renderer.flip().context("Failed to present frame")?;
    }
    info!(
        "Rendered {} frames at {}x{} (scale {})",
        scene.frame(),
        renderer.screen_width(),
        renderer.screen_height(),
        renderer.scale()
    );

    if let Some(path) = screenshot {
        let frame = renderer
            .backend()
            .last_frame()
            .cloned()
            .unwrap_or_else(|| renderer.screenshot());
        frame
            .save_png(path)
            .with_context(|| format!("Failed to save screenshot to {}", path.display()))?;
    }

    renderer.close();
    Ok(renderer)
}
