//! # NXE Engine
//!
//! Demo host for the NXE renderer.
//!
//! Opens a window, switches to the configured resolution and draws an
//! animated scene through every renderer primitive.
//!
//! Keys: PageUp/PageDown cycle resolutions, F11 toggles fullscreen,
//! Tab toggles the screen tint, F12 saves a screenshot, Escape quits.
//!
//! `--headless <frames>` renders without a window; `--screenshot <path>`
//! saves the last headless frame; `--config <path>` picks a config file.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod demo;
mod headless;
mod timing;
mod window_backend;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "nxe", version, about = "Demo host for the NXE renderer")]
struct Options {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Render this many frames without opening a window
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,

    /// Save the last headless frame as a PNG
    #[arg(long, value_name = "PATH", requires = "headless")]
    screenshot: Option<PathBuf>,
}

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("nxe=info".parse()?)
                .add_directive("nxe_render=info".parse()?),
        )
        .init();

    info!("NXE starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let options = Options::parse();
    let mut config = match &options.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    config.validate();

    match options.headless {
        Some(frames) => {
            headless::run(&config, frames, options.screenshot.as_deref())?;
        },
        None => app::run(config)?,
    }

    info!("NXE shutdown complete");
    Ok(())
}
