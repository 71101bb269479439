//! Engine configuration.
//!
//! Window and display settings, loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use nxe_render::{find_resolution, RESOLUTIONS};

/// Configuration file name.
const CONFIG_FILE: &str = "nxe.toml";

/// Resolution used when the configured one is unknown.
pub const DEFAULT_RESOLUTION: &str = "640x480";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Window Settings ===
    /// Window title
    pub window_title: String,
    /// Resolution table entry, by name ("---" fits the desktop)
    pub resolution: String,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,

    // === Debug Settings ===
    /// Show frames per second in the window title
    pub show_fps: bool,
    /// Directory screenshots are written to
    pub screenshot_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "NXEngine".to_string(),
            resolution: DEFAULT_RESOLUTION.to_string(),
            fullscreen: false,
            vsync: true,
            show_fps: true,
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    fn config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("nxe").join(CONFIG_FILE),
            None => PathBuf::from(CONFIG_FILE),
        }
    }

    /// Replace values that cannot be used.
    pub fn validate(&mut self) {
        if find_resolution(&self.resolution).is_none() {
            warn!(
                "Unknown resolution {:?}, falling back to {DEFAULT_RESOLUTION}",
                self.resolution
            );
            self.resolution = DEFAULT_RESOLUTION.to_string();
        }
        if self.window_title.trim().is_empty() {
            self.window_title = Self::default().window_title;
        }
    }

    /// Table index of the configured resolution.
    #[must_use]
    pub fn resolution_index(&self) -> usize {
        find_resolution(&self.resolution)
            .or_else(|| find_resolution(DEFAULT_RESOLUTION))
            .unwrap_or(1)
    }

    /// Remembers a resolution by index.
    pub fn set_resolution_index(&mut self, index: usize) {
        if let Some(mode) = RESOLUTIONS.get(index) {
            self.resolution = mode.name.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.resolution, "640x480");
        assert!(config.vsync);
        assert!(!config.fullscreen);
        assert_eq!(config.resolution_index(), 2);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig {
            resolution: "999x999".to_string(),
            window_title: "   ".to_string(),
            ..EngineConfig::default()
        };
        config.validate();
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
        assert_eq!(config.window_title, "NXEngine");
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("nxe.toml");

        let mut config = EngineConfig::default();
        config.set_resolution_index(find_resolution("1280x720").unwrap());
        config.fullscreen = true;
        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
        assert_eq!(loaded.resolution, "1280x720");
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/nxe.toml");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nxe.toml");
        fs::write(&path, "resolution = [not toml").unwrap();
        assert_eq!(EngineConfig::load_from(&path), EngineConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: EngineConfig = toml::from_str("vsync = false").unwrap();
        assert!(!config.vsync);
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_set_resolution_index_ignores_unknown() {
        let mut config = EngineConfig::default();
        config.set_resolution_index(500);
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
    }
}
