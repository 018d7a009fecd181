//! Application Configuration
//!
//! Optional TOML file; every field has a default so an empty or missing
//! file gives the reference behavior.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::services::RetryPolicy;
use crate::application::use_cases::{IconForFileOptions, NATIVE_ICON_SIZE};

/// File name looked up next to the executable and in the working directory
pub const CONFIG_FILE_NAME: &str = "file_to_image.toml";

/// Default substitute image, relative to the installation root
pub const DEFAULT_FALLBACK_IMAGE: &str = "assets/unknown_file.png";

/// Directory containing the running executable
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Root configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub fallback: FallbackConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Shell query retry settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Attempt pairs before giving up (0 is treated as 1)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_backoff_ms() -> u64 {
    20
}

/// Off-screen render settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Native raster resolution for shell icons
    #[serde(default = "default_render_size")]
    pub size: u32,

    /// Take transparency from the mask of icons drawn without alpha
    #[serde(default = "default_true")]
    pub repair_alpha: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: default_render_size(),
            repair_alpha: true,
        }
    }
}

fn default_render_size() -> u32 {
    NATIVE_ICON_SIZE
}

fn default_true() -> bool {
    true
}

/// Substitute image settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Relative paths are resolved against the executable's directory
    #[serde(default = "default_fallback_image")]
    pub image: PathBuf,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            image: default_fallback_image(),
        }
    }
}

fn default_fallback_image() -> PathBuf {
    PathBuf::from(DEFAULT_FALLBACK_IMAGE)
}

/// Logging settings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file; nothing is logged to a file when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A config file that was found but could not be used
#[derive(Error, Debug)]
#[error("Ignoring config {}: {}", .path.display(), .error)]
pub struct IgnoredConfig {
    pub path: PathBuf,
    pub error: ConfigError,
}

impl Config {
    /// Find the config file in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("file_to_image").join("config.toml")),
            Some(exe_dir().join(CONFIG_FILE_NAME)),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load from the first standard location, returning defaults if there is
    /// none or it cannot be read. Runs before logging is set up, so an
    /// unusable file is handed back for the caller to report.
    pub fn load() -> (Self, Option<IgnoredConfig>) {
        Self::load_or_default(Self::find_config_path())
    }

    fn load_or_default(path: Option<PathBuf>) -> (Self, Option<IgnoredConfig>) {
        let Some(path) = path else {
            return (Self::default(), None);
        };
        match Self::load_from_path(&path) {
            Ok(config) => (config, None),
            Err(error) => (Self::default(), Some(IgnoredConfig { path, error })),
        }
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.resolver.max_attempts,
            Duration::from_millis(self.resolver.backoff_ms),
        )
    }

    /// Fallback image path, resolved against `root` when relative
    pub fn fallback_image_in(&self, root: &Path) -> PathBuf {
        if self.fallback.image.is_absolute() {
            self.fallback.image.clone()
        } else {
            root.join(&self.fallback.image)
        }
    }

    /// Fallback image path resolved against the installation root
    pub fn fallback_image(&self) -> PathBuf {
        self.fallback_image_in(&exe_dir())
    }

    /// Options for the default-icon use case
    pub fn icon_for_file_options(&self) -> IconForFileOptions {
        IconForFileOptions {
            retry: self.retry_policy(),
            render_size: self.render.size.max(1),
            repair_alpha: self.render.repair_alpha,
            fallback_image: self.fallback_image(),
        }
    }
}
