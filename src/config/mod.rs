//! Tool configuration from `pipit.toml`.
//!
//! The config file is optional: the tool runs with defaults when none is
//! found, and every value can be overridden from the command line.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[assets]` | Sprite directory (relative to the config file) |
//! | `[shrink]` | Maximum bounding dimension                     |
//! | `[nobg]`   | Whiteness threshold and target file list       |

mod error;

pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Sprite filenames the nobg batch targets when none are given.
const DEFAULT_NOBG_FILES: &[&str] = &[
    "egg.png",
    "cracked.png",
    "baby.png",
    "adult.png",
    "adult_cap.png",
    "adult_crown.png",
    "adult_shades.png",
];

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pipit.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipitConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Root directory for relative paths - parent of config file, or cwd
    /// when running without one (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Sprite directory settings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Resizer settings
    #[serde(default)]
    pub shrink: ShrinkConfig,

    /// Background remover settings
    #[serde(default)]
    pub nobg: NobgConfig,
}

/// `[assets]` section
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Sprite directory, resolved against the project root when relative
    #[serde(default = "AssetsConfig::default_dir")]
    pub dir: PathBuf,
}

impl AssetsConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("src/assets/pipi")
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

/// `[shrink]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ShrinkConfig {
    /// Maximum bounding dimension in pixels
    #[serde(default = "ShrinkConfig::default_max_size")]
    pub max_size: u32,
}

impl ShrinkConfig {
    fn default_max_size() -> u32 {
        600
    }
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            max_size: Self::default_max_size(),
        }
    }
}

/// `[nobg]` section
#[derive(Debug, Clone, Deserialize)]
pub struct NobgConfig {
    /// Channel value above which a pixel counts as near-white (of 255)
    #[serde(default = "NobgConfig::default_threshold")]
    pub threshold: u8,

    /// Filenames to process, resolved against the sprite directory
    #[serde(default = "NobgConfig::default_files")]
    pub files: Vec<String>,
}

impl NobgConfig {
    fn default_threshold() -> u8 {
        crate::image::background::DEFAULT_THRESHOLD
    }

    fn default_files() -> Vec<String> {
        DEFAULT_NOBG_FILES.iter().map(ToString::to_string).collect()
    }
}

impl Default for NobgConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            files: Self::default_files(),
        }
    }
}

// ============================================================================
// loading
// ============================================================================

impl PipitConfig {
    /// Load configuration: find pipit.toml by upward search, fall back to
    /// defaults when absent, then apply CLI overrides and validate.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        crate::logger::set_verbose(cli.verbose);

        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path
                    .parent()
                    .map_or_else(|| cwd.clone(), Path::to_path_buf);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                let mut config = Self::default();
                config.config_path = cwd.join(&cli.config);
                config.root = cwd;
                config
            }
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Apply CLI overrides on top of file values.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.dir {
            self.assets.dir = dir.clone();
        }

        match &cli.command {
            Commands::Shrink { max_size } => {
                if let Some(max_size) = max_size {
                    self.shrink.max_size = *max_size;
                }
            }
            Commands::Nobg { files, threshold } => {
                if let Some(threshold) = threshold {
                    self.nobg.threshold = *threshold;
                }
                if !files.is_empty() {
                    self.nobg.files = files.clone();
                }
            }
        }
    }

    /// Validate resolved values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.shrink.max_size == 0 {
            return Err(ConfigError::Validation(
                "shrink.max_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Absolute sprite directory.
    pub fn asset_dir(&self) -> PathBuf {
        if self.assets.dir.is_absolute() {
            self.assets.dir.clone()
        } else {
            self.root.join(&self.assets.dir)
        }
    }
}

/// Print warning about unknown fields.
fn print_unknown_fields_warning(fields: &[String], path: &Path) {
    let display_path = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    log!("warning"; "unknown fields in {}, ignoring:", display_path);
    for field in fields {
        eprintln!("- {field}");
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
