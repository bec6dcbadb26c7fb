//! netviz configuration loading from `.netvizrc.toml`.
//!
//! Configuration is optional. netviz uses defaults if no config file exists,
//! and command-line flags always win over configured values.
//!
//! # Example Configuration
//!
//! ```toml
//! [store]
//! path = ".netviz/topology.duckdb"
//!
//! [render]
//! resolve = "id"
//! missing_neighbor = "skip"
//!
//! [output]
//! format = "svg"
//! color = false
//! ```

use netviz_core::{MissingNeighborPolicy, NeighborResolution, RenderOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".netvizrc.toml";

/// Store location used when neither `--db` nor `[store].path` is given.
pub const DEFAULT_STORE_PATH: &str = ".netviz/topology.duckdb";

/// Root configuration structure loaded from `.netvizrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct NetvizConfig {
    /// Topology store location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Rendering defaults.
    #[serde(default)]
    pub render: RenderConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    /// Path to the DuckDB file, relative to the working directory.
    #[serde(default)]
    pub path: Option<String>,
}

/// Rendering defaults, overridden by `--resolve` and `--on-missing-neighbor`.
#[derive(Debug, Deserialize, Default)]
pub struct RenderConfig {
    /// How neighbor references name their targets: `position` or `id`.
    #[serde(default)]
    pub resolve: Option<NeighborResolution>,

    /// What to do with dangling references: `fail` or `skip`.
    #[serde(default)]
    pub missing_neighbor: Option<MissingNeighborPolicy>,
}

/// Output formatting preferences.
///
/// Distinct from the runtime `OutputConfig` in the output module, which
/// handles actual rendering.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json` or `svg`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output.
    ///
    /// Defaults to `true` when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

impl NetvizConfig {
    /// Load configuration from `.netvizrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Store path from config, or the default location.
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(
            self.store
                .path
                .as_deref()
                .unwrap_or(DEFAULT_STORE_PATH),
        )
    }

    /// Render options with CLI flags taking precedence over config values.
    pub fn render_options(
        &self,
        resolve: Option<NeighborResolution>,
        missing_neighbor: Option<MissingNeighborPolicy>,
    ) -> RenderOptions {
        RenderOptions::default()
            .with_resolution(resolve.or(self.render.resolve).unwrap_or_default())
            .with_missing_neighbor(
                missing_neighbor
                    .or(self.render.missing_neighbor)
                    .unwrap_or_default(),
            )
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured color preference, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
