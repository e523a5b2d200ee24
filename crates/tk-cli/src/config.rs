//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `strftime` format for entry start and end times.
    pub timestamp_format: String,

    /// Show durations as `01:02:03` instead of `1h 2m 3s`.
    pub timestamp_durations: bool,

    /// Also show durations as decimal hours (`1.03h`).
    pub show_decimal_hours: bool,

    /// List newer entries first.
    pub reverse_segment_order: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timestamp_format: "%y-%m-%d %H:%M:%S".to_string(),
            timestamp_durations: false,
            show_decimal_hours: false,
            reverse_segment_order: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TK_*)
        figment = figment.merge(Env::prefixed("TK_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tk.
///
/// On Linux: `~/.config/tk`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tk"))
}
