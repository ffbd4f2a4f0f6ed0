//! User configuration for Forensiq.
//!
//! Preferences live in a single TOML file:
//!
//! - System: `~/.config/forensiq/config.toml`
//! - Override: `FQ_CONFIG` environment variable (absolute path)
//!
//! ```toml
//! theme = "dark"            # or "light"
//! output-format = "json"    # or "human"
//!
//! [ticks]
//! upload-ms = 200
//! stage-ms = 800
//! ```
//!
//! Precedence, highest to lowest: CLI flag > config file > built-in
//! default. A missing file is not an error; every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ingest, Result};

/// Environment variable naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "FQ_CONFIG";

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

/// Dashboard color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Tick-interval overrides for the simulated pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TickOverrides {
    pub upload_ms: Option<u64>,
    pub stage_ms: Option<u64>,
}

/// Raw on-disk configuration. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ForensiqConfig {
    pub theme: Option<Theme>,
    pub output_format: Option<OutputFormat>,

    #[serde(default)]
    pub ticks: Option<TickOverrides>,
}

impl ForensiqConfig {
    /// Parse a config file. A missing file yields the empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load from `FQ_CONFIG` if set, else the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }
}

/// Effective config file location.
pub fn config_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(explicit);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("forensiq")
        .join("config.toml")
}

/// Fully resolved settings after precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
    pub output_format: OutputFormat,
    pub upload_tick: Duration,
    pub stage_tick: Duration,
}

impl Settings {
    /// Apply precedence: CLI flag > file > default.
    ///
    /// `human_flag` is the global `-H/--human` CLI switch; it only forces
    /// human output, it never forces JSON.
    pub fn resolve(config: &ForensiqConfig, human_flag: bool) -> Self {
        let output_format = if human_flag {
            OutputFormat::Human
        } else {
            config.output_format.unwrap_or_default()
        };
        let ticks = config.ticks.unwrap_or_default();
        Self {
            theme: config.theme.unwrap_or_default(),
            output_format,
            upload_tick: ticks
                .upload_ms
                .map(Duration::from_millis)
                .unwrap_or(ingest::UPLOAD_TICK),
            stage_tick: ticks
                .stage_ms
                .map(Duration::from_millis)
                .unwrap_or(ingest::STAGE_TICK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ForensiqConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ForensiqConfig::default());

        let settings = Settings::resolve(&config, false);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.upload_tick, ingest::UPLOAD_TICK);
        assert_eq!(settings.stage_tick, ingest::STAGE_TICK);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "theme = \"light\"\noutput-format = \"human\"\n\n[ticks]\nupload-ms = 50\n"
        )
        .unwrap();

        let config = ForensiqConfig::load_from(&path).unwrap();
        let settings = Settings::resolve(&config, false);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.output_format, OutputFormat::Human);
        assert_eq!(settings.upload_tick, Duration::from_millis(50));
        assert_eq!(settings.stage_tick, ingest::STAGE_TICK);
    }

    #[test]
    fn test_cli_flag_outranks_file() {
        let config = ForensiqConfig {
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let settings = Settings::resolve(&config, true);
        assert_eq!(settings.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();
        assert!(ForensiqConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("human"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }
}
