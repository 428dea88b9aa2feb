//! Settings resolution for the CLI.
//!
//! Three layers, later ones winning: built-in defaults, the optional TOML
//! settings file, explicit command-line flags.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use meme_zoo_client::{DEFAULT_BASE_URL, DEFAULT_REFRESH_INTERVAL};
use serde::Deserialize;

/// Values parsed from the optional TOML settings file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileSettings {
    /// Base URL of the zoo backend.
    pub(crate) base_url: Option<String>,
    /// Seconds between data refreshes.
    pub(crate) refresh_interval_secs: Option<u64>,
    /// Whether presentation syncs to the display refresh rate.
    pub(crate) vsync: Option<bool>,
    /// Whether the backend prints a frames-per-second line.
    pub(crate) show_fps: Option<bool>,
}

impl FileSettings {
    /// Loads and parses the settings file at the provided path.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }
}

/// Command-line values layered over the file and the defaults.
#[derive(Clone, Debug, Default)]
pub(crate) struct Overrides {
    /// Base URL flag.
    pub(crate) base_url: Option<String>,
    /// Refresh cadence flag.
    pub(crate) refresh_interval_secs: Option<u64>,
    /// Whether vsync was explicitly disabled.
    pub(crate) no_vsync: bool,
    /// Whether the FPS line was explicitly requested.
    pub(crate) show_fps: bool,
}

/// Fully resolved runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Base URL of the zoo backend.
    pub(crate) base_url: String,
    /// Pause between data refreshes.
    pub(crate) refresh_interval: Duration,
    /// Whether presentation syncs to the display refresh rate.
    pub(crate) vsync: bool,
    /// Whether the backend prints a frames-per-second line.
    pub(crate) show_fps: bool,
}

impl Settings {
    /// Resolves the effective settings from the three layers.
    #[must_use]
    pub(crate) fn resolve(overrides: Overrides, file: FileSettings) -> Self {
        let base_url = overrides
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let refresh_interval = overrides
            .refresh_interval_secs
            .or(file.refresh_interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL);
        let vsync = if overrides.no_vsync {
            false
        } else {
            file.vsync.unwrap_or(true)
        };
        let show_fps = overrides.show_fps || file.show_fps.unwrap_or(false);

        Self {
            base_url,
            refresh_interval,
            vsync,
            show_fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_apply_when_no_layer_provides_a_value() {
        let settings = Settings::resolve(Overrides::default(), FileSettings::default());

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.refresh_interval, DEFAULT_REFRESH_INTERVAL);
        assert!(settings.vsync);
        assert!(!settings.show_fps);
    }

    #[test]
    fn file_values_override_the_defaults() {
        let file = FileSettings {
            base_url: Some("http://zoo.example".to_owned()),
            refresh_interval_secs: Some(60),
            vsync: Some(false),
            show_fps: Some(true),
        };

        let settings = Settings::resolve(Overrides::default(), file);

        assert_eq!(settings.base_url, "http://zoo.example");
        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
        assert!(!settings.vsync);
        assert!(settings.show_fps);
    }

    #[test]
    fn explicit_flags_override_the_file() {
        let file = FileSettings {
            base_url: Some("http://zoo.example".to_owned()),
            refresh_interval_secs: Some(60),
            vsync: Some(true),
            show_fps: Some(false),
        };
        let overrides = Overrides {
            base_url: Some("http://other.example".to_owned()),
            refresh_interval_secs: Some(30),
            no_vsync: true,
            show_fps: true,
        };

        let settings = Settings::resolve(overrides, file);

        assert_eq!(settings.base_url, "http://other.example");
        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
        assert!(!settings.vsync);
        assert!(settings.show_fps);
    }

    #[test]
    fn load_parses_a_toml_settings_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(
            file,
            "base_url = \"http://zoo.example\"\nrefresh_interval_secs = 120"
        )
        .expect("settings should be written");

        let parsed = FileSettings::load(file.path()).expect("settings should parse");

        assert_eq!(parsed.base_url.as_deref(), Some("http://zoo.example"));
        assert_eq!(parsed.refresh_interval_secs, Some(120));
        assert!(parsed.vsync.is_none());
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(file, "refresh_minutes = 5").expect("settings should be written");

        assert!(FileSettings::load(file.path()).is_err());
    }
}
