use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::transition::TransitionKind;
use crate::theme::ThemeMode;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "hackdeck";

pub const KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.transition",
    "defaults.start_slide",
    "defaults.assets_dir",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,

    /// 1-indexed slide to open on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `hackdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# hackdeck configuration\n{yaml}");
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                if ThemeMode::from_name(value).is_none() {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.transition" => {
                if TransitionKind::from_name(value).is_none() {
                    anyhow::bail!(
                        "Invalid transition: {value}. Must be 'slide', 'fade', or 'none'."
                    );
                }
                defaults.transition = Some(value.to_string());
            }
            "defaults.start_slide" => match value.parse::<usize>() {
                Ok(n) if n >= 1 => defaults.start_slide = Some(n),
                _ => anyhow::bail!("Invalid start_slide: {value}. Must be a slide number (1 or more)."),
            },
            "defaults.assets_dir" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Invalid assets_dir: must not be empty.");
                }
                defaults.assets_dir = Some(PathBuf::from(value));
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    pub fn theme(&self) -> Option<ThemeMode> {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .and_then(ThemeMode::from_name)
    }

    pub fn transition(&self) -> Option<TransitionKind> {
        self.defaults
            .as_ref()
            .and_then(|d| d.transition.as_deref())
            .and_then(TransitionKind::from_name)
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn assets_dir(&self) -> Option<&Path> {
        self.defaults.as_ref().and_then(|d| d.assets_dir.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("defaults.theme", "light")]
    #[case("defaults.theme", "dark")]
    #[case("defaults.transition", "fade")]
    #[case("defaults.transition", "none")]
    #[case("defaults.start_slide", "11")]
    #[case("defaults.assets_dir", "/srv/deck")]
    fn set_accepts_documented_values(#[case] key: &str, #[case] value: &str) {
        let mut config = Config::default();
        config.set(key, value).unwrap();
        assert!(config.defaults.is_some());
    }

    #[rstest]
    #[case("defaults.theme", "sepia")]
    #[case("defaults.transition", "spatial")]
    #[case("defaults.start_slide", "0")]
    #[case("defaults.start_slide", "first")]
    #[case("defaults.assets_dir", "  ")]
    #[case("defaults.aspect", "16:9")]
    fn set_rejects_invalid_input(#[case] key: &str, #[case] value: &str) {
        let mut config = Config::default();
        assert!(config.set(key, value).is_err());
    }

    #[test]
    fn typed_accessors_read_back_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.transition", "fade").unwrap();
        config.set("defaults.start_slide", "3").unwrap();
        assert_eq!(config.theme(), Some(ThemeMode::Light));
        assert_eq!(config.transition(), Some(TransitionKind::Fade));
        assert_eq!(config.start_slide(), Some(3));
        assert_eq!(config.assets_dir(), None);
    }

    #[test]
    fn file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.assets_dir", "media").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }

    #[test]
    fn empty_config_serializes_without_defaults() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(!yaml.contains("defaults"));
    }
}
