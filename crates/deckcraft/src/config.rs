use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::deck::{Layout, Template, Transition};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "deckcraft";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Template applied to freshly created slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Layout used by the Add Slide command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Transition applied to freshly created slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,

    /// "first" or a 1-based slide number to select at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<String>,
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
                anyhow::anyhow!("No config found. Run `deckcraft config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# DeckCraft configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.template" => {
                if Template::from_name(value).is_none() {
                    anyhow::bail!(
                        "Invalid template: {value}. Must be one of: default, blue, dark, green, orange, purple."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .template = Some(value.to_string());
            }
            "defaults.layout" => {
                if Layout::from_name(value).is_none() {
                    anyhow::bail!(
                        "Invalid layout: {value}. Must be one of: title, content, two-column, image, blank."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .layout = Some(value.to_string());
            }
            "defaults.transition" => {
                if Transition::from_name(value).is_none() {
                    anyhow::bail!(
                        "Invalid transition: {value}. Must be one of: none, fade, slide, zoom, flip."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .transition = Some(value.to_string());
            }
            "defaults.start_mode" => {
                if value != "first" && value.parse::<usize>().is_err() {
                    anyhow::bail!(
                        "Invalid start_mode: {value}. Must be 'first' or a slide number."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_mode = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.template, defaults.layout, defaults.transition, defaults.start_mode"
            ),
        }
        Ok(())
    }

    /// Template for new slides, falling back to the built-in default.
    pub fn default_template(&self) -> Template {
        self.defaults
            .as_ref()
            .and_then(|d| d.template.as_deref())
            .and_then(Template::from_name)
            .unwrap_or_default()
    }

    /// Layout for the Add Slide command.
    pub fn default_layout(&self) -> Layout {
        self.defaults
            .as_ref()
            .and_then(|d| d.layout.as_deref())
            .and_then(Layout::from_name)
            .unwrap_or(Layout::Content)
    }

    pub fn default_transition(&self) -> Transition {
        self.defaults
            .as_ref()
            .and_then(|d| d.transition.as_deref())
            .and_then(Transition::from_name)
            .unwrap_or_default()
    }

    /// 0-based start slide resolved from config, if any.
    pub fn start_slide(&self) -> Option<usize> {
        match self.defaults.as_ref()?.start_mode.as_deref()? {
            "first" => Some(0),
            n => n.parse::<usize>().ok().map(|n| n.saturating_sub(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_keys() {
        let mut config = Config::default();
        config.set("defaults.template", "purple").unwrap();
        config.set("defaults.layout", "two-column").unwrap();
        config.set("defaults.transition", "fade").unwrap();
        config.set("defaults.start_mode", "3").unwrap();

        assert_eq!(config.default_template(), Template::Purple);
        assert_eq!(config.default_layout(), Layout::TwoColumn);
        assert_eq!(config.default_transition(), Transition::Fade);
        assert_eq!(config.start_slide(), Some(2));
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.template", "neon").is_err());
        assert!(config.set("defaults.layout", "gallery").is_err());
        assert!(config.set("defaults.transition", "spiral").is_err());
        assert!(config.set("defaults.start_mode", "overview").is_err());
        assert!(config.set("export.format", "svg").is_err());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn test_defaults_without_config() {
        let config = Config::default();
        assert_eq!(config.default_template(), Template::Default);
        assert_eq!(config.default_layout(), Layout::Content);
        assert_eq!(config.default_transition(), Transition::None);
        assert_eq!(config.start_slide(), None);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.set("defaults.template", "dark").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.default_template(), Template::Dark);
    }
}
