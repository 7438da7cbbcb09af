use serde::Deserialize;
use std::path::PathBuf;

use crate::theme::{apply_overrides, Theme, ThemeOverrides};

#[derive(Debug, Clone, Default)]
pub struct AtlasConfig {
    pub theme: Theme,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
}

fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("atlas-diff");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Build a config from the contents of a config file.
fn from_toml(contents: &str) -> Result<AtlasConfig, toml::de::Error> {
    let file: ConfigFile = toml::from_str(contents)?;

    let theme_name = file.theme.as_deref().unwrap_or("atlas");
    let mut theme = Theme::from_name(theme_name);
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut theme, overrides);
    }

    Ok(AtlasConfig { theme })
}

/// Load config from `~/.config/atlas-diff/config.toml`, falling back to defaults.
pub fn load_config() -> AtlasConfig {
    let path = config_path();

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return AtlasConfig::default();
        }
    };

    match from_toml(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            AtlasConfig::default()
        }
    }
}
