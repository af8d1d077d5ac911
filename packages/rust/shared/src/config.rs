//! Application configuration for channelscope.
//!
//! User config lives at `~/.channelscope/channelscope.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChannelScopeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "channelscope.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".channelscope";

/// Published-spreadsheet TSV export the dashboard reads by default.
const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTfWtx-JbH9jxS-P6v_TZoAcxsmvccteo_BxtASUpoLxAL7AmFnXoZim5_3umjBh2or6-X20m39Zn9h/pub?output=tsv";

// ---------------------------------------------------------------------------
// Config structs (matching channelscope.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Display settings for charts and detail views.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Filter option universes.
    #[serde(default)]
    pub filters: FilterOptionsConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the tab-separated dataset export.
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Fetch timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[display]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum bars per chart before truncating to the top rows.
    #[serde(default = "default_max_bars")]
    pub max_bars: usize,

    /// Line width used when re-wrapping channel descriptions.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_bars: default_max_bars(),
            wrap_width: default_wrap_width(),
        }
    }
}

fn default_max_bars() -> usize {
    25
}
fn default_wrap_width() -> usize {
    80
}

/// `[filters]` section — the label universes offered by the theme and
/// "about" filters. These are the dataset's curated label sets, not values
/// derived from the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsConfig {
    /// Theme labels.
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,

    /// "About" labels.
    #[serde(default = "default_about")]
    pub about: Vec<String>,
}

impl Default for FilterOptionsConfig {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            about: default_about(),
        }
    }
}

fn default_themes() -> Vec<String> {
    [
        "Вакансии",
        "Дизайн",
        "Карьера",
        "Общее IT",
        "Продакт-менеджмент",
        "Разработка",
        "Стартапы",
        "AI",
        "Софт-скиллы",
        "Бизнес",
        "Data Science",
        "CX / Клиентский опыт",
        "Обучение",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_about() -> Vec<String> {
    [
        "Вакансии",
        "Дизайн",
        "Исследования",
        "Менеджмент",
        "Продукт",
        "Разработка",
        "Обучение",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.channelscope/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ChannelScopeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.channelscope/channelscope.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ChannelScopeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ChannelScopeError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ChannelScopeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ChannelScopeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ChannelScopeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert!(config.source.url.ends_with("output=tsv"));
        assert_eq!(config.display.max_bars, 25);
        assert_eq!(config.display.wrap_width, 80);
        assert_eq!(config.filters.themes.len(), 13);
        assert_eq!(config.filters.about.len(), 7);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
            [source]
            url = "https://example.com/data.tsv"

            [display]
            max_bars = 10
        "#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.url, "https://example.com/data.tsv");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.display.max_bars, 10);
        assert_eq!(config.display.wrap_width, 80);
        assert!(config.filters.themes.contains(&"AI".to_string()));
    }

    #[test]
    fn default_config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&serialized).expect("deserialize");
        assert_eq!(parsed.filters.about, config.filters.about);
        assert_eq!(parsed.source.url, config.source.url);
    }
}
