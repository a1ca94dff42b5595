use crate::error::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PRIMARY_URL: &str = "https://translate.googleapis.com";
pub const DEFAULT_SECONDARY_URL: &str = "https://api.mymemory.translated.net";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub default_source_lang: String,
    pub default_target_lang: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub primary_url: String,
    pub secondary_url: String,
    pub history_cap: usize,
    pub saved_words_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_source_lang: "en".to_string(),
            default_target_lang: "hi".to_string(),
            debounce_ms: 800,
            request_timeout_secs: 10,
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            secondary_url: DEFAULT_SECONDARY_URL.to_string(),
            history_cap: 100,
            saved_words_cap: 200,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => config = file_config,
                    Err(e) => tracing::warn!(
                        "Ignoring unreadable config {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }

        config.apply_env();
        Ok(config)
    }

    /// Override fields from `VEDTRANSLATE_*` environment variables.
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("VEDTRANSLATE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(lang) = std::env::var("VEDTRANSLATE_SOURCE_LANG") {
            self.default_source_lang = lang.trim().to_lowercase();
        }
        if let Ok(lang) = std::env::var("VEDTRANSLATE_TARGET_LANG") {
            self.default_target_lang = lang.trim().to_lowercase();
        }
        if let Ok(ms) = std::env::var("VEDTRANSLATE_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse() {
                self.debounce_ms = ms;
            }
        }
        if let Ok(secs) = std::env::var("VEDTRANSLATE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.request_timeout_secs = secs;
            }
        }
        if let Ok(url) = std::env::var("VEDTRANSLATE_PRIMARY_URL") {
            self.primary_url = url;
        }
        if let Ok(url) = std::env::var("VEDTRANSLATE_SECONDARY_URL") {
            self.secondary_url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(TranslateError::Config(
                "debounce_ms must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(TranslateError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.history_cap == 0 || self.saved_words_cap == 0 {
            return Err(TranslateError::Config(
                "History and saved-word caps must be greater than 0".to_string(),
            ));
        }
        if self.default_source_lang == self.default_target_lang {
            return Err(TranslateError::Config(format!(
                "Default source and target languages are both '{}'",
                self.default_source_lang
            )));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()
            .ok_or_else(|| TranslateError::Config("No config directory available".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TranslateError::Config(format!("Failed to encode config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Directory holding the persisted collections, if one can be resolved.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("vedtranslate")))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vedtranslate").join("config.toml"))
    }
}
