//! Configuration management
//! Handles loading, saving, and normalizing provider and cache settings

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::translate::cache::DEFAULT_CAPACITY;

/// Environment variable that supplies the provider credential
pub const API_KEY_ENV: &str = "SARVAM_API_KEY";

pub const DEFAULT_API_BASE: &str = "https://api.sarvam.ai/translate";
pub const DEFAULT_MODEL: &str = "sarvam-translate:v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

const APP_DIR: &str = "DprTranslate";

/// Translation register requested from the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationMode {
    #[default]
    Formal,
    ModernColloquial,
    ClassicColloquial,
    CodeMixed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpeakerGender {
    Male,
    Female,
}

/// Remote provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub mode: TranslationMode,
    pub enable_preprocessing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_gender: Option<SpeakerGender>,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            mode: TranslationMode::Formal,
            enable_preprocessing: true,
            speaker_gender: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProviderConfig {
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Maximum cached translations; `None` keeps everything
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> Option<usize> {
    Some(DEFAULT_CAPACITY)
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(APP_DIR);
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Where the language preference and other user choices live
    pub fn preferences_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.json"))
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_key(env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Like [`Config::load`], but an unreadable file or missing config dir falls back to defaults
    pub fn load_or_default() -> Self {
        let mut config = match Self::config_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                tracing::warn!("No config directory, using defaults: {}", e);
                Config::default()
            }
        };
        config.apply_env_key(env::var(API_KEY_ENV).ok());
        config
    }

    /// Load a config file, using defaults when it cannot be read or parsed.
    /// A broken file is left in place for the user to fix.
    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "Failed to load config, using defaults: {}", e);
            Config::default()
        })
    }

    /// Load a config file, writing defaults when it does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = serde_json::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// An environment key only fills in a missing configured key
    pub fn apply_env_key(&mut self, key: Option<String>) {
        if self.provider.has_credential() {
            return;
        }
        if let Some(key) = key {
            let key = key.trim();
            if !key.is_empty() {
                self.provider.api_key = key.to_string();
            }
        }
    }

    pub fn normalize(&mut self) {
        let defaults = ProviderConfig::default();
        let provider = &mut self.provider;
        if provider.api_base.trim().is_empty() {
            provider.api_base = defaults.api_base;
        }
        if provider.model.trim().is_empty() {
            provider.model = defaults.model;
        }
        if provider.timeout_ms == 0 {
            provider.timeout_ms = defaults.timeout_ms;
        }
        provider.api_key = provider.api_key.trim().to_string();

        if self.cache_capacity == Some(0) {
            self.cache_capacity = None;
        }
    }
}
