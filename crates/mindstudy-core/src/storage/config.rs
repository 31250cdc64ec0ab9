//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default timer durations and preset
//! - Generation service model ids and thinking budget
//! - Narration settings
//!
//! Configuration is stored at `~/.config/mindstudy/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Timer defaults used when no preset or flags are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    /// Preferred built-in preset name (optional).
    #[serde(default)]
    pub preset: Option<String>,
}

/// Generation service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_plan_model")]
    pub plan_model: String,
    /// Fast model used for search-grounded chat and quick replies.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Token budget forwarded when deep reasoning is requested.
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable the API key is read from.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Narration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindstudy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub narration: NarrationConfig,
}

// Default functions
fn default_study_minutes() -> u64 {
    25
}
fn default_break_minutes() -> u64 {
    5
}
fn default_plan_model() -> String {
    "gemini-3-pro-preview".to_string()
}
fn default_fast_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}
fn default_voice() -> String {
    "Kore".to_string()
}
fn default_thinking_budget() -> u32 {
    32_768
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
            preset: None,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            plan_model: default_plan_model(),
            fast_model: default_fast_model(),
            tts_model: default_tts_model(),
            voice: default_voice(),
            thinking_budget: default_thinking_budget(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            ai: AiConfig::default(),
            narration: NarrationConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/mindstudy"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = get_json_value_by_path(&json, key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the existing type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    value: &'a serde_json::Value,
    path: &str,
) -> Option<&'a serde_json::Value> {
    path.split('.').try_fold(value, |acc, key| acc.get(key))
}

/// Parse `raw` as the same JSON type the key currently holds.
fn set_json_value_by_path(
    root: &mut serde_json::Value,
    path: &str,
    raw: &str,
) -> Result<(), ConfigError> {
    let mut current = root;
    for key in path.split('.') {
        current = current
            .get_mut(key)
            .ok_or_else(|| ConfigError::UnknownKey(path.to_string()))?;
    }
    let parsed = match current {
        serde_json::Value::String(_) => serde_json::Value::String(raw.to_string()),
        serde_json::Value::Bool(_) => {
            let flag = raw.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: path.to_string(),
                message: format!("expected true/false, got '{raw}'"),
            })?;
            serde_json::Value::Bool(flag)
        }
        serde_json::Value::Number(_) => {
            let number = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: path.to_string(),
                message: format!("expected a number, got '{raw}'"),
            })?;
            serde_json::Value::Number(number.into())
        }
        serde_json::Value::Null => serde_json::Value::String(raw.to_string()),
        _ => {
            return Err(ConfigError::InvalidValue {
                key: path.to_string(),
                message: "key does not hold a settable value".to_string(),
            })
        }
    };
    *current = parsed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.study_minutes, 25);
        assert_eq!(parsed.ai.voice, "Kore");
        assert!(parsed.narration.enabled);
    }

    #[test]
    fn empty_toml_fills_every_default() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.timer.break_minutes, 5);
        assert_eq!(parsed.ai.thinking_budget, 32_768);
        assert_eq!(parsed.ai.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn dotted_get() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.study_minutes").unwrap(), "25");
        assert_eq!(cfg.get("ai.voice").unwrap(), "Kore");
        assert!(cfg.get("timer.nope").is_none());
    }

    #[test]
    fn dotted_set_respects_existing_types() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        set_json_value_by_path(&mut json, "timer.study_minutes", "45").unwrap();
        set_json_value_by_path(&mut json, "narration.enabled", "false").unwrap();
        let cfg: Config = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.timer.study_minutes, 45);
        assert!(!cfg.narration.enabled);
    }

    #[test]
    fn dotted_set_rejects_unknown_keys_and_bad_values() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(matches!(
            set_json_value_by_path(&mut json, "timer.nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_json_value_by_path(&mut json, "timer.study_minutes", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
