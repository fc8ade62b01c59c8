//! TOML-based application configuration.
//!
//! Stores:
//! - Prediction service endpoint, label field and timeout
//! - Text-reveal pacing and texts
//! - Scaled-question default and an optional custom question manifest
//!
//! Configuration is stored at `~/.config/mobirec/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::{ConfigError, QuestionnaireError, Result as CoreResult};
use crate::prediction::HttpPredictor;
use crate::questionnaire::{Question, Questionnaire, DEFAULT_SCALED_VALUE};
use crate::wizard::{
    WizardController, WizardTexts, DEFAULT_RESULT_PREFIX, DEFAULT_REVEAL_DELAY, DEFAULT_WELCOME_TEXT,
};

/// Prediction service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Response field holding the recommendation label.
    #[serde(default = "default_label_field")]
    pub label_field: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Text-reveal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_welcome_text")]
    pub welcome_text: String,
    #[serde(default = "default_result_prefix")]
    pub result_prefix: String,
}

/// Question manifest configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireConfig {
    #[serde(default = "default_scaled_value")]
    pub scaled_default: u8,
    /// Custom manifest; the built-in one is used when empty.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mobirec/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub questionnaire: QuestionnaireConfig,
}

// Default functions
fn default_endpoint() -> String {
    "https://flask-server-qurj.onrender.com/predict".into()
}
fn default_label_field() -> String {
    "Mobile Payment Application".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_delay_ms() -> u64 {
    DEFAULT_REVEAL_DELAY.as_millis() as u64
}
fn default_welcome_text() -> String {
    DEFAULT_WELCOME_TEXT.into()
}
fn default_result_prefix() -> String {
    DEFAULT_RESULT_PREFIX.into()
}
fn default_scaled_value() -> u8 {
    DEFAULT_SCALED_VALUE
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            label_field: default_label_field(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: default_delay_ms(),
            welcome_text: default_welcome_text(),
            result_prefix: default_result_prefix(),
        }
    }
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            scaled_default: default_scaled_value(),
            questions: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prediction: PredictionConfig::default(),
            reveal: RevealConfig::default(),
            questionnaire: QuestionnaireConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Change a value in memory. The result must still validate.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save. Unknown keys and invalid values are
    /// rejected before anything is written.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = url::Url::parse(&self.prediction.endpoint).map_err(|e| {
            ConfigError::InvalidValue {
                key: "prediction.endpoint".into(),
                message: e.to_string(),
            }
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "prediction.endpoint".into(),
                message: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }
        if self.prediction.label_field.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "prediction.label_field".into(),
                message: "must not be empty".into(),
            });
        }
        self.questionnaire()
            .map_err(|e| ConfigError::InvalidValue {
                key: "questionnaire".into(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// The configured manifest, or the built-in one.
    pub fn questionnaire(&self) -> Result<Questionnaire, QuestionnaireError> {
        if self.questionnaire.questions.is_empty() {
            Questionnaire::builtin(self.questionnaire.scaled_default)
        } else {
            Questionnaire::new(self.questionnaire.questions.clone())
        }
    }

    pub fn texts(&self) -> WizardTexts {
        WizardTexts {
            welcome: self.reveal.welcome_text.clone(),
            result_prefix: self.reveal.result_prefix.clone(),
        }
    }

    /// Delay between revealed characters; zero when the effect is disabled.
    pub fn reveal_delay(&self) -> Duration {
        if self.reveal.enabled {
            Duration::from_millis(self.reveal.delay_ms)
        } else {
            Duration::ZERO
        }
    }

    /// A fresh wizard over the configured manifest and texts.
    pub fn build_wizard(&self) -> CoreResult<WizardController> {
        Ok(WizardController::with_texts(self.questionnaire()?, self.texts()))
    }

    pub fn build_predictor(&self) -> CoreResult<HttpPredictor> {
        Ok(HttpPredictor::from_config(&self.prediction)?)
    }

}
