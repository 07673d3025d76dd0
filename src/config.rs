//! Environment configuration
//!
//! Values come from the process environment (a `.env` file is loaded by the
//! binaries before this runs).

use crate::error::AssistantError;
use crate::models::{RiskLevel, SpecializationLevel};
use crate::Result;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub level: SpecializationLevel,
    /// Stop-word file; the built-in list is used when unset
    pub stop_words_path: Option<PathBuf>,
    pub stop_words_language: String,
    pub port: u16,
    pub default_risk_level: RiskLevel,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            level: SpecializationLevel::default(),
            stop_words_path: None,
            stop_words_language: DEFAULT_LANGUAGE.to_string(),
            port: DEFAULT_PORT,
            default_risk_level: RiskLevel::Medium,
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let level = match get("ASSISTANT_LEVEL") {
            Some(raw) => raw.parse()?,
            None => defaults.level,
        };

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AssistantError::ConfigError(format!("invalid port '{}': {}", raw, e))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            level,
            stop_words_path: get("STOPWORDS_PATH").map(PathBuf::from),
            stop_words_language: get("STOPWORDS_LANGUAGE").unwrap_or(defaults.stop_words_language),
            port,
            default_risk_level: get("DEFAULT_RISK_LEVEL")
                .map(|raw| RiskLevel::parse_lenient(&raw))
                .unwrap_or(defaults.default_risk_level),
        })
    }
}
