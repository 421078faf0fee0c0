//! Configuration handling for the registration form

use crate::state::ValidationMode;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default zip-code lookup host
pub const DEFAULT_LOOKUP_URL: &str = "https://brasilapi.com.br";

/// Default registration endpoint
pub const DEFAULT_REGISTER_URL: &str = "https://apis.codante.io/api/register-user/register";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// How masked fields are written into the submission payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// As displayed, e.g. `(11) 98765-4321`
    #[default]
    Masked,
    /// Digits only, e.g. `11987654321`
    Canonical,
}

/// User configuration for the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Base URL of the zip-code lookup service
    pub lookup_base_url: String,
    /// Full URL of the registration endpoint
    pub registration_url: String,
    /// Per-request timeout
    pub request_timeout_ms: u64,
    pub validation_mode: ValidationMode,
    pub payload_format: PayloadFormat,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            lookup_base_url: DEFAULT_LOOKUP_URL.to_string(),
            registration_url: DEFAULT_REGISTER_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            validation_mode: ValidationMode::default(),
            payload_format: PayloadFormat::default(),
        }
    }
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "cadastro", "cadastro-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                tracing::debug!("Loaded config from {}", path.display());
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        config.apply_overrides(
            std::env::var("CADASTRO_LOOKUP_URL").ok(),
            std::env::var("CADASTRO_REGISTER_URL").ok(),
        );
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: Option<String>, register: Option<String>) {
        if let Some(url) = lookup.filter(|u| !u.is_empty()) {
            self.lookup_base_url = url;
        }
        if let Some(url) = register.filter(|u| !u.is_empty()) {
            self.registration_url = url;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
