use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const SETTINGS_FILE: &str = "simplify.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub download_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            download_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid service url {url:?}: {source}")]
    InvalidServiceUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("service url {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// Defaults, then `simplify.toml` in the working directory, then the
/// process environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("service_url") {
                    settings.service_url = v.clone();
                }
                if let Some(v) = file_cfg.get("download_dir") {
                    settings.download_dir = PathBuf::from(v);
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("SIMPLIFY_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = env("SIMPLIFY_DOWNLOAD_DIR") {
        settings.download_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__DOWNLOAD_DIR") {
        settings.download_dir = PathBuf::from(v);
    }

    settings
}

pub fn normalize_service_url(raw_service_url: &str) -> Result<String, ConfigError> {
    let trimmed = raw_service_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_SERVICE_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidServiceUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
