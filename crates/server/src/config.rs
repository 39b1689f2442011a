use std::{collections::HashMap, path::Path};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub max_upload_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".into(),
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".into(),
            gemini_base_url: "https://generativelanguage.googleapis.com".into(),
            max_upload_bytes: 10 * 1024 * 1024,
            request_timeout_secs: 60,
        }
    }
}

impl Settings {
    pub fn api_key(&self) -> anyhow::Result<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .context("API key not found. Set GOOGLE_API_KEY or APP__GEMINI_API_KEY.")
    }
}

/// Defaults, then `server.toml`, then `APP__*` variables. `GOOGLE_API_KEY` and
/// `SERVER_BIND` are honoured when their `APP__` counterparts are absent.
pub fn load_settings() -> anyhow::Result<Settings> {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_settings_from(Path::new(SETTINGS_FILE), &env)
}

pub(crate) fn load_settings_from(
    file: &Path,
    env: &HashMap<String, String>,
) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let mut builder = Config::builder()
        .set_default("bind_addr", defaults.bind_addr)?
        .set_default("gemini_model", defaults.gemini_model)?
        .set_default("gemini_base_url", defaults.gemini_base_url)?
        .set_default("max_upload_bytes", defaults.max_upload_bytes as u64)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs)?
        .add_source(File::from(file).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

    for (conventional, key) in [
        ("GOOGLE_API_KEY", "gemini_api_key"),
        ("SERVER_BIND", "bind_addr"),
    ] {
        let prefixed = format!("APP__{}", key.to_ascii_uppercase());
        if env.contains_key(&prefixed) {
            continue;
        }
        if let Some(value) = env.get(conventional) {
            builder = builder.set_override(key, value.as_str())?;
        }
    }

    builder
        .build()
        .with_context(|| format!("failed to read settings from '{}'", file.display()))?
        .try_deserialize()
        .context("invalid server settings")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
