use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use toml::{Table, Value};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "captioner.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub asset_base_url: String,
    /// Zero disables the per-request timeout.
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".into(),
            asset_base_url: "http://localhost:3000/".into(),
            request_timeout_secs: 30,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn api_url(&self) -> Result<Url> {
        Url::parse(&self.api_url).with_context(|| format!("invalid api url '{}'", self.api_url))
    }

    pub fn asset_base_url(&self) -> Result<Url> {
        Url::parse(&self.asset_base_url)
            .with_context(|| format!("invalid asset url '{}'", self.asset_base_url))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Reads `path`, or `captioner.toml` in the working directory when no path is given.
///
/// An explicit path must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => Some(raw),
        Err(error) if !required && error.kind() == ErrorKind::NotFound => None,
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    settings_from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}

/// Layers defaults, then the TOML file, then environment variables.
pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: Table = toml::from_str(raw).context("config file is not valid TOML")?;
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = string_value("api_url", v)?;
        }
        if let Some(v) = file_cfg.get("asset_url") {
            settings.asset_base_url = string_value("asset_url", v)?;
        }
        if let Some(v) = file_cfg.get("request_timeout_secs") {
            settings.request_timeout_secs = match v {
                Value::Integer(secs) => u64::try_from(*secs)
                    .map_err(|_| anyhow!("request_timeout_secs must not be negative"))?,
                other => parse_timeout(&string_value("request_timeout_secs", other)?)?,
            };
        }
        if let Some(v) = file_cfg.get("log") {
            settings.log_filter = string_value("log", v)?;
        }
    }

    if let Some(v) = env("CAPTIONER_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("CAPTIONER_ASSET_URL") {
        settings.asset_base_url = v;
    }
    if let Some(v) = env("APP__ASSET_URL") {
        settings.asset_base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_timeout(&v)?;
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG") {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn string_value(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("config key '{key}' must be a string"))
}

fn parse_timeout(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("invalid request timeout '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
