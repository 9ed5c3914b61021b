use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use tilt_domain::{DetectionConfig, RuntimeConfig};

use crate::config::validate_webhook_url;

pub const CONFIG_ENV: &str = "TILT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// Session file the periodic agent re-reads on every tick.
    pub session_path: Option<String>,
    pub check_interval_seconds: u64,
    pub alert_webhook_url: Option<String>,
    pub alert_webhook_token: Option<String>,
    pub alert_channel_capacity: usize,
    pub log_dir: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub detection: DetectionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: None,
            session_path: None,
            check_interval_seconds: runtime.check_interval_seconds,
            alert_webhook_url: None,
            alert_webhook_token: None,
            alert_channel_capacity: runtime.alert_channel_capacity,
            log_dir: None,
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
            detection: DetectionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `TILT_CONFIG` (default `./config.toml`).
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content).map_err(|err| anyhow!("invalid {}: {}", path, err))?
        } else {
            warn!(path, "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        normalize_optional(&mut self.api_token);
        normalize_optional(&mut self.session_path);
        normalize_optional(&mut self.alert_webhook_url);
        normalize_optional(&mut self.alert_webhook_token);
        normalize_optional(&mut self.log_dir);
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.session_path = self.session_path.as_deref().map(|path| resolve_path(base, path));
        self.log_dir = self.log_dir.as_deref().map(|path| resolve_path(base, path));
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.check_interval_seconds == 0 {
            return Err(anyhow!("check_interval_seconds must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.alert_channel_capacity == 0 {
            return Err(anyhow!("alert_channel_capacity must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if let Some(url) = &self.alert_webhook_url {
            validate_webhook_url(url)?;
        }
        self.detection
            .validate()
            .map_err(|err| anyhow!("invalid [detection] table: {}", err))?;
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            session_path: self.session_path.clone(),
            check_interval_seconds: self.check_interval_seconds,
            alert_webhook_url: self.alert_webhook_url.clone(),
            alert_webhook_token: self.alert_webhook_token.clone(),
            alert_channel_capacity: self.alert_channel_capacity,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("TILT_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("TILT_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Some(value) = lookup("TILT_SESSION_PATH") {
            self.session_path = Some(value);
        }
        if let Some(value) = lookup("TILT_CHECK_INTERVAL_SECONDS") {
            self.check_interval_seconds = value.parse().unwrap_or(self.check_interval_seconds);
        }
        if let Some(value) = lookup("TILT_ALERT_WEBHOOK_URL") {
            self.alert_webhook_url = Some(value);
        }
        if let Some(value) = lookup("TILT_ALERT_WEBHOOK_TOKEN") {
            self.alert_webhook_token = Some(value);
        }
        if let Some(value) = lookup("TILT_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Some(value) = lookup("TILT_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("TILT_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }

        let rules = &mut self.detection.rules;
        if let Some(value) = lookup("TILT_RAPID_WINDOW_MINUTES") {
            rules.rapid_activity.window_minutes =
                value.parse().unwrap_or(rules.rapid_activity.window_minutes);
        }
        if let Some(value) = lookup("TILT_RAPID_MAX_EVENTS") {
            rules.rapid_activity.max_events = value.parse().unwrap_or(rules.rapid_activity.max_events);
        }
        if let Some(value) = lookup("TILT_DROP_WINDOW_MINUTES") {
            rules.balance_drop.window_minutes =
                value.parse().unwrap_or(rules.balance_drop.window_minutes);
        }
        if let Some(value) = lookup("TILT_DROP_FRACTION") {
            rules.balance_drop.drop_fraction = value.parse().unwrap_or(rules.balance_drop.drop_fraction);
        }
    }
}

fn normalize_optional(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|inner| inner.trim().is_empty()) {
        *value = None;
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
