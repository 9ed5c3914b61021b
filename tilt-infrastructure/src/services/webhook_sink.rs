use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use tilt_domain::{Alert, AlertSink, ChatMessage, RuntimeConfig};

/// Posts each alert as a JSON `ChatMessage` to the configured webhook.
pub struct WebhookAlertSink {
    client: Client,
    url: String,
    token: Option<String>,
}

impl WebhookAlertSink {
    /// Returns `Ok(None)` when no webhook URL is configured.
    pub fn from_config(config: &RuntimeConfig) -> Result<Option<Self>> {
        let Some(url) = config.alert_webhook_url.as_deref().map(str::trim).filter(|url| !url.is_empty()) else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Some(Self {
            client,
            url: url.to_string(),
            token: config.alert_webhook_token.clone(),
        }))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AlertSink for WebhookAlertSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, alert: &Alert) -> Result<()> {
        let mut request = self.client.post(&self.url).json(&ChatMessage::from(alert));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request.send().await?.error_for_status()?;
        Ok(())
    }
}
