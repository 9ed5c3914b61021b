// Runtime configuration handed from infrastructure to the application layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub session_path: Option<String>,
    pub check_interval_seconds: u64,
    pub alert_webhook_url: Option<String>,
    pub alert_webhook_token: Option<String>,
    pub alert_channel_capacity: usize,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8001".to_string(),
            api_token: None,
            session_path: None,
            check_interval_seconds: 30,
            alert_webhook_url: None,
            alert_webhook_token: None,
            alert_channel_capacity: 256,
            max_body_bytes: 4 * 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
