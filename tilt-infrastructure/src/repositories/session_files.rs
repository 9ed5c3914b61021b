use std::path::Path;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tokio::fs;

use tilt_domain::{Session, SessionEvent, SessionMetrics, SessionRepository};

/// Reads sessions from JSON files: either one array of events or JSON Lines
/// with one event per line.
#[derive(Debug, Default)]
pub struct SessionFileRepository;

impl SessionFileRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionRepository for SessionFileRepository {
    async fn load_session(&self, path: &str) -> anyhow::Result<Session> {
        let content = read_existing(path).await?;
        let events = parse_events(&content).with_context(|| format!("invalid session file {path}"))?;
        Ok(Session::sorted(events))
    }

    async fn load_metrics(&self, path: &str) -> anyhow::Result<SessionMetrics> {
        let content = read_existing(path).await?;
        let metrics = serde_json::from_str(&content).with_context(|| format!("invalid metrics file {path}"))?;
        Ok(metrics)
    }
}

async fn read_existing(path: &str) -> anyhow::Result<String> {
    if !Path::new(path).exists() {
        return Err(anyhow!("{path} does not exist"));
    }
    Ok(fs::read_to_string(path).await?)
}

pub fn parse_events(content: &str) -> anyhow::Result<Vec<SessionEvent>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<SessionEvent>(line).map_err(|err| anyhow!("line {}: {}", index + 1, err))
        })
        .collect()
}
