use anyhow::{anyhow, Result};

/// Accepts only absolute `http://` or `https://` URLs with a host part.
pub fn validate_webhook_url(value: &str) -> Result<()> {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| anyhow!("alert_webhook_url must start with http:// or https://"))?;
    if rest.split('/').next().map_or(true, str::is_empty) {
        return Err(anyhow!("alert_webhook_url has no host"));
    }
    Ok(())
}
