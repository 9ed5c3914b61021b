use tracing::info;

use tilt_domain::DetectionConfig;

use crate::{AppError, AppState};

/// Validates and installs a new active detection configuration.
pub async fn update_detection_config(
    state: &AppState,
    config: DetectionConfig,
) -> Result<DetectionConfig, AppError> {
    config.validate()?;
    *state.detection.write().await = config;
    info!(
        rapid_window_minutes = config.rules.rapid_activity.window_minutes,
        rapid_max_events = config.rules.rapid_activity.max_events,
        drop_window_minutes = config.rules.balance_drop.window_minutes,
        drop_fraction = config.rules.balance_drop.drop_fraction,
        "detection config updated"
    );
    Ok(config)
}
