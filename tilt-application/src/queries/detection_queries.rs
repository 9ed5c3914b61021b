use tilt_domain::DetectionConfig;

use crate::AppState;

pub async fn get_detection_config(state: &AppState) -> DetectionConfig {
    state.detection_snapshot().await
}
