use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use tracing::warn;

use crate::{
    message::{DatabaseStatus, HealthResponse, HealthStatus},
    state::SharedState,
};

/// Always answers 200; a failed storage probe only downgrades the status.
pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let mut health = HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database: DatabaseStatus::NotConfigured,
        environment: state.config.environment.clone(),
        openai_configured: state.provider.is_configured(),
        error: None,
        message: None,
    };

    if state.usage.is_configured() {
        match state.usage.ping().await {
            Ok(()) => health.database = DatabaseStatus::Connected,
            Err(e) => {
                warn!(error = %e, "database liveness probe failed");
                health.status = HealthStatus::HealthyWithWarnings;
                health.database = DatabaseStatus::Disconnected;
                health.error = Some(e.to_string());
                health.message = Some("Service running without database".to_string());
            }
        }
    }

    Json(health)
}
