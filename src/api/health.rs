use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::envelope::Status;
use super::AppState;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Status,
    pub alive: bool,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: Status,
    pub ready: bool,
}

pub async fn healthz() -> Json<HealthResponse> {
    tracing::info!("API health is OK");
    Json(HealthResponse {
        status: Status::Success,
        alive: true,
    })
}

pub async fn readyz(State(state): State<AppState>) -> Result<Json<ReadyResponse>, AppError> {
    state.service.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed");
        AppError::Unavailable("database unavailable".to_string())
    })?;

    Ok(Json(ReadyResponse {
        status: Status::Success,
        ready: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_healthz_reports_alive() {
        let Json(body) = healthz().await;
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success", "alive": true}));
    }
}
