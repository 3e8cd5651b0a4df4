use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::pipeline::{ProcessRequest, ProcessResponse};
use crate::state::AppState;

/// `POST /process`: detect, translate when needed, summarize
pub async fn process_article(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ProcessResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("process", %request_id);

    async move {
        let request = ProcessRequest::from_json(
            &payload,
            &state.config.translation.default_target_language,
        )?;
        debug!(
            "Received article of {} chars, target_language={}",
            request.article.chars().count(),
            request.target_language
        );

        let response = state.pipeline.process(&request).await?;
        Ok::<_, AppError>(Json(response))
    }
    .instrument(span)
    .await
}

/// `GET /api/health`: reports whether the summarization model resolves
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let healthy = match state
        .inference_service
        .health_check(&state.config.summarization.model)
        .await
    {
        Ok(healthy) => healthy,
        Err(e) => {
            warn!("Inference service health check failed: {}", e);
            false
        }
    };

    Json(json!({
        "status": "ok",
        "inference_service": healthy
    }))
}
