// src/handlers/render.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    filter::Pipeline,
    models::render::{RenderRequest, RenderResponse},
};

/// Runs arbitrary text through the configured pipeline without storing it.
pub async fn render_preview(
    State(pipeline): State<Arc<Pipeline>>,
    Json(payload): Json<RenderRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = if payload.trace {
        let stages = pipeline.render_traced(&payload.content);
        let content = stages
            .last()
            .map(|stage| stage.output.clone())
            .unwrap_or_else(|| payload.content.clone());
        RenderResponse {
            content,
            steps: pipeline.step_names(),
            stages: Some(stages),
        }
    } else {
        RenderResponse {
            content: pipeline.render(&payload.content),
            steps: pipeline.step_names(),
            stages: None,
        }
    };

    Ok(Json(response))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
