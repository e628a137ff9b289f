//! Runtime log level inspection and mutation (`/log/level`).
//!
//! `GET` reports the current threshold as `{"level":"info"}`. `PUT` and
//! `POST` replace it, taking either that JSON shape or a form body
//! (`level=debug`, what `curl -d` sends). Unknown names get a 400 and leave
//! the threshold alone.

use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::http::header;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::error::HttpsvcError;
use crate::server::AppState;
use crate::severity::LogSeverity;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Serialize, Deserialize)]
pub struct LevelResponse {
    pub level: LogSeverity,
}

#[derive(Deserialize)]
pub struct SetLevelRequest {
    pub level: String,
}

pub async fn get_level_handler(State(state): State<Arc<AppState>>) -> Json<LevelResponse> {
    Json(LevelResponse {
        level: state.log_level.get(),
    })
}

pub async fn set_level_handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<LevelResponse>, HttpsvcError> {
    let body = read_level_request(request, &state).await?;

    let level = match body.level.parse::<LogSeverity>() {
        Ok(level) => level,
        Err(e) => {
            tracing::warn!(level = %body.level, "rejected unrecognized log level");
            return Err(e);
        }
    };

    let previous = state.log_level.get();
    state.log_level.set(level)?;
    tracing::info!(from = %previous, to = %level, "log level changed");

    Ok(Json(LevelResponse { level }))
}

/// Form bodies are recognised by content type; anything else is read as JSON.
async fn read_level_request(
    request: Request,
    state: &Arc<AppState>,
) -> Result<SetLevelRequest, HttpsvcError> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));

    if is_form {
        let Form(body) = Form::<SetLevelRequest>::from_request(request, state)
            .await
            .map_err(|e| HttpsvcError::MalformedLevelRequest(e.body_text()))?;
        return Ok(body);
    }

    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| HttpsvcError::MalformedLevelRequest(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| HttpsvcError::MalformedLevelRequest(e.to_string()))
}
