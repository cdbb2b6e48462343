use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracker_core::models::{ChatRequest, ChatResponse};
use tracker_core::Database;

use super::ApiError;

pub async fn chat(
    State(db): State<Database>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(db.chat(&request.message)?))
}
