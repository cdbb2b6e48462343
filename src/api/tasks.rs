use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::models::{CreateTaskInput, ListTasksQuery};
use tracker_core::{Database, Document};

use super::ApiError;

pub async fn list_tasks(
    State(db): State<Database>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(db.list_tasks(&query.validate()?)?))
}

pub async fn create_task(
    State(db): State<Database>,
    payload: Result<Json<CreateTaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let Json(input) = payload?;
    let task = db.create_task(input.validate()?)?;
    Ok((StatusCode::CREATED, Json(task)))
}
