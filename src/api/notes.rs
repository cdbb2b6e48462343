use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::models::{CreateNoteInput, ListNotesQuery};
use tracker_core::{Database, Document};

use super::ApiError;

pub async fn list_notes(
    State(db): State<Database>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(db.list_notes(&query.validate()?)?))
}

pub async fn create_note(
    State(db): State<Database>,
    payload: Result<Json<CreateNoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let Json(input) = payload?;
    let note = db.create_note(input.validate()?)?;
    Ok((StatusCode::CREATED, Json(note)))
}
