use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::models::{CreateProjectInput, ListProjectsQuery, ProjectWithCounts};
use tracker_core::{Database, Document};

use super::ApiError;

pub async fn list_projects(
    State(db): State<Database>,
    query: Result<Query<ListProjectsQuery>, QueryRejection>,
) -> Result<Json<Vec<ProjectWithCounts>>, ApiError> {
    let Query(query) = query?;
    let projects = db.list_projects(&query.validate()?)?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(db): State<Database>,
    payload: Result<Json<CreateProjectInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let Json(input) = payload?;
    let project = db.create_project(input.validate()?)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<ProjectWithCounts>, ApiError> {
    Ok(Json(db.get_project(&id)?))
}
