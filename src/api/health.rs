use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracker_core::db::SelfCheck;
use tracker_core::Database;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Project tracker backend is running" }))
}

pub async fn self_check(State(db): State<Database>) -> Json<SelfCheck> {
    Json(db.self_check())
}
