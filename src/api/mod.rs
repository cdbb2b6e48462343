//! HTTP API.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | liveness message |
//! | GET | `/test` | database self-check |
//! | GET, POST | `/api/projects` | list, create |
//! | GET | `/api/projects/{id}` | get with derived counts |
//! | GET, POST | `/api/tasks` | list, create |
//! | GET, POST | `/api/notes` | list, create |
//! | POST | `/api/chat` | keyword search across everything |

mod chat;
mod error;
mod health;
mod notes;
mod projects;
mod tasks;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracker_core::Database;

pub use error::ApiError;

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/test", get(health::self_check))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/chat", post(chat::chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
