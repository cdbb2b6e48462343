use std::path::Path;

use serde::Serialize;

use super::store::CollectionStats;
use super::Database;

/// Informational report on the backend and its database.
#[derive(Debug, Clone, Serialize)]
pub struct SelfCheck {
    pub backend: &'static str,
    pub database: String,
    /// File name of the database, never its directory.
    pub database_file: String,
    pub connection_status: &'static str,
    pub collections: Vec<CollectionStats>,
}

impl Database {
    /// Never fails; database problems are reported in the result.
    pub fn self_check(&self) -> SelfCheck {
        let mut report = SelfCheck {
            backend: "running",
            database: "connected".to_string(),
            database_file: file_name(self.location()),
            connection_status: "connected",
            collections: Vec::new(),
        };

        match self.collection_stats() {
            Ok(stats) => {
                report.database = "connected and working".to_string();
                report.collections = stats;
            }
            Err(e) => {
                tracing::warn!(error = %e, "database self-check failed");
                report.database = format!("connected but error: {}", truncate(&e.to_string(), 80));
                report.connection_status = "degraded";
            }
        }

        report
    }
}

fn file_name(location: &str) -> String {
    Path::new(location)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| location.to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
