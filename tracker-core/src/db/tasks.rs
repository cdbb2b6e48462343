use super::filter::Filter;
use super::store::{canonical_ref, Collection, FindOptions};
use super::Database;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::models::{NewTask, TaskFilter};

impl Database {
    /// Stores a task after checking that its project exists.
    pub fn create_task(&self, task: NewTask) -> Result<Document> {
        self.require_project(&task.project_id)?;

        let id = self.insert(Collection::Task, &task)?;
        tracing::info!(%id, project_id = %task.project_id, "created task");

        self.find_by_id(Collection::Task, &id)?
            .ok_or_else(|| Error::Internal(format!("task {} vanished after insert", id)))
    }

    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Document>> {
        let mut query = Filter::All;
        if let Some(project_id) = &filter.project_id {
            query = query.and(Filter::eq("project_id", canonical_ref(project_id)));
        }
        if let Some(status) = filter.status {
            query = query.and(Filter::eq("status", status.as_str()));
        }

        self.find(Collection::Task, &query, &FindOptions::limit(filter.limit))
    }
}
