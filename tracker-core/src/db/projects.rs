use super::filter::Filter;
use super::store::{Collection, FindOptions};
use super::Database;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::models::{DocumentId, NewProject, ProjectFilter, ProjectWithCounts, TaskCounts, TaskStatus};

impl Database {
    pub fn create_project(&self, project: NewProject) -> Result<Document> {
        let id = self.insert(Collection::Project, &project)?;
        tracing::info!(%id, name = %project.name, "created project");

        self.find_by_id(Collection::Project, &id)?
            .ok_or_else(|| Error::Internal(format!("project {} vanished after insert", id)))
    }

    pub fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectWithCounts>> {
        let query = match filter.status {
            Some(status) => Filter::eq("status", status.as_str()),
            None => Filter::All,
        };

        self.find(Collection::Project, &query, &FindOptions::limit(filter.limit))?
            .into_iter()
            .map(|project| self.with_counts(project))
            .collect()
    }

    /// Looks up a project by a caller-supplied id, with derived counts.
    pub fn get_project(&self, id: &str) -> Result<ProjectWithCounts> {
        let id = DocumentId::parse(id).map_err(|_| Error::InvalidArgument("Invalid project id".into()))?;
        let project = self.require_project(&id)?;
        self.with_counts(project)
    }

    pub(crate) fn require_project(&self, id: &DocumentId) -> Result<Document> {
        self.find_by_id(Collection::Project, id)?
            .ok_or_else(|| Error::NotFound("Project not found".into()))
    }

    pub fn task_counts(&self, project_id: &DocumentId) -> Result<TaskCounts> {
        let count = |status: TaskStatus| {
            self.count(
                Collection::Task,
                &Filter::eq("project_id", project_id.to_string()).and(Filter::eq("status", status.as_str())),
            )
        };

        Ok(TaskCounts {
            open: count(TaskStatus::Open)?,
            in_progress: count(TaskStatus::InProgress)?,
            done: count(TaskStatus::Done)?,
        })
    }

    pub fn notes_count(&self, project_id: &DocumentId) -> Result<u64> {
        self.count(Collection::Note, &Filter::eq("project_id", project_id.to_string()))
    }

    fn with_counts(&self, project: Document) -> Result<ProjectWithCounts> {
        Ok(ProjectWithCounts {
            task_counts: self.task_counts(&project.id)?,
            notes_count: self.notes_count(&project.id)?,
            project,
        })
    }
}
