use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::DocumentId;
use super::project::Priority;
use super::validate::{resolve_limit, Checks};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    pub const ALL: [&'static str; 4] = ["open", "in-progress", "blocked", "done"];

    /// Statuses that count as outstanding work.
    pub const ACTIVE: [TaskStatus; 2] = [Self::Open, Self::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "in-progress" => Some(Self::InProgress),
            "blocked" => Some(Self::Blocked),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Task creation payload as received from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateTaskInput {
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub project_id: DocumentId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl CreateTaskInput {
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Validates field presence and values, then the project reference format.
    pub fn validate(self) -> Result<NewTask> {
        let mut checks = Checks::new();

        let project_id = checks.required("project_id", self.project_id);
        let title = checks.required("title", self.title);
        let status = checks.choice("status", self.status, TaskStatus::from_str, &TaskStatus::ALL);
        let due_date = checks.date("due_date", self.due_date);
        let priority = checks.choice("priority", self.priority, Priority::from_str, &Priority::ALL);

        checks.finish()?;

        let project_id = parse_project_ref(&project_id.unwrap_or_default())?;

        Ok(NewTask {
            project_id,
            title: title.unwrap_or_default(),
            description: self.description,
            status: status.unwrap_or_default(),
            assignee: self.assignee,
            due_date,
            priority,
        })
    }
}

pub(crate) fn parse_project_ref(raw: &str) -> Result<DocumentId> {
    DocumentId::parse(raw).map_err(|_| Error::InvalidArgument("Invalid project id".into()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasksQuery {
    pub project_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub limit: usize,
}

impl TaskFilter {
    pub const DEFAULT_LIMIT: usize = 200;
    pub const MAX_LIMIT: usize = 1000;
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            project_id: None,
            status: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl ListTasksQuery {
    pub fn validate(self) -> Result<TaskFilter> {
        let mut checks = Checks::new();
        let status = self.status.filter(|s| !s.is_empty());
        let status = checks.choice("status", status, TaskStatus::from_str, &TaskStatus::ALL);
        checks.finish()?;

        Ok(TaskFilter {
            project_id: self.project_id.filter(|id| !id.is_empty()),
            status,
            limit: resolve_limit("limit", self.limit, TaskFilter::DEFAULT_LIMIT, TaskFilter::MAX_LIMIT)?,
        })
    }
}
