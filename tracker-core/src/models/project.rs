use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validate::{resolve_limit, Checks};
use crate::document::Document;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [&'static str; 4] = ["planned", "active", "on-hold", "completed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(Self::Planned),
            "active" => Some(Self::Active),
            "on-hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [&'static str; 4] = ["low", "medium", "high", "critical"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Project creation payload as received from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub owner: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub progress: Option<i64>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Validated project fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: u8,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

impl CreateProjectInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn validate(self) -> Result<NewProject> {
        let mut checks = Checks::new();

        let name = checks.required("name", self.name);
        let status = checks.choice("status", self.status, ProjectStatus::from_str, &ProjectStatus::ALL);
        let priority = checks.choice("priority", self.priority, Priority::from_str, &Priority::ALL);
        let start_date = checks.date("start_date", self.start_date);
        let end_date = checks.date("end_date", self.end_date);

        let progress = self.progress.unwrap_or(0);
        if !(0..=100).contains(&progress) {
            checks.fail("progress", format!("must be between 0 and 100, got {}", progress));
        }

        checks.finish()?;

        Ok(NewProject {
            name: name.unwrap_or_default(),
            description: self.description,
            status: status.unwrap_or_default(),
            owner: self.owner,
            start_date,
            end_date,
            progress: progress as u8,
            priority,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// Per-status task counts attached to a project on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub open: u64,
    pub in_progress: u64,
    pub done: u64,
}

/// A stored project enriched with its derived counts.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithCounts {
    #[serde(flatten)]
    pub project: Document,
    pub task_counts: TaskCounts,
    pub notes_count: u64,
}

/// Query parameters accepted by the project listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProjectsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub limit: usize,
}

impl ProjectFilter {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 500;
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl ListProjectsQuery {
    pub fn validate(self) -> Result<ProjectFilter> {
        let mut checks = Checks::new();
        let status = self.status.filter(|s| !s.is_empty());
        let status = checks.choice("status", status, ProjectStatus::from_str, &ProjectStatus::ALL);
        checks.finish()?;

        Ok(ProjectFilter {
            status,
            limit: resolve_limit("limit", self.limit, ProjectFilter::DEFAULT_LIMIT, ProjectFilter::MAX_LIMIT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_are_applied() {
        let project = CreateProjectInput::named("Apollo").validate().unwrap();

        assert_eq!(project.status, ProjectStatus::Planned);
        assert_eq!(project.progress, 0);
        assert!(project.tags.is_empty());
        assert!(project.priority.is_none());
    }

    #[test]
    fn stored_form_uses_wire_names() {
        let project = CreateProjectInput {
            status: Some("on-hold".into()),
            priority: Some("critical".into()),
            start_date: Some("2024-03-01".into()),
            ..CreateProjectInput::named("Apollo")
        }
        .validate()
        .unwrap();

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["status"], "on-hold");
        assert_eq!(value["priority"], "critical");
        assert_eq!(value["start_date"], "2024-03-01");
        assert_eq!(value["end_date"], serde_json::Value::Null);
    }

    #[test]
    fn rejects_every_offending_field() {
        let err = CreateProjectInput {
            status: Some("paused".into()),
            progress: Some(150),
            end_date: Some("31/12/2024".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        match err {
            Error::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, ["name", "status", "end_date", "progress"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn progress_bounds_are_inclusive() {
        for progress in [0, 100] {
            let project = CreateProjectInput {
                progress: Some(progress),
                ..CreateProjectInput::named("Edge")
            }
            .validate()
            .unwrap();
            assert_eq!(i64::from(project.progress), progress);
        }

        assert!(CreateProjectInput {
            progress: Some(-1),
            ..CreateProjectInput::named("Edge")
        }
        .validate()
        .is_err());
    }

    #[test]
    fn list_query_rejects_limit_above_cap() {
        let query = ListProjectsQuery {
            status: None,
            limit: Some(501),
        };
        assert!(matches!(query.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn list_query_parses_status() {
        let filter = ListProjectsQuery {
            status: Some("active".into()),
            limit: Some(5),
        }
        .validate()
        .unwrap();

        assert_eq!(filter.status, Some(ProjectStatus::Active));
        assert_eq!(filter.limit, 5);
    }

    #[test]
    fn list_query_treats_empty_status_as_unfiltered() {
        let filter = ListProjectsQuery {
            status: Some(String::new()),
            limit: None,
        }
        .validate()
        .unwrap();

        assert_eq!(filter.status, None);
    }
}
