use serde::{Deserialize, Serialize};

use super::id::DocumentId;
use super::task::parse_project_ref;
use super::validate::{resolve_limit, Checks};
use crate::error::Result;

/// Note creation payload as received from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateNoteInput {
    pub project_id: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub project_id: DocumentId,
    pub author: Option<String>,
    pub content: String,
}

impl CreateNoteInput {
    pub fn new(project_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            author: None,
            content: Some(content.into()),
        }
    }

    pub fn validate(self) -> Result<NewNote> {
        let mut checks = Checks::new();
        let project_id = checks.required("project_id", self.project_id);
        let content = checks.required("content", self.content);
        checks.finish()?;

        Ok(NewNote {
            project_id: parse_project_ref(&project_id.unwrap_or_default())?,
            author: self.author,
            content: content.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotesQuery {
    pub project_id: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFilter {
    pub project_id: Option<String>,
    pub limit: usize,
}

impl NoteFilter {
    pub const DEFAULT_LIMIT: usize = 200;
    pub const MAX_LIMIT: usize = 1000;
}

impl Default for NoteFilter {
    fn default() -> Self {
        Self {
            project_id: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl ListNotesQuery {
    pub fn validate(self) -> Result<NoteFilter> {
        Ok(NoteFilter {
            project_id: self.project_id.filter(|id| !id.is_empty()),
            limit: resolve_limit("limit", self.limit, NoteFilter::DEFAULT_LIMIT, NoteFilter::MAX_LIMIT)?,
        })
    }
}
