use serde::{Deserialize, Serialize};

use crate::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// A project found by the chat search, with a little surrounding context.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedProject {
    #[serde(flatten)]
    pub project: Document,
    pub open_tasks: Vec<Document>,
    pub recent_notes: Vec<Document>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub related_projects: Vec<RelatedProject>,
}

impl ChatResponse {
    pub fn reply_only(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            related_projects: Vec::new(),
        }
    }
}
