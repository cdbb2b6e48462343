//! Keyword "chat" over projects, tasks and notes.
//!
//! A query is matched as a case-insensitive substring against project names,
//! descriptions and tags, task titles and descriptions, and note content.
//! Projects reached through tasks or notes are appended after direct hits,
//! duplicates keep their first position, and each survivor is returned with
//! its open tasks and latest notes.

use std::collections::HashSet;

use super::filter::Filter;
use super::store::{Collection, FindOptions, Sort};
use super::Database;
use crate::document::{Document, CREATED_AT};
use crate::error::Result;
use crate::models::{ChatResponse, DocumentId, RelatedProject, TaskStatus};

const DIRECT_MATCH_LIMIT: usize = 10;
const MAX_RELATED: usize = 10;
const OPEN_TASKS_PER_PROJECT: usize = 5;
const NOTES_PER_PROJECT: usize = 3;
const NAMES_IN_REPLY: usize = 5;

pub const EMPTY_QUERY_REPLY: &str = "Ask me anything about your projects, tasks, or notes.";
pub const NO_MATCH_REPLY: &str =
    "I couldn't find anything related. Try different keywords like a project name, tag, or status.";

impl Database {
    pub fn chat(&self, message: &str) -> Result<ChatResponse> {
        let query = message.trim().to_lowercase();
        if query.is_empty() {
            return Ok(ChatResponse::reply_only(EMPTY_QUERY_REPLY));
        }

        let mut matches = self.find(
            Collection::Project,
            &Filter::any([
                Filter::contains("name", &query),
                Filter::contains("description", &query),
                Filter::contains("tags", &query),
            ]),
            &FindOptions::limit(DIRECT_MATCH_LIMIT),
        )?;

        let task_refs = self.distinct(
            Collection::Task,
            "project_id",
            &Filter::any([Filter::contains("title", &query), Filter::contains("description", &query)]),
        )?;
        let note_refs = self.distinct(Collection::Note, "project_id", &Filter::contains("content", &query))?;

        for raw in task_refs.iter().chain(&note_refs) {
            if let Some(project) = self.referenced_project(raw) {
                matches.push(project);
            }
        }

        let projects = dedupe_by_id(matches, MAX_RELATED);
        tracing::debug!(query = %query, related = projects.len(), "chat search");

        if projects.is_empty() {
            return Ok(ChatResponse::reply_only(NO_MATCH_REPLY));
        }

        let related = projects
            .into_iter()
            .map(|project| self.related_project(project))
            .collect::<Result<Vec<_>>>()?;

        Ok(ChatResponse {
            reply: compose_reply(&related),
            related_projects: related,
        })
    }

    /// Best-effort lookup of a project referenced by a task or note.
    fn referenced_project(&self, raw: &str) -> Option<Document> {
        let Ok(id) = DocumentId::parse(raw) else {
            tracing::debug!(project_id = raw, "skipping malformed project reference");
            return None;
        };

        match self.find_by_id(Collection::Project, &id) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(%id, error = %e, "skipping project reference");
                None
            }
        }
    }

    fn related_project(&self, project: Document) -> Result<RelatedProject> {
        let project_ref = Filter::eq("project_id", project.id.to_string());

        let open_tasks = self.find(
            Collection::Task,
            &project_ref
                .clone()
                .and(Filter::is_in("status", TaskStatus::ACTIVE.map(|s| s.as_str()))),
            &FindOptions::limit(OPEN_TASKS_PER_PROJECT),
        )?;
        let recent_notes = self.find(
            Collection::Note,
            &project_ref,
            &FindOptions::limit(NOTES_PER_PROJECT).sorted(Sort::desc(CREATED_AT)),
        )?;

        Ok(RelatedProject {
            project,
            open_tasks,
            recent_notes,
        })
    }
}

/// Keeps the first occurrence of each id, up to `cap` documents.
fn dedupe_by_id(docs: Vec<Document>, cap: usize) -> Vec<Document> {
    let mut seen = HashSet::new();
    docs.into_iter()
        .filter(|doc| seen.insert(doc.id))
        .take(cap)
        .collect()
}

fn compose_reply(related: &[RelatedProject]) -> String {
    let names = related
        .iter()
        .take(NAMES_IN_REPLY)
        .map(|r| r.project.get_str("name").unwrap_or("Unnamed"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "I found {} related project(s): {}. I included a few open tasks and recent notes for context.",
        related.len(),
        names
    )
}
