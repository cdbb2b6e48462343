use super::filter::Filter;
use super::store::{canonical_ref, Collection, FindOptions};
use super::Database;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::models::{NewNote, NoteFilter};

impl Database {
    /// Stores a note after checking that its project exists.
    pub fn create_note(&self, note: NewNote) -> Result<Document> {
        self.require_project(&note.project_id)?;

        let id = self.insert(Collection::Note, &note)?;
        tracing::info!(%id, project_id = %note.project_id, "created note");

        self.find_by_id(Collection::Note, &id)?
            .ok_or_else(|| Error::Internal(format!("note {} vanished after insert", id)))
    }

    pub fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<Document>> {
        let query = match &filter.project_id {
            Some(project_id) => Filter::eq("project_id", canonical_ref(project_id)),
            None => Filter::All,
        };

        self.find(Collection::Note, &query, &FindOptions::limit(filter.limit))
    }
}
