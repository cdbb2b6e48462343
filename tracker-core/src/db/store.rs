use chrono::{DateTime, Utc};
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use serde::Serialize;
use serde_json::{Map, Value};

use super::filter::{json_path, Filter};
use super::Database;
use crate::document::{format_timestamp, Document, CREATED_AT, ID_FIELD, UPDATED_AT};
use crate::error::{Error, Result};
use crate::models::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Project,
    Task,
    Note,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Project, Self::Task, Self::Note];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::Note => "note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }
}

/// Limit and ordering for [`Database::find`]. Without a sort, documents come
/// back in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<usize>,
    pub sort: Option<Sort>,
}

impl FindOptions {
    pub fn limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            sort: None,
        }
    }

    pub fn sorted(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub name: String,
    pub count: u64,
}

type RawRow = (String, String, String, String);

impl Database {
    /// Stores `value` (which must serialize to a JSON object) and returns the
    /// assigned identifier. The store stamps `created_at` and `updated_at`.
    pub fn insert<T: Serialize>(&self, collection: Collection, value: &T) -> Result<DocumentId> {
        let fields = match serde_json::to_value(value)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::Internal(format!(
                    "documents must be JSON objects, got {}",
                    other
                )))
            }
        };
        for reserved in [ID_FIELD, CREATED_AT, UPDATED_AT] {
            if fields.contains_key(reserved) {
                return Err(Error::Internal(format!("'{}' is assigned by the store", reserved)));
            }
        }

        let id = DocumentId::generate();
        let now = format_timestamp(&Utc::now());
        let body = serde_json::to_string(&fields)?;

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO documents (id, collection, body, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                rusqlite::params![id.to_string(), collection.as_str(), body, now],
            )?;
            Ok(())
        })?;

        tracing::debug!(collection = collection.as_str(), %id, "inserted document");
        Ok(id)
    }

    pub fn find(&self, collection: Collection, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>> {
        let mut params = vec![SqlValue::Text(collection.as_str().to_string())];
        let where_sql = filter.to_sql(&mut params);

        let order_sql = match &options.sort {
            None => "rowid".to_string(),
            Some(sort) => {
                let dir = if sort.descending { "DESC" } else { "ASC" };
                let key = match sort.field.as_str() {
                    CREATED_AT => "created_at".to_string(),
                    UPDATED_AT => "updated_at".to_string(),
                    ID_FIELD => "id".to_string(),
                    field => {
                        params.push(SqlValue::Text(json_path(field)));
                        "json_extract(body, ?)".to_string()
                    }
                };
                format!("{key} {dir}, rowid {dir}")
            }
        };

        let limit = options.limit.map(|n| n as i64).unwrap_or(-1);
        params.push(SqlValue::Integer(limit));

        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM documents
             WHERE collection = ? AND {where_sql}
             ORDER BY {order_sql}
             LIMIT ?"
        );

        let rows: Vec<RawRow> = self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(params), |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;

        tracing::debug!(collection = collection.as_str(), matched = rows.len(), "find");
        rows.into_iter().map(decode).collect()
    }

    pub fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        Ok(self.find(collection, filter, &FindOptions::limit(1))?.into_iter().next())
    }

    pub fn find_by_id(&self, collection: Collection, id: &DocumentId) -> Result<Option<Document>> {
        self.find_one(collection, &Filter::Id(*id))
    }

    pub fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut params = vec![SqlValue::Text(collection.as_str().to_string())];
        let where_sql = filter.to_sql(&mut params);
        let sql = format!("SELECT COUNT(*) FROM documents WHERE collection = ? AND {where_sql}");

        let count: i64 = self.with_connection(|conn| {
            Ok(conn.query_row(&sql, params_from_iter(params), |row| row.get(0))?)
        })?;
        Ok(count as u64)
    }

    /// Distinct string values of `field` among matching documents, in the
    /// order each value was first stored. Non-string values are skipped.
    pub fn distinct(&self, collection: Collection, field: &str, filter: &Filter) -> Result<Vec<String>> {
        let path = json_path(field);
        let mut params = vec![
            SqlValue::Text(path.clone()),
            SqlValue::Text(collection.as_str().to_string()),
            SqlValue::Text(path),
        ];
        let where_sql = filter.to_sql(&mut params);
        let sql = format!(
            "SELECT json_extract(body, ?) AS value FROM documents
             WHERE collection = ? AND json_type(body, ?) = 'text' AND {where_sql}
             GROUP BY value
             ORDER BY MIN(rowid)"
        );

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let values = stmt
                .query_map(params_from_iter(params), |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(values)
        })
    }

    /// Document counts for every collection, including empty ones.
    pub fn collection_stats(&self) -> Result<Vec<CollectionStats>> {
        Collection::ALL
            .iter()
            .map(|collection| -> Result<CollectionStats> {
                Ok(CollectionStats {
                    name: collection.as_str().to_string(),
                    count: self.count(*collection, &Filter::All)?,
                })
            })
            .collect()
    }
}

fn decode((id, body, created_at, updated_at): RawRow) -> Result<Document> {
    let id = DocumentId::parse(&id).map_err(|_| Error::Internal(format!("corrupt document id '{}'", id)))?;
    let fields: Map<String, Value> = serde_json::from_str(&body)?;

    Ok(Document {
        id,
        fields,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("corrupt timestamp '{}': {}", raw, e)))
}

/// Canonical form of a caller-supplied project reference used as a filter.
/// Malformed references are kept verbatim; they simply match nothing.
pub(crate) fn canonical_ref(raw: &str) -> String {
    DocumentId::parse(raw)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| raw.to_string())
}
