//! Document filters compiled to SQL over the JSON `body` column.

use rusqlite::types::Value as SqlValue;
use serde_json::Value;

use crate::models::DocumentId;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(DocumentId),
    Eq(String, Value),
    In(String, Vec<Value>),
    /// Case-insensitive substring match. On array fields, matches when any
    /// string element contains the needle.
    Contains(String, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::Eq(field.to_string(), value.into())
    }

    pub fn is_in<V: Into<Value>>(field: &str, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(field.to_string(), values.into_iter().map(Into::into).collect())
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Self::Contains(field.to_string(), needle.to_lowercase())
    }

    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Or(filters.into_iter().collect())
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Self::All => other,
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            this => Self::And(vec![this, other]),
        }
    }

    /// Renders this filter as a SQL boolean expression, appending bound
    /// parameters in the order their placeholders appear.
    pub fn to_sql(&self, params: &mut Vec<SqlValue>) -> String {
        match self {
            Self::All => "1".to_string(),
            Self::Id(id) => {
                params.push(SqlValue::Text(id.to_string()));
                "id = ?".to_string()
            }
            Self::Eq(field, Value::Null) => {
                params.push(SqlValue::Text(json_path(field)));
                "json_extract(body, ?) IS NULL".to_string()
            }
            Self::Eq(field, value) => {
                params.push(SqlValue::Text(json_path(field)));
                params.push(sql_value(value));
                "json_extract(body, ?) = ?".to_string()
            }
            Self::In(_, values) if values.is_empty() => "0".to_string(),
            Self::In(field, values) => {
                params.push(SqlValue::Text(json_path(field)));
                params.extend(values.iter().map(sql_value));
                let placeholders = vec!["?"; values.len()].join(", ");
                format!("json_extract(body, ?) IN ({})", placeholders)
            }
            Self::Contains(field, needle) => {
                let path = json_path(field);
                params.push(SqlValue::Text(path.clone()));
                params.push(SqlValue::Text(path.clone()));
                params.push(SqlValue::Text(needle.clone()));
                params.push(SqlValue::Text(path));
                params.push(SqlValue::Text(needle.clone()));
                "(CASE json_type(body, ?) \
                 WHEN 'text' THEN instr(casefold(json_extract(body, ?)), ?) > 0 \
                 WHEN 'array' THEN EXISTS (SELECT 1 FROM json_each(body, ?) AS item \
                 WHERE item.type = 'text' AND instr(casefold(item.value), ?) > 0) \
                 ELSE 0 END)"
                    .to_string()
            }
            Self::And(filters) => join(filters, " AND ", "1", params),
            Self::Or(filters) => join(filters, " OR ", "0", params),
        }
    }
}

fn join(filters: &[Filter], op: &str, empty: &str, params: &mut Vec<SqlValue>) -> String {
    if filters.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<String> = filters.iter().map(|f| f.to_sql(params)).collect();
    format!("({})", parts.join(op))
}

pub(crate) fn json_path(field: &str) -> String {
    format!("$.{}", field)
}

fn sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}
