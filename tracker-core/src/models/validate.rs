use chrono::NaiveDate;

use crate::error::{Error, FieldError, Result};

/// Collects field errors while an input is turned into a validated value.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fail(field, "field required");
        }
        value
    }

    pub fn choice<T>(
        &mut self,
        field: &str,
        value: Option<String>,
        parse: fn(&str) -> Option<T>,
        allowed: &[&str],
    ) -> Option<T> {
        let raw = value?;
        let parsed = parse(&raw);
        if parsed.is_none() {
            self.fail(field, format!("expected one of {}, got '{}'", allowed.join(", "), raw));
        }
        parsed
    }

    pub fn date(&mut self, field: &str, value: Option<String>) -> Option<NaiveDate> {
        let raw = value?;
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(field, format!("expected a YYYY-MM-DD date, got '{}'", raw));
                None
            }
        }
    }

    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors))
        }
    }
}

/// Resolves a requested result-count limit against its default and hard cap.
pub fn resolve_limit(field: &str, requested: Option<i64>, default: usize, max: usize) -> Result<usize> {
    match requested {
        None => Ok(default),
        Some(n) if n >= 1 && n as u64 <= max as u64 => Ok(n as usize),
        Some(n) => Err(Error::invalid_field(
            field,
            format!("must be between 1 and {}, got {}", max, n),
        )),
    }
}
