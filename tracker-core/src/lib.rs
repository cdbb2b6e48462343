//! Core library for the tracker.
//!
//! This crate provides the domain models, the document store and the chat
//! search for the tracker, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use tracker_core::db::Database;
//! use tracker_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let projects = db.list_projects(&ProjectFilter::default())?;
//! # Ok::<(), tracker_core::Error>(())
//! ```

pub mod db;
pub mod document;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
pub use document::Document;
pub use error::{Error, FieldError, Result};
