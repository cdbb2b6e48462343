//! HTTP surface and CLI plumbing for the tracker server.

pub mod api;
pub mod cli;

pub use tracker_core::{db, models};
