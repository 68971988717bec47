//! Error types for payload ingestion.
//!
//! Ingestion is the only fallible surface in the model. Graph construction
//! and queries degrade permissively instead of failing: dangling edges are
//! dropped, unmatched classification lookups return a sentinel.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("payload parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
