//! Error types
//!
//! Nothing in the planner is fatal: the worst outcome of any failure is that
//! the requested save or export did not happen.

use thiserror::Error;

/// Errors from editing the form state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("{container} index {index} out of range (len {len})")]
    IndexOutOfRange {
        container: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unknown field path: {0}")]
    UnknownField(String),

    #[error("field {field} expects a {expected} value")]
    WrongValueKind {
        field: String,
        expected: &'static str,
    },
}

/// Errors from the snapshot storage backends
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("storage remove failed: {0}")]
    Remove(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the PDF export pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("rasterizing {page} failed: {reason}")]
    Rasterize { page: &'static str, reason: String },

    #[error("raster for {page} has no area ({width}x{height})")]
    EmptyRaster {
        page: &'static str,
        width: u32,
        height: u32,
    },

    #[error("document assembly failed: {0}")]
    Document(String),
}
