//! Error types for the timetabling engine.
//!
//! Ordinary scheduling gaps never surface here; they degrade to empty
//! slots or per-slot reschedule outcomes. These errors cover bad
//! configuration and references to entities that do not exist.

use thiserror::Error;

use crate::models::Year;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by catalog, configuration, and engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Professor name not present in the catalog.
    #[error("unknown professor '{0}'")]
    UnknownProfessor(String),

    /// Professor has no subject of that name for the cohort.
    #[error("professor '{professor}' has no subject '{subject}' for {year}")]
    UnknownSubject {
        professor: String,
        year: Year,
        subject: String,
    },

    /// A cohort's department has no timing settings.
    #[error("{year} belongs to department '{department}' which has no settings")]
    MissingDepartment { year: Year, department: String },

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
