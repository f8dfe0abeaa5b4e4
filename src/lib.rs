//! Weekly lecture timetabling for college departments.
//!
//! Builds a Monday–Saturday timetable for every cohort (college year ×
//! department) from a catalog of professors, their subjects, weekly
//! workload caps and co-teaching links.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Year`, `Professor`, `SubjectAssignment`,
//!   `ProfessorCatalog`, `DepartmentSettings`, `ScheduleGrid`
//! - **`scheduler`**: `ScheduleEngine` and its parts (availability,
//!   workload, day-slot allocation, reschedule, score)
//! - **`validation`**: Input integrity checks (department coverage,
//!   time windows, pairing references)
//! - **`config`**: JSON-loadable engine configuration
//! - **`import`**: CSV catalog import
//! - **`error`**: Engine error type
//!
//! # Architecture
//!
//! Inputs (catalog, department settings, allocation policy) are plain
//! serde values owned by a `ScheduleEngine`; the engine produces a
//! `ScheduleGrid`. Allocation is a deterministic greedy heuristic with a
//! bounded number of retries per slot, so a run always terminates and
//! unfillable cells surface as empty slots rather than errors.
//!
//! The crate only emits `tracing` events; installing a subscriber is up
//! to the caller.

pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::{AllocationPolicy, EngineConfig};
pub use error::{EngineError, Result};
pub use scheduler::ScheduleEngine;
