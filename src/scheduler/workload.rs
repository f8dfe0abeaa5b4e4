//! Weekly workload bookkeeping.
//!
//! Caps live on the catalog's subject assignments. An assignment without
//! a cap (or a lookup that matches no assignment) never blocks a commit,
//! and decrementing it is a no-op.

use crate::models::{ProfessorCatalog, SubjectType, Year};

/// Workload view over a catalog.
#[derive(Debug)]
pub struct WorkloadTracker<'a> {
    catalog: &'a mut ProfessorCatalog,
}

impl<'a> WorkloadTracker<'a> {
    pub fn new(catalog: &'a mut ProfessorCatalog) -> Self {
        Self { catalog }
    }

    /// Whether `(professor, year, subject, kind)` may take another session.
    pub fn has_capacity(&self, professor: &str, year: &Year, subject: &str, kind: SubjectType) -> bool {
        self.catalog
            .professor(professor)
            .and_then(|p| p.assignment(year, subject, kind))
            .map_or(true, |a| a.has_capacity())
    }

    /// Records one committed session; returns whether a counter moved.
    ///
    /// Only capped assignments with capacity left are touched, so the
    /// remaining count never goes below zero.
    pub fn decrement(&mut self, professor: &str, year: &Year, subject: &str, kind: SubjectType) -> bool {
        self.catalog
            .professor_mut(professor)
            .and_then(|p| p.assignment_mut(year, subject, kind))
            .is_some_and(|a| a.consume())
    }

    /// Remaining sessions, `None` if uncapped or unknown.
    pub fn remaining(&self, professor: &str, year: &Year, subject: &str, kind: SubjectType) -> Option<u32> {
        self.catalog
            .professor(professor)?
            .assignment(year, subject, kind)?
            .remaining()
    }
}
