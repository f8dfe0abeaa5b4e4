//! Cross-cohort availability checks.
//!
//! A professor is busy at `(day, lecture_index)` if any cohort already
//! has a slot at that coordinate naming them, including as a co-teacher.
//! Cohorts whose day list is shorter than the index have not been filled
//! that far yet and contribute no conflict.

use std::collections::BTreeSet;

use crate::models::{LectureSlot, ProfessorCatalog, ScheduleGrid, Weekday};

/// Read-only availability view over a grid and catalog.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityChecker<'a> {
    grid: &'a ScheduleGrid,
    catalog: &'a ProfessorCatalog,
}

impl<'a> AvailabilityChecker<'a> {
    pub fn new(grid: &'a ScheduleGrid, catalog: &'a ProfessorCatalog) -> Self {
        Self { grid, catalog }
    }

    /// Professors committed anywhere at `(day, lecture_index)`.
    pub fn busy(&self, lecture_index: usize, day: Weekday) -> BTreeSet<&'a str> {
        let grid = self.grid;
        grid.years()
            .filter_map(|year| grid.slot(year, day, lecture_index))
            .flat_map(LectureSlot::professors)
            .collect()
    }

    /// Catalog professors free at `(day, lecture_index)`, in catalog order.
    pub fn available(&self, lecture_index: usize, day: Weekday) -> Vec<&'a str> {
        let busy = self.busy(lecture_index, day);
        self.catalog
            .names()
            .filter(|name| !busy.contains(name))
            .collect()
    }

    /// Whether one catalog professor is free at `(day, lecture_index)`.
    pub fn is_available(&self, professor: &str, lecture_index: usize, day: Weekday) -> bool {
        self.catalog.contains(professor)
            && !self
                .grid
                .years()
                .filter_map(|year| self.grid.slot(year, day, lecture_index))
                .any(|slot| slot.teaches(professor))
    }
}
