//! Post-run single-day repair.
//!
//! When a professor becomes unavailable for a day, every slot on that day
//! naming them (as lead or co-teacher, in any cohort) is handed to the
//! first professor free at the same coordinate, teaching that
//! candidate's next Theory subject for the cohort.
//!
//! # Known gaps
//! Replacement ignores workload caps and pairing links. A candidate that
//! does not teach the cohort is not skipped: the slot is reported as a
//! failure and left as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::AvailabilityChecker;
use crate::error::{EngineError, Result};
use crate::models::{Lecture, ProfessorCatalog, ScheduleGrid, SubjectType, Weekday, Year};

/// Coordinates of one timetable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub year: Year,
    pub day: Weekday,
    pub lecture_index: usize,
}

/// A slot that was handed to another professor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub slot: SlotRef,
    /// Replacement professor.
    pub professor: String,
    /// Theory subject they now teach there.
    pub subject: String,
}

/// Why a slot could not be handed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RescheduleFailure {
    /// Every catalog professor is busy at that coordinate.
    NoCandidate,
    /// The first free professor has no Theory subject for the cohort.
    NoTheorySubject { candidate: String },
}

/// Outcome of one reschedule call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleReport {
    pub replaced: Vec<Replacement>,
    pub failed: Vec<(SlotRef, RescheduleFailure)>,
}

impl RescheduleReport {
    /// Whether every affected slot was handed over.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of slots that named the professor.
    pub fn affected(&self) -> usize {
        self.replaced.len() + self.failed.len()
    }
}

/// Repairs a finished grid in place.
#[derive(Debug)]
pub struct RescheduleService<'a> {
    catalog: &'a mut ProfessorCatalog,
    grid: &'a mut ScheduleGrid,
}

impl<'a> RescheduleService<'a> {
    pub fn new(catalog: &'a mut ProfessorCatalog, grid: &'a mut ScheduleGrid) -> Self {
        Self { catalog, grid }
    }

    /// Replaces `professor` in every slot they hold on `day`.
    ///
    /// Slots are visited cohort by cohort (sorted), lowest index first.
    /// Replaced slots become single-professor Theory lectures flagged as
    /// rescheduled; failed slots are reported and left untouched.
    ///
    /// # Errors
    /// [`EngineError::UnknownProfessor`] if the catalog does not know
    /// `professor`.
    #[instrument(skip(self))]
    pub fn reschedule(&mut self, professor: &str, day: Weekday) -> Result<RescheduleReport> {
        if !self.catalog.contains(professor) {
            return Err(EngineError::UnknownProfessor(professor.to_string()));
        }

        let targets: Vec<SlotRef> = self
            .grid
            .lecture_indices(professor, day)
            .into_iter()
            .flat_map(|(year, indices)| {
                indices.into_iter().map(move |lecture_index| SlotRef {
                    year: year.clone(),
                    day,
                    lecture_index,
                })
            })
            .collect();

        let mut report = RescheduleReport::default();
        for slot in targets {
            match self.replace(&slot) {
                Ok(replacement) => report.replaced.push(replacement),
                Err(failure) => {
                    debug!(year = %slot.year, lecture_index = slot.lecture_index, ?failure, "slot kept");
                    report.failed.push((slot, failure));
                }
            }
        }

        info!(
            replaced = report.replaced.len(),
            failed = report.failed.len(),
            "reschedule finished"
        );
        Ok(report)
    }

    fn replace(&mut self, slot: &SlotRef) -> std::result::Result<Replacement, RescheduleFailure> {
        let candidate = AvailabilityChecker::new(self.grid, self.catalog)
            .available(slot.lecture_index, slot.day)
            .first()
            .map(|name| name.to_string())
            .ok_or(RescheduleFailure::NoCandidate)?;

        let subject = self
            .catalog
            .next_subject(&candidate, &slot.year, SubjectType::Theory)
            .ok_or_else(|| RescheduleFailure::NoTheorySubject {
                candidate: candidate.clone(),
            })?;

        if let Some(cell) = self.grid.slot_mut(&slot.year, slot.day, slot.lecture_index) {
            *cell = Lecture::single(candidate.as_str(), subject.as_str(), SubjectType::Theory)
                .into_rescheduled()
                .into();
        }

        Ok(Replacement {
            slot: slot.clone(),
            professor: candidate,
            subject,
        })
    }
}
