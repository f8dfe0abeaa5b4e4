//! Greedy timetable generation, repair, and scoring.
//!
//! # Algorithm
//!
//! `ScheduleEngine` walks cohorts in sorted order and, for each lecture
//! index, lets `DaySlotAllocator` fill the six teaching days from a FIFO
//! professor queue. `AvailabilityChecker` keeps a professor out of two
//! cohorts at the same coordinate and `WorkloadTracker` enforces weekly
//! caps. The result is best-effort: unfillable cells become empty slots
//! after a bounded number of queue turns.
//!
//! After a run, `RescheduleService` hands one professor's slots on a day
//! to free professors, and `ScheduleScore` reports the filled share.

mod allocator;
mod availability;
mod engine;
mod kpi;
mod reschedule;
mod timetable;
mod workload;

pub use allocator::{AllocationOutcome, DaySlotAllocator, ProfessorQueue};
pub use availability::AvailabilityChecker;
pub use engine::{RunSummary, ScheduleEngine};
pub use kpi::{ScheduleScore, SlotCounts};
pub use reschedule::{Replacement, RescheduleFailure, RescheduleReport, RescheduleService, SlotRef};
pub use timetable::{ProfessorTimetable, FREE_SLOT_LABEL};
pub use workload::WorkloadTracker;
