//! Day-slot allocator: fills one lecture index of one cohort across the
//! six teaching days.
//!
//! # Algorithm
//!
//! A cohort keeps one FIFO professor queue for the whole run. For a given
//! lecture index the allocator looks at the queue head and, day by day:
//!
//! 1. Checks the head is free at `(day, lecture_index)` in every cohort.
//! 2. Checks the head has not already taught this cohort today. This is
//!    relaxed once `attempts >= queue.len()` or when
//!    `lecture_index > queue.len()`, so short queues still make progress.
//! 3. Picks the session type: Practical in a practical slot until
//!    `queue.len()` practical attempts have failed, Theory otherwise.
//! 4. Takes the head's next subject of that type (round-robin) and
//!    commits it if the workload cap allows. Co-taught subjects commit one
//!    joint slot and charge every co-teacher's workload.
//! 5. Rotates the queue, whatever happened.
//!
//! After `max_attempts` turns the remaining days get empty slots. There
//! is no backtracking and no lookahead: the result is best-effort.
//!
//! # Complexity
//! O(max_attempts × cohorts) per lecture index.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use super::{AvailabilityChecker, WorkloadTracker};
use crate::config::AllocationPolicy;
use crate::models::{
    DepartmentSettings, Lecture, LectureSlot, ProfessorCatalog, ScheduleGrid, SubjectType,
    Teaching, Weekday, Year,
};

/// FIFO rotation queue of the professors teaching one cohort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfessorQueue {
    inner: VecDeque<String>,
}

impl ProfessorQueue {
    /// Builds a queue in the given order.
    pub fn new(professors: impl IntoIterator<Item = String>) -> Self {
        Self {
            inner: professors.into_iter().collect(),
        }
    }

    /// Current head.
    pub fn front(&self) -> Option<&str> {
        self.inner.front().map(String::as_str)
    }

    /// Moves the head to the back.
    pub fn rotate(&mut self) {
        self.inner.rotate_left(1.min(self.inner.len()));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Professors from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }
}

/// What one allocation call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// Lecture index that was filled.
    pub lecture_index: usize,
    /// Days that received a lecture.
    pub committed: usize,
    /// Days that received the empty marker.
    pub empty: usize,
    /// Queue turns spent.
    pub attempts: usize,
}

impl AllocationOutcome {
    /// Whether the attempt bound cut the allocation short.
    pub fn exhausted(&self) -> bool {
        self.empty > 0
    }
}

/// Greedy allocator for one cohort.
#[derive(Debug, Clone, Copy)]
pub struct DaySlotAllocator<'a> {
    year: &'a Year,
    settings: &'a DepartmentSettings,
    policy: &'a AllocationPolicy,
}

impl<'a> DaySlotAllocator<'a> {
    pub fn new(year: &'a Year, settings: &'a DepartmentSettings, policy: &'a AllocationPolicy) -> Self {
        Self {
            year,
            settings,
            policy,
        }
    }

    /// Appends one slot at `lecture_index` to each of the cohort's six days.
    ///
    /// Expects every day list of the cohort to hold exactly
    /// `lecture_index` entries on entry; leaves `lecture_index + 1`.
    /// Mutates the queue (rotation), the catalog (subject rotation and
    /// workload) and the grid.
    pub fn allocate(
        &self,
        lecture_index: usize,
        queue: &mut ProfessorQueue,
        catalog: &mut ProfessorCatalog,
        grid: &mut ScheduleGrid,
    ) -> AllocationOutcome {
        let queue_len = queue.len();
        let mut day = 0;
        let mut attempts = 0;
        let mut practical_attempts = 0;

        if queue.is_empty() {
            warn!(year = %self.year, lecture_index, "no professors teach this year");
        }

        while day < Weekday::COUNT && attempts < self.policy.max_attempts {
            let Some(head) = queue.front().map(str::to_owned) else {
                break;
            };
            let weekday = Weekday::ALL[day];

            let available =
                AvailabilityChecker::new(grid, catalog).is_available(&head, lecture_index, weekday);
            let already_used_today = grid.professors_on(self.year, weekday).contains(head.as_str());
            let scheduled =
                !already_used_today || attempts >= queue_len || lecture_index > queue_len;
            let kind = self.desired_type(lecture_index, practical_attempts, queue_len);

            if available && scheduled {
                if let Some(lecture) =
                    self.try_commit(&head, kind, lecture_index, weekday, catalog, grid)
                {
                    trace!(
                        year = %self.year,
                        day = %weekday,
                        lecture_index,
                        professor = %lecture.professor_label(),
                        subject = %lecture.subject_label(),
                        "committed"
                    );
                    grid.push(self.year, weekday, lecture.into());
                    day += 1;
                    practical_attempts = 0;
                }
            }

            queue.rotate();
            attempts += 1;
            practical_attempts += 1;
        }

        let committed = day;
        if day < Weekday::COUNT {
            debug!(
                year = %self.year,
                lecture_index,
                attempts,
                unfilled = Weekday::COUNT - day,
                "attempt bound reached, filling empty slots"
            );
        }
        for weekday in &Weekday::ALL[day..] {
            grid.push(self.year, *weekday, LectureSlot::Empty);
        }

        AllocationOutcome {
            lecture_index,
            committed,
            empty: Weekday::COUNT - committed,
            attempts,
        }
    }

    /// Session type wanted for this turn.
    ///
    /// Falls back to Theory after `queue_len` failed practical attempts
    /// so a practical slot cannot stall forever.
    fn desired_type(&self, lecture_index: usize, practical_attempts: usize, queue_len: usize) -> SubjectType {
        if self.settings.is_practical_slot(lecture_index) && practical_attempts < queue_len {
            SubjectType::Practical
        } else {
            SubjectType::Theory
        }
    }

    /// Picks the head's next subject and charges workloads.
    ///
    /// Returns `None` (nothing charged) when the head has no subject of
    /// `kind`, the head or a co-teacher is out of capacity, or a
    /// co-teacher is busy at this coordinate. The subject rotation still
    /// happens in those cases.
    fn try_commit(
        &self,
        head: &str,
        kind: SubjectType,
        lecture_index: usize,
        day: Weekday,
        catalog: &mut ProfessorCatalog,
        grid: &ScheduleGrid,
    ) -> Option<Lecture> {
        let year = self.year;
        let subject = catalog.next_subject(head, year, kind)?;
        let co_teachers = catalog
            .professor(head)?
            .assignment(year, &subject, kind)?
            .pairings
            .clone();

        {
            let workload = WorkloadTracker::new(catalog);
            if !workload.has_capacity(head, year, &subject, kind) {
                return None;
            }
            if co_teachers
                .iter()
                .any(|c| !workload.has_capacity(&c.professor, year, &c.subject, kind))
            {
                debug!(%year, professor = head, %subject, "co-teacher out of workload");
                return None;
            }
        }

        let checker = AvailabilityChecker::new(grid, catalog);
        if let Some(busy) = co_teachers
            .iter()
            .find(|c| !checker.is_available(&c.professor, lecture_index, day))
        {
            debug!(%year, %day, lecture_index, co_teacher = %busy.professor, "co-teacher busy");
            return None;
        }

        let mut workload = WorkloadTracker::new(catalog);
        workload.decrement(head, year, &subject, kind);
        for c in &co_teachers {
            workload.decrement(&c.professor, year, &c.subject, kind);
        }

        let lecture = if co_teachers.is_empty() {
            Lecture::single(head, subject, kind)
        } else {
            Lecture::paired(
                Teaching::new(head, subject),
                co_teachers
                    .into_iter()
                    .map(|c| Teaching::new(c.professor, c.subject)),
                kind,
            )
        };
        Some(lecture)
    }
}
