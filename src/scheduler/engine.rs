//! Whole-week timetable generation.
//!
//! # Algorithm
//!
//! 1. Collect every cohort (sorted) and resolve its department settings.
//! 2. Create empty day lists for every cohort, so availability checks
//!    always see the full grid shape. Workload counters carry over from
//!    earlier runs; callers restore caps with
//!    [`ProfessorCatalog::reset_workloads`].
//! 3. For each cohort, build one professor queue in catalog order and run
//!    the [`DaySlotAllocator`] for `lecture_index in 0..lectures_per_day`.
//!    The queue persists across lecture indices of that cohort.
//!
//! Cohorts processed earlier constrain later ones; nothing is revisited.
//!
//! # Complexity
//! O(years × lectures_per_day × max_attempts × years).

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{
    DaySlotAllocator, ProfessorQueue, ProfessorTimetable, RescheduleReport, RescheduleService,
    ScheduleScore,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{DepartmentSettings, ProfessorCatalog, ScheduleGrid, Weekday, Year};
use crate::validation::{validate_input, ValidationResult};

/// Totals of one full run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Cohorts scheduled.
    pub years: usize,
    /// Slots holding a lecture.
    pub committed: usize,
    /// Slots holding the empty marker.
    pub empty: usize,
    /// Queue turns spent across all allocations.
    pub attempts: usize,
    /// `(year, lecture_index)` allocations cut short by the attempt bound.
    pub exhausted: usize,
}

/// Timetabling engine.
///
/// Owns the catalog, configuration and the grid of the latest run. Every
/// mutating operation takes `&mut self`, so a run and a reschedule can
/// never interleave on one engine.
///
/// # Example
///
/// ```
/// use class_sync::config::EngineConfig;
/// use class_sync::models::{DepartmentSettings, ProfessorCatalog, SubjectAssignment, Year};
/// use class_sync::scheduler::ScheduleEngine;
///
/// let mut catalog = ProfessorCatalog::new();
/// catalog.add_assignment("P", Year::new("FY", "IT"), SubjectAssignment::theory("Maths"));
/// let config = EngineConfig::default()
///     .with_department("IT", DepartmentSettings::from_hhmm("09:00", "10:00", 20).unwrap());
///
/// let mut engine = ScheduleEngine::new(catalog, config);
/// let summary = engine.run().unwrap();
/// assert_eq!(summary.committed, 18);
/// assert_eq!(engine.score().score_percent(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    catalog: ProfessorCatalog,
    config: EngineConfig,
    grid: ScheduleGrid,
}

impl ScheduleEngine {
    /// Creates an engine with an empty grid.
    pub fn new(catalog: ProfessorCatalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            grid: ScheduleGrid::new(),
        }
    }

    pub fn catalog(&self) -> &ProfessorCatalog {
        &self.catalog
    }

    /// Mutable catalog, for edits between runs.
    pub fn catalog_mut(&mut self) -> &mut ProfessorCatalog {
        &mut self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Grid of the latest run (empty before the first run).
    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    /// Splits the engine into catalog, configuration and grid.
    pub fn into_parts(self) -> (ProfessorCatalog, EngineConfig, ScheduleGrid) {
        (self.catalog, self.config, self.grid)
    }

    /// Timing settings of a cohort's department.
    pub fn department_settings(&self, year: &Year) -> Result<&DepartmentSettings> {
        self.config
            .departments
            .get(year.department())
            .ok_or_else(|| EngineError::MissingDepartment {
                year: year.clone(),
                department: year.department().to_string(),
            })
    }

    /// Lectures per day of a cohort.
    pub fn lectures_per_day(&self, year: &Year) -> Result<usize> {
        Ok(self.department_settings(year)?.lectures_per_day())
    }

    /// Checks catalog and department settings for structural problems.
    pub fn validate(&self) -> ValidationResult {
        validate_input(&self.catalog, &self.config.departments)
    }

    /// Generates a fresh weekly timetable, replacing the previous grid.
    ///
    /// Workload consumed by earlier runs stays consumed.
    ///
    /// # Errors
    /// [`EngineError::MissingDepartment`] if some cohort's department has
    /// no settings. The previous grid is kept in that case.
    #[instrument(skip(self), fields(professors = self.catalog.len()))]
    pub fn run(&mut self) -> Result<RunSummary> {
        let years = self.catalog.years();
        let mut plan = Vec::with_capacity(years.len());
        for year in &years {
            plan.push((year, self.department_settings(year)?.clone()));
        }

        self.grid = ScheduleGrid::with_years(&years);

        let mut summary = RunSummary {
            years: years.len(),
            ..RunSummary::default()
        };
        for (year, settings) in plan {
            let mut queue = ProfessorQueue::new(self.catalog.professors_for_year(year));
            let allocator = DaySlotAllocator::new(year, &settings, &self.config.policy);
            let lectures = settings.lectures_per_day();
            debug!(%year, lectures, queue = queue.len(), "scheduling year");

            for lecture_index in 0..lectures {
                let outcome =
                    allocator.allocate(lecture_index, &mut queue, &mut self.catalog, &mut self.grid);
                summary.committed += outcome.committed;
                summary.empty += outcome.empty;
                summary.attempts += outcome.attempts;
                if outcome.exhausted() {
                    summary.exhausted += 1;
                }
            }
        }

        info!(
            years = summary.years,
            committed = summary.committed,
            empty = summary.empty,
            exhausted = summary.exhausted,
            "timetable generated"
        );
        Ok(summary)
    }

    /// Hands every slot of `professor` on `day` to a free professor.
    ///
    /// See [`RescheduleService`] for the replacement rule.
    pub fn reschedule(&mut self, professor: &str, day: Weekday) -> Result<RescheduleReport> {
        RescheduleService::new(&mut self.catalog, &mut self.grid).reschedule(professor, day)
    }

    /// Score of the current grid.
    pub fn score(&self) -> ScheduleScore {
        ScheduleScore::calculate(&self.grid)
    }

    /// Weekly view of one professor over the current grid.
    ///
    /// Rows are as long as the longest day among the professor's
    /// departments that have settings.
    pub fn professor_timetable(&self, professor: &str) -> Result<ProfessorTimetable> {
        let p = self
            .catalog
            .professor(professor)
            .ok_or_else(|| EngineError::UnknownProfessor(professor.to_string()))?;
        let slots_per_day = p
            .departments()
            .filter_map(|d| self.config.departments.get(d))
            .map(DepartmentSettings::lectures_per_day)
            .max()
            .unwrap_or(0);
        Ok(ProfessorTimetable::build(professor, &self.grid, slots_per_day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocationPolicy;
    use crate::models::SubjectAssignment;

    fn it_config() -> EngineConfig {
        EngineConfig::default()
            .with_department("IT", DepartmentSettings::from_hhmm("09:00", "10:00", 20).unwrap())
    }

    fn fy() -> Year {
        Year::new("FY", "IT")
    }

    #[test]
    fn test_single_professor_fills_week() {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("P", fy(), SubjectAssignment::theory("Maths"));
        let mut engine = ScheduleEngine::new(catalog, it_config());

        let summary = engine.run().unwrap();
        assert_eq!(summary.years, 1);
        assert_eq!(summary.committed, 18);
        assert_eq!(summary.empty, 0);
        for (_, _, _, slot) in engine.grid().iter() {
            assert_eq!(slot.subject_label(), "Maths");
            assert_eq!(slot.kind_label(), "Theory");
            assert_eq!(slot.professor_label(), "P");
        }
    }

    #[test]
    fn test_missing_department_is_error() {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("P", Year::new("FY", "CS"), SubjectAssignment::theory("Maths"));
        let mut engine = ScheduleEngine::new(catalog, it_config());

        let err = engine.run().unwrap_err();
        assert!(matches!(err, EngineError::MissingDepartment { ref department, .. } if department == "CS"));
        assert_eq!(engine.grid().slot_count(), 0);
    }

    #[test]
    fn test_registered_year_without_professors() {
        let mut catalog = ProfessorCatalog::new();
        catalog.register_year(fy());
        let mut engine = ScheduleEngine::new(catalog, it_config());

        let summary = engine.run().unwrap();
        assert_eq!(summary.empty, 18);
        assert_eq!(engine.score().score_percent(), 0.0);
    }

    #[test]
    fn test_rerun_keeps_consumed_workload() {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("P", fy(), SubjectAssignment::theory("Maths").with_workload(2));
        let config = it_config().with_policy(AllocationPolicy::with_max_attempts(10));
        let mut engine = ScheduleEngine::new(catalog, config);

        let first = engine.run().unwrap();
        assert_eq!(first.committed, 2);

        // Caps are spent; a second run has nothing left to place
        let second = engine.run().unwrap();
        assert_eq!(second.committed, 0);
        assert_eq!(second.empty, 18);
        assert_eq!(engine.grid().slot_count(), 18);

        // Explicit reset restores the week
        engine.catalog_mut().reset_workloads();
        let third = engine.run().unwrap();
        assert_eq!(third, first);
    }

    #[test]
    fn test_queue_persists_across_lecture_indices() {
        let mut catalog = ProfessorCatalog::new();
        for (name, subject) in [("A", "Maths"), ("B", "Physics"), ("C", "Chemistry"), ("D", "Biology")] {
            catalog.add_assignment(name, fy(), SubjectAssignment::theory(subject));
        }
        let mut engine = ScheduleEngine::new(catalog, it_config());
        engine.run().unwrap();

        let professors_at = |idx: usize| -> Vec<String> {
            Weekday::ALL
                .iter()
                .map(|d| engine.grid().slot(&fy(), *d, idx).unwrap().professor_label())
                .collect()
        };
        assert_eq!(professors_at(0), vec!["A", "B", "C", "D", "A", "B"]);
        // Six rotations leave C at the head for index 1
        assert_eq!(professors_at(1), vec!["C", "D", "A", "B", "C", "D"]);
        // A already taught Monday, so index 2 opens with B
        assert_eq!(professors_at(2), vec!["B", "C", "D", "A", "B", "C"]);
    }

    #[test]
    fn test_professor_timetable() {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("P", fy(), SubjectAssignment::theory("Maths"));
        let mut engine = ScheduleEngine::new(catalog, it_config());
        engine.run().unwrap();

        let view = engine.professor_timetable("P").unwrap();
        assert_eq!(view.teaching_count(), 18);
        assert_eq!(view.days[&Weekday::Monday].len(), 3);
        assert!(matches!(
            engine.professor_timetable("Nobody"),
            Err(EngineError::UnknownProfessor(_))
        ));
    }

    #[test]
    fn test_reschedule_through_engine() {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("A", fy(), SubjectAssignment::theory("Maths").with_workload(3));
        catalog.add_assignment("B", fy(), SubjectAssignment::theory("Physics"));
        let mut engine = ScheduleEngine::new(catalog, it_config());
        engine.run().unwrap();

        let report = engine.reschedule("A", Weekday::Monday).unwrap();
        assert!(report.is_complete());
        assert!(engine.grid().day(&fy(), Weekday::Monday).iter().all(|s| !s.teaches("A")));
        assert!(engine.grid().conflicts().is_empty());
    }
}
