//! Per-professor weekly view of a timetable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ScheduleGrid, Weekday, Year};

/// Label shown for lecture indices where the professor teaches nobody.
pub const FREE_SLOT_LABEL: &str = "Free Slot";

/// Which cohort a professor teaches at each `(day, lecture_index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorTimetable {
    pub professor: String,
    /// Day → one entry per lecture index, `None` when free.
    pub days: BTreeMap<Weekday, Vec<Option<Year>>>,
}

impl ProfessorTimetable {
    /// Builds the view from a grid.
    ///
    /// Every day gets `slots_per_day` entries, or more if the professor
    /// teaches past that index in some cohort.
    pub fn build(professor: &str, grid: &ScheduleGrid, slots_per_day: usize) -> Self {
        let days = Weekday::ALL
            .iter()
            .map(|&day| {
                let taught = grid.lecture_indices(professor, day);
                let len = taught
                    .values()
                    .flatten()
                    .map(|idx| idx + 1)
                    .max()
                    .unwrap_or(0)
                    .max(slots_per_day);
                let mut row = vec![None; len];
                for (year, indices) in taught {
                    for idx in indices {
                        row[idx] = Some(year.clone());
                    }
                }
                (day, row)
            })
            .collect();

        Self {
            professor: professor.to_string(),
            days,
        }
    }

    /// Cohort taught at a coordinate, if any.
    pub fn year_at(&self, day: Weekday, lecture_index: usize) -> Option<&Year> {
        self.days.get(&day)?.get(lecture_index)?.as_ref()
    }

    /// Display label of a coordinate: the cohort or [`FREE_SLOT_LABEL`].
    pub fn label(&self, day: Weekday, lecture_index: usize) -> String {
        self.year_at(day, lecture_index)
            .map_or_else(|| FREE_SLOT_LABEL.to_string(), Year::to_string)
    }

    /// Number of lectures taught in the week.
    pub fn teaching_count(&self) -> usize {
        self.days.values().flatten().filter(|y| y.is_some()).count()
    }

    /// Number of free lecture indices in the week.
    pub fn free_count(&self) -> usize {
        self.days.values().flatten().filter(|y| y.is_none()).count()
    }
}
