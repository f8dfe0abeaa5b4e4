//! Timetable quality score.
//!
//! The score is the share of filled slots:
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total slots | Every `(year, day, lecture_index)` cell |
//! | Empty slots | Cells holding the empty marker |
//! | Score | `(total - empty) / total × 100`, 0 when total is 0 |
//!
//! The same triple is reported per cohort. Computing a score never
//! touches the grid, so repeated calls return identical values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ScheduleGrid, Year};

/// Filled/empty counts for one scope (whole grid or one cohort).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotCounts {
    /// Cells holding the empty marker.
    pub empty_slots: usize,
    /// All cells.
    pub total_slots: usize,
    /// Filled share in percent (0.0..=100.0).
    pub score_percent: f64,
}

impl SlotCounts {
    fn new(empty_slots: usize, total_slots: usize) -> Self {
        let score_percent = if total_slots == 0 {
            0.0
        } else {
            (total_slots - empty_slots) as f64 / total_slots as f64 * 100.0
        };
        Self {
            empty_slots,
            total_slots,
            score_percent,
        }
    }

    /// Filled cells.
    pub fn filled_slots(&self) -> usize {
        self.total_slots - self.empty_slots
    }
}

/// Score of a whole timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleScore {
    /// Whole-grid counts.
    pub overall: SlotCounts,
    /// Per-cohort counts.
    pub by_year: BTreeMap<Year, SlotCounts>,
}

impl ScheduleScore {
    /// Scores a grid.
    pub fn calculate(grid: &ScheduleGrid) -> Self {
        let mut tallies: BTreeMap<Year, (usize, usize)> =
            grid.years().map(|y| (y.clone(), (0, 0))).collect();

        for (year, _, _, slot) in grid.iter() {
            if let Some((empty, total)) = tallies.get_mut(year) {
                *total += 1;
                if slot.is_empty() {
                    *empty += 1;
                }
            }
        }

        let (empty, total) = tallies
            .values()
            .fold((0usize, 0usize), |(e, t), &(ye, yt)| (e + ye, t + yt));
        let by_year = tallies
            .into_iter()
            .map(|(year, (e, t))| (year, SlotCounts::new(e, t)))
            .collect();

        Self {
            overall: SlotCounts::new(empty, total),
            by_year,
        }
    }

    /// Whole-grid score in percent.
    pub fn score_percent(&self) -> f64 {
        self.overall.score_percent
    }

    /// Whether the overall score reaches `min_percent`.
    pub fn meets_threshold(&self, min_percent: f64) -> bool {
        self.overall.score_percent >= min_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lecture, LectureSlot, SubjectType, Weekday};

    fn fy() -> Year {
        Year::new("FY", "IT")
    }

    #[test]
    fn test_empty_grid_scores_zero() {
        let score = ScheduleScore::calculate(&ScheduleGrid::new());
        assert_eq!(score.overall.total_slots, 0);
        assert_eq!(score.score_percent(), 0.0);
        assert!(score.by_year.is_empty());
    }

    #[test]
    fn test_partial_fill() {
        let sy = Year::new("SY", "IT");
        let mut grid = ScheduleGrid::with_years(&[fy(), sy.clone()]);
        for day in Weekday::ALL {
            grid.push(&fy(), day, Lecture::single("P", "Maths", SubjectType::Theory).into());
            grid.push(&sy, day, LectureSlot::Empty);
        }

        let score = ScheduleScore::calculate(&grid);
        assert_eq!(score.overall.total_slots, 12);
        assert_eq!(score.overall.empty_slots, 6);
        assert_eq!(score.overall.filled_slots(), 6);
        assert!((score.score_percent() - 50.0).abs() < 1e-10);
        assert!((score.by_year[&fy()].score_percent - 100.0).abs() < 1e-10);
        assert_eq!(score.by_year[&sy].score_percent, 0.0);
        assert!(score.meets_threshold(50.0));
        assert!(!score.meets_threshold(50.1));
    }

    #[test]
    fn test_idempotent() {
        let mut grid = ScheduleGrid::with_years(&[fy()]);
        grid.push(&fy(), Weekday::Monday, LectureSlot::Empty);
        grid.push(&fy(), Weekday::Monday, Lecture::single("P", "Maths", SubjectType::Theory).into());
        let before = grid.clone();

        let a = ScheduleScore::calculate(&grid);
        let b = ScheduleScore::calculate(&grid);
        assert_eq!(a, b);
        assert_eq!(grid, before);
    }
}
