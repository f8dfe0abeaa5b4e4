//! Timetable (solution) model.
//!
//! A schedule grid maps every cohort to six weekday lecture lists. Each
//! list entry is one lecture slot: either an explicit empty marker or a
//! lecture taught by one professor (ordinary session) or several
//! professors at once (co-taught session).
//!
//! # Shape
//! After a completed run every `(year, day)` list holds exactly
//! `lectures_per_day` entries for the cohort's department. Lecture index
//! `i` of one day lines up with index `i` of every other cohort's day,
//! which is what makes cross-cohort conflict checks possible.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{SubjectType, Weekday, Year};

/// Label shown for unfilled slots.
pub const EMPTY_SLOT_LABEL: &str = "Empty Slot";

/// One professor teaching one subject inside a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teaching {
    /// Teaching professor.
    pub professor: String,
    /// Subject as taught by that professor.
    pub subject: String,
}

impl Teaching {
    pub fn new(professor: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            professor: professor.into(),
            subject: subject.into(),
        }
    }
}

/// A committed lecture.
///
/// The first teaching is the professor whose queue turn produced the
/// slot; co-teachers follow in pairing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Session type.
    pub kind: SubjectType,
    /// Professors and their subjects, lead first.
    pub teachings: Vec<Teaching>,
    /// Set when the slot was replaced after the full run.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rescheduled: bool,
}

impl Lecture {
    /// Single-professor lecture.
    pub fn single(professor: impl Into<String>, subject: impl Into<String>, kind: SubjectType) -> Self {
        Self {
            kind,
            teachings: vec![Teaching::new(professor, subject)],
            rescheduled: false,
        }
    }

    /// Co-taught lecture: the lead teaching plus its co-teachers.
    pub fn paired(lead: Teaching, co_teachers: impl IntoIterator<Item = Teaching>, kind: SubjectType) -> Self {
        let mut teachings = vec![lead];
        teachings.extend(co_teachers);
        Self {
            kind,
            teachings,
            rescheduled: false,
        }
    }

    /// Marks the lecture as a post-run replacement.
    pub fn into_rescheduled(mut self) -> Self {
        self.rescheduled = true;
        self
    }

    /// Whether more than one professor teaches this slot.
    pub fn is_paired(&self) -> bool {
        self.teachings.len() > 1
    }

    /// Whether `professor` teaches in this slot.
    pub fn teaches(&self, professor: &str) -> bool {
        self.teachings.iter().any(|t| t.professor == professor)
    }

    /// Subjects joined with `" / "`.
    pub fn subject_label(&self) -> String {
        join_labels(self.teachings.iter().map(|t| t.subject.as_str()))
    }

    /// Professors joined with `" / "`.
    pub fn professor_label(&self) -> String {
        join_labels(self.teachings.iter().map(|t| t.professor.as_str()))
    }
}

fn join_labels<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" / ")
}

/// One cell of the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LectureSlot {
    /// Unfillable after exhausting allocation attempts.
    Empty,
    /// A committed lecture.
    Lecture(Lecture),
}

impl LectureSlot {
    /// Whether this is the empty marker.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, LectureSlot::Empty)
    }

    /// The committed lecture, if any.
    pub fn lecture(&self) -> Option<&Lecture> {
        match self {
            LectureSlot::Lecture(lecture) => Some(lecture),
            LectureSlot::Empty => None,
        }
    }

    /// Every professor named in the slot.
    pub fn professors(&self) -> impl Iterator<Item = &str> {
        self.lecture()
            .into_iter()
            .flat_map(|l| l.teachings.iter().map(|t| t.professor.as_str()))
    }

    /// Whether `professor` teaches in this slot.
    pub fn teaches(&self, professor: &str) -> bool {
        self.lecture().is_some_and(|l| l.teaches(professor))
    }

    /// Subject label (`"Empty Slot"` for the empty marker).
    pub fn subject_label(&self) -> String {
        self.lecture()
            .map_or_else(|| EMPTY_SLOT_LABEL.to_string(), Lecture::subject_label)
    }

    /// Type label (`"Empty Slot"` for the empty marker).
    pub fn kind_label(&self) -> &'static str {
        self.lecture().map_or(EMPTY_SLOT_LABEL, |l| l.kind.label())
    }

    /// Professor label (`"Empty Slot"` for the empty marker).
    pub fn professor_label(&self) -> String {
        self.lecture()
            .map_or_else(|| EMPTY_SLOT_LABEL.to_string(), Lecture::professor_label)
    }
}

impl From<Lecture> for LectureSlot {
    fn from(lecture: Lecture) -> Self {
        LectureSlot::Lecture(lecture)
    }
}

/// Lecture lists for the six teaching days of one cohort.
pub type WeekSchedule = BTreeMap<Weekday, Vec<LectureSlot>>;

/// A professor committed to more than one cohort at the same coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub day: Weekday,
    pub lecture_index: usize,
    pub professor: String,
    pub years: Vec<Year>,
}

/// Weekly timetable for every cohort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    years: BTreeMap<Year, WeekSchedule>,
}

impl ScheduleGrid {
    /// Creates an empty grid with no cohorts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid with empty day lists for every given cohort.
    pub fn with_years<'a>(years: impl IntoIterator<Item = &'a Year>) -> Self {
        let mut grid = Self::new();
        for year in years {
            grid.init_year(year.clone());
        }
        grid
    }

    /// Resets a cohort to six empty day lists.
    pub fn init_year(&mut self, year: Year) {
        let week = Weekday::ALL.iter().map(|d| (*d, Vec::new())).collect();
        self.years.insert(year, week);
    }

    /// Whether the cohort is present.
    pub fn contains_year(&self, year: &Year) -> bool {
        self.years.contains_key(year)
    }

    /// Cohorts in sorted order.
    pub fn years(&self) -> impl Iterator<Item = &Year> {
        self.years.keys()
    }

    /// Full week of one cohort.
    pub fn week(&self, year: &Year) -> Option<&WeekSchedule> {
        self.years.get(year)
    }

    /// Lecture list of one cohort on one day (empty if absent).
    pub fn day(&self, year: &Year, day: Weekday) -> &[LectureSlot] {
        self.years
            .get(year)
            .and_then(|week| week.get(&day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Slot at a coordinate, if the day list reaches that far.
    pub fn slot(&self, year: &Year, day: Weekday, lecture_index: usize) -> Option<&LectureSlot> {
        self.day(year, day).get(lecture_index)
    }

    /// Mutable slot at a coordinate.
    pub fn slot_mut(&mut self, year: &Year, day: Weekday, lecture_index: usize) -> Option<&mut LectureSlot> {
        self.years.get_mut(year)?.get_mut(&day)?.get_mut(lecture_index)
    }

    /// Appends a slot to a cohort's day list, creating the cohort if needed.
    pub fn push(&mut self, year: &Year, day: Weekday, slot: LectureSlot) {
        if !self.contains_year(year) {
            self.init_year(year.clone());
        }
        if let Some(list) = self.years.get_mut(year).and_then(|w| w.get_mut(&day)) {
            list.push(slot);
        }
    }

    /// Iterates `(year, day, lecture_index, slot)` in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (&Year, Weekday, usize, &LectureSlot)> {
        self.years.iter().flat_map(|(year, week)| {
            week.iter().flat_map(move |(day, slots)| {
                slots
                    .iter()
                    .enumerate()
                    .map(move |(idx, slot)| (year, *day, idx, slot))
            })
        })
    }

    /// Professors already scheduled for a cohort on a day.
    pub fn professors_on(&self, year: &Year, day: Weekday) -> BTreeSet<&str> {
        self.day(year, day)
            .iter()
            .flat_map(LectureSlot::professors)
            .collect()
    }

    /// Lecture indices where `professor` teaches on `day`, per cohort.
    ///
    /// Cohorts with no matching slot are omitted.
    pub fn lecture_indices(&self, professor: &str, day: Weekday) -> BTreeMap<Year, Vec<usize>> {
        self.years
            .keys()
            .filter_map(|year| {
                let indices: Vec<usize> = self
                    .day(year, day)
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.teaches(professor))
                    .map(|(idx, _)| idx)
                    .collect();
                (!indices.is_empty()).then(|| (year.clone(), indices))
            })
            .collect()
    }

    /// Every professor committed in two or more cohorts at one coordinate.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut seen: BTreeMap<(Weekday, usize, &str), Vec<Year>> = BTreeMap::new();
        for (year, day, idx, slot) in self.iter() {
            for professor in slot.professors() {
                seen.entry((day, idx, professor)).or_default().push(year.clone());
            }
        }
        seen.into_iter()
            .filter(|(_, years)| years.len() > 1)
            .map(|((day, lecture_index, professor), years)| Conflict {
                day,
                lecture_index,
                professor: professor.to_string(),
                years,
            })
            .collect()
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of empty-marker slots.
    pub fn empty_count(&self) -> usize {
        self.iter().filter(|(_, _, _, slot)| slot.is_empty()).count()
    }
}
