//! Professor and subject-assignment model.
//!
//! A professor teaches an ordered list of subjects to each cohort. The
//! order of that list is significant: subject rotation always takes the
//! first entry of the requested type and moves it to the tail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Year;

/// Kind of lecture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectType {
    /// Classroom lecture.
    Theory,
    /// Lab session, preferred in practical slots.
    Practical,
}

impl SubjectType {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SubjectType::Theory => "Theory",
            SubjectType::Practical => "Practical",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("theory") => Ok(SubjectType::Theory),
            t if t.eq_ignore_ascii_case("practical") => Ok(SubjectType::Practical),
            other => Err(other.to_string()),
        }
    }
}

/// Another professor's subject taught jointly in the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoTeacher {
    /// Co-teaching professor.
    pub professor: String,
    /// Subject as taught by that professor.
    pub subject: String,
}

impl CoTeacher {
    pub fn new(professor: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            professor: professor.into(),
            subject: subject.into(),
        }
    }
}

/// One subject a professor teaches to one cohort.
///
/// # Workload
/// `workload` is the weekly session cap (`None` = unbounded). `consumed`
/// counts sessions committed against it; the remaining capacity is
/// `workload - consumed` and never drops below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAssignment {
    /// Subject name.
    #[serde(rename = "Subject")]
    pub subject: String,
    /// Session type.
    #[serde(rename = "Type")]
    pub kind: SubjectType,
    /// Weekly session cap.
    #[serde(rename = "Workload", default, skip_serializing_if = "Option::is_none")]
    pub workload: Option<u32>,
    /// Sessions committed against the cap.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub consumed: u32,
    /// Co-taught counterparts (paired/optional subjects).
    #[serde(rename = "Options", default, skip_serializing_if = "Vec::is_empty")]
    pub pairings: Vec<CoTeacher>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl SubjectAssignment {
    /// Creates an uncapped, unpaired assignment.
    pub fn new(subject: impl Into<String>, kind: SubjectType) -> Self {
        Self {
            subject: subject.into(),
            kind,
            workload: None,
            consumed: 0,
            pairings: Vec::new(),
        }
    }

    /// Shorthand for a theory assignment.
    pub fn theory(subject: impl Into<String>) -> Self {
        Self::new(subject, SubjectType::Theory)
    }

    /// Shorthand for a practical assignment.
    pub fn practical(subject: impl Into<String>) -> Self {
        Self::new(subject, SubjectType::Practical)
    }

    /// Sets the weekly session cap.
    pub fn with_workload(mut self, cap: u32) -> Self {
        self.workload = Some(cap);
        self
    }

    /// Adds a co-teaching counterpart.
    pub fn with_pairing(mut self, professor: impl Into<String>, subject: impl Into<String>) -> Self {
        self.pairings.push(CoTeacher::new(professor, subject));
        self
    }

    /// Whether this entry is `(subject, kind)`.
    #[inline]
    pub fn matches(&self, subject: &str, kind: SubjectType) -> bool {
        self.kind == kind && self.subject == subject
    }

    /// Remaining sessions, `None` if uncapped.
    pub fn remaining(&self) -> Option<u32> {
        self.workload.map(|cap| cap.saturating_sub(self.consumed))
    }

    /// Whether another session may be committed.
    pub fn has_capacity(&self) -> bool {
        self.remaining().map_or(true, |left| left > 0)
    }

    /// Records one committed session.
    ///
    /// Only mutates a capped entry with capacity left; returns whether
    /// the counter moved.
    pub fn consume(&mut self) -> bool {
        match self.remaining() {
            Some(left) if left > 0 => {
                self.consumed += 1;
                true
            }
            _ => false,
        }
    }

    /// Whether this subject is co-taught.
    pub fn is_paired(&self) -> bool {
        !self.pairings.is_empty()
    }
}

/// A professor and the subjects they teach per cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Unique professor name.
    pub name: String,
    /// Ordered subject list per cohort.
    pub years: BTreeMap<Year, Vec<SubjectAssignment>>,
}

impl Professor {
    /// Creates a professor with no assignments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            years: BTreeMap::new(),
        }
    }

    /// Appends an assignment for a cohort.
    pub fn with_assignment(mut self, year: Year, assignment: SubjectAssignment) -> Self {
        self.years.entry(year).or_default().push(assignment);
        self
    }

    /// Whether this professor teaches the cohort.
    pub fn teaches(&self, year: &Year) -> bool {
        self.years.contains_key(year)
    }

    /// Subjects taught to a cohort, in rotation order.
    pub fn subjects(&self, year: &Year) -> &[SubjectAssignment] {
        self.years.get(year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds the entry for `(subject, kind)` in a cohort.
    ///
    /// With duplicate entries the one nearest the tail wins, which is the
    /// entry [`ProfessorCatalog::next_subject`] just rotated.
    ///
    /// [`ProfessorCatalog::next_subject`]: super::ProfessorCatalog::next_subject
    pub fn assignment(&self, year: &Year, subject: &str, kind: SubjectType) -> Option<&SubjectAssignment> {
        self.subjects(year).iter().rev().find(|a| a.matches(subject, kind))
    }

    /// Mutable form of [`Professor::assignment`].
    pub fn assignment_mut(
        &mut self,
        year: &Year,
        subject: &str,
        kind: SubjectType,
    ) -> Option<&mut SubjectAssignment> {
        self.years
            .get_mut(year)?
            .iter_mut()
            .rev()
            .find(|a| a.matches(subject, kind))
    }

    /// Departments this professor teaches in.
    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(Year::department)
    }
}
