//! Professor catalog.
//!
//! The catalog is the single source of teaching data: which professor
//! teaches which subjects to which cohort, their workload caps, and their
//! pairing links. It is read and mutated in place by the scheduler
//! (subject rotation and workload bookkeeping).
//!
//! # Ordering
//! Professors keep insertion order. That order seeds each cohort's
//! professor queue and decides which available professor is picked first
//! during rescheduling, so it is part of the observable behaviour.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{CoTeacher, Professor, SubjectAssignment, SubjectType, Year};
use crate::error::{EngineError, Result};

/// Ordered collection of professors and their teaching assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorCatalog {
    professors: Vec<Professor>,
    /// Cohorts declared without requiring any professor.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    registered_years: BTreeSet<Year>,
}

impl ProfessorCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a professor (builder form).
    pub fn with_professor(mut self, professor: Professor) -> Self {
        self.add_professor(professor);
        self
    }

    /// Adds a professor, merging assignments if the name already exists.
    pub fn add_professor(&mut self, professor: Professor) {
        if let Some(existing) = self.professor_mut(&professor.name) {
            for (year, subjects) in professor.years {
                existing.years.entry(year).or_default().extend(subjects);
            }
            return;
        }
        self.professors.push(professor);
    }

    /// Appends an assignment, creating the professor and cohort as needed.
    pub fn add_assignment(&mut self, professor: &str, year: Year, assignment: SubjectAssignment) {
        if self.professor(professor).is_none() {
            self.professors.push(Professor::new(professor));
        }
        if let Some(p) = self.professor_mut(professor) {
            p.years.entry(year).or_default().push(assignment);
        }
    }

    /// Removes the `(subject, kind)` entry from a professor's cohort list.
    pub fn remove_assignment(
        &mut self,
        professor: &str,
        year: &Year,
        subject: &str,
        kind: SubjectType,
    ) -> Option<SubjectAssignment> {
        let subjects = self.professor_mut(professor)?.years.get_mut(year)?;
        let pos = subjects.iter().position(|a| a.matches(subject, kind))?;
        Some(subjects.remove(pos))
    }

    /// Links two subjects as co-taught in a cohort, in both directions.
    ///
    /// Every entry named `subject` (of either type) on each side receives
    /// the counterpart; an existing link to the same professor is replaced.
    pub fn link_pair(&mut self, year: &Year, first: (&str, &str), second: (&str, &str)) -> Result<()> {
        for (professor, subject) in [first, second] {
            let p = self
                .professor(professor)
                .ok_or_else(|| EngineError::UnknownProfessor(professor.to_string()))?;
            if !p.subjects(year).iter().any(|a| a.subject == subject) {
                return Err(EngineError::UnknownSubject {
                    professor: professor.to_string(),
                    year: year.clone(),
                    subject: subject.to_string(),
                });
            }
        }

        self.attach_pairing(year, first, second);
        self.attach_pairing(year, second, first);
        Ok(())
    }

    fn attach_pairing(&mut self, year: &Year, own: (&str, &str), other: (&str, &str)) {
        let Some(subjects) = self
            .professor_mut(own.0)
            .and_then(|p| p.years.get_mut(year))
        else {
            return;
        };
        for entry in subjects.iter_mut().filter(|a| a.subject == own.1) {
            entry.pairings.retain(|c| c.professor != other.0);
            entry.pairings.push(CoTeacher::new(other.0, other.1));
        }
    }

    /// Declares a cohort even if no professor teaches it yet.
    pub fn register_year(&mut self, year: Year) {
        self.registered_years.insert(year);
    }

    /// Looks up a professor.
    pub fn professor(&self, name: &str) -> Option<&Professor> {
        self.professors.iter().find(|p| p.name == name)
    }

    /// Mutable professor lookup.
    pub fn professor_mut(&mut self, name: &str) -> Option<&mut Professor> {
        self.professors.iter_mut().find(|p| p.name == name)
    }

    /// Whether the catalog knows this professor.
    pub fn contains(&self, name: &str) -> bool {
        self.professor(name).is_some()
    }

    /// All professors in catalog order.
    pub fn professors(&self) -> &[Professor] {
        &self.professors
    }

    /// Professor names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.professors.iter().map(|p| p.name.as_str())
    }

    /// Sorted union of registered cohorts and cohorts with assignments.
    pub fn years(&self) -> Vec<Year> {
        let mut years = self.registered_years.clone();
        for p in &self.professors {
            years.extend(p.years.keys().cloned());
        }
        years.into_iter().collect()
    }

    /// Professors teaching a cohort, in catalog order.
    pub fn professors_for_year(&self, year: &Year) -> Vec<String> {
        self.professors
            .iter()
            .filter(|p| p.teaches(year))
            .map(|p| p.name.clone())
            .collect()
    }

    /// Professors teaching any cohort of a department, sorted.
    pub fn professors_by_department(&self, department: &str) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .professors
            .iter()
            .filter(|p| p.departments().any(|d| d == department))
            .map(|p| p.name.as_str())
            .collect();
        names.into_iter().collect()
    }

    /// Distinct departments referenced by any cohort, sorted.
    pub fn departments(&self) -> Vec<String> {
        let departments: BTreeSet<String> = self
            .years()
            .iter()
            .map(|y| y.department().to_string())
            .collect();
        departments.into_iter().collect()
    }

    /// Next subject of `kind` for a professor and cohort (round-robin).
    ///
    /// Takes the first entry of that type and moves it to the tail of the
    /// professor's list, so repeated calls cycle through every same-type
    /// subject. Entries of the other type keep their relative order.
    pub fn next_subject(&mut self, professor: &str, year: &Year, kind: SubjectType) -> Option<String> {
        let subjects = self.professor_mut(professor)?.years.get_mut(year)?;
        let pos = subjects.iter().position(|a| a.kind == kind)?;
        let entry = subjects.remove(pos);
        let subject = entry.subject.clone();
        subjects.push(entry);
        Some(subject)
    }

    /// Restores every capped assignment to its full weekly cap.
    pub fn reset_workloads(&mut self) {
        for subjects in self.professors.iter_mut().flat_map(|p| p.years.values_mut()) {
            for entry in subjects.iter_mut() {
                entry.consumed = 0;
            }
        }
    }

    /// Removes every professor. Registered cohorts are kept.
    pub fn clear(&mut self) {
        self.professors.clear();
    }

    /// Number of professors.
    pub fn len(&self) -> usize {
        self.professors.len()
    }

    /// Whether the catalog has no professors.
    pub fn is_empty(&self) -> bool {
        self.professors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fy_it() -> Year {
        Year::new("FY", "IT")
    }

    fn sample_catalog() -> ProfessorCatalog {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("P", fy_it(), SubjectAssignment::theory("Maths"));
        catalog.add_assignment("P", fy_it(), SubjectAssignment::practical("Physics Lab"));
        catalog.add_assignment("P", fy_it(), SubjectAssignment::theory("Physics"));
        catalog.add_assignment("Q", fy_it(), SubjectAssignment::theory("English"));
        catalog.add_assignment("Q", Year::new("SY", "CS"), SubjectAssignment::theory("Algorithms"));
        catalog
    }

    #[test]
    fn test_insertion_order_kept() {
        let catalog = sample_catalog();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["P", "Q"]);
        assert_eq!(catalog.professors_for_year(&fy_it()), vec!["P", "Q"]);
        assert_eq!(catalog.professors_for_year(&Year::new("SY", "CS")), vec!["Q"]);
    }

    #[test]
    fn test_next_subject_round_robin() {
        let mut catalog = sample_catalog();
        let year = fy_it();

        assert_eq!(catalog.next_subject("P", &year, SubjectType::Theory).as_deref(), Some("Maths"));
        assert_eq!(catalog.next_subject("P", &year, SubjectType::Theory).as_deref(), Some("Physics"));
        assert_eq!(catalog.next_subject("P", &year, SubjectType::Theory).as_deref(), Some("Maths"));

        let order: Vec<&str> = catalog.professor("P").unwrap().subjects(&year)
            .iter().map(|a| a.subject.as_str()).collect();
        // Practical entry untouched by theory rotation except for shifting position
        assert_eq!(order, vec!["Physics Lab", "Physics", "Maths"]);
    }

    #[test]
    fn test_next_subject_missing() {
        let mut catalog = sample_catalog();
        assert!(catalog.next_subject("Q", &fy_it(), SubjectType::Practical).is_none());
        assert!(catalog.next_subject("Nobody", &fy_it(), SubjectType::Theory).is_none());
        assert!(catalog.next_subject("P", &Year::new("TY", "IT"), SubjectType::Theory).is_none());
    }

    #[test]
    fn test_years_include_registered() {
        let mut catalog = sample_catalog();
        catalog.register_year(Year::new("TY", "IT"));
        let years: Vec<String> = catalog.years().iter().map(|y| y.to_string()).collect();
        assert_eq!(years, vec!["FY IT", "SY CS", "TY IT"]);
        assert_eq!(catalog.departments(), vec!["CS", "IT"]);
    }

    #[test]
    fn test_professors_by_department() {
        let catalog = sample_catalog();
        assert_eq!(catalog.professors_by_department("IT"), vec!["P", "Q"]);
        assert_eq!(catalog.professors_by_department("CS"), vec!["Q"]);
        assert!(catalog.professors_by_department("ME").is_empty());
    }

    #[test]
    fn test_link_pair_bidirectional() {
        let mut catalog = sample_catalog();
        let year = fy_it();
        catalog.link_pair(&year, ("P", "Maths"), ("Q", "English")).unwrap();

        let p = catalog.professor("P").unwrap();
        let maths = p.assignment(&year, "Maths", SubjectType::Theory).unwrap();
        assert_eq!(maths.pairings.len(), 1);
        assert_eq!(maths.pairings[0].professor, "Q");
        assert_eq!(maths.pairings[0].subject, "English");

        let q = catalog.professor("Q").unwrap();
        let english = q.assignment(&year, "English", SubjectType::Theory).unwrap();
        assert_eq!(english.pairings[0].professor, "P");

        // Re-linking replaces rather than duplicates
        catalog.link_pair(&year, ("P", "Maths"), ("Q", "English")).unwrap();
        let p = catalog.professor("P").unwrap();
        assert_eq!(p.assignment(&year, "Maths", SubjectType::Theory).unwrap().pairings.len(), 1);
    }

    #[test]
    fn test_link_pair_unknown() {
        let mut catalog = sample_catalog();
        let year = fy_it();
        assert!(matches!(
            catalog.link_pair(&year, ("P", "Maths"), ("Z", "Art")),
            Err(EngineError::UnknownProfessor(_))
        ));
        assert!(matches!(
            catalog.link_pair(&year, ("P", "Maths"), ("Q", "Art")),
            Err(EngineError::UnknownSubject { .. })
        ));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut catalog = sample_catalog();
        let removed = catalog.remove_assignment("P", &fy_it(), "Physics", SubjectType::Theory);
        assert_eq!(removed.map(|a| a.subject), Some("Physics".to_string()));
        assert!(catalog.remove_assignment("P", &fy_it(), "Physics", SubjectType::Theory).is_none());

        catalog.register_year(Year::new("TY", "IT"));
        catalog.clear();
        assert!(catalog.is_empty());
        assert_eq!(catalog.years(), vec![Year::new("TY", "IT")]);
    }

    #[test]
    fn test_add_professor_merges() {
        let mut catalog = sample_catalog();
        catalog.add_professor(
            Professor::new("P").with_assignment(fy_it(), SubjectAssignment::theory("Chemistry")),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.professor("P").unwrap().subjects(&fy_it()).len(), 4);
    }

    #[test]
    fn test_reset_workloads() {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("P", fy_it(), SubjectAssignment::theory("Maths").with_workload(1));
        let entry = catalog
            .professor_mut("P")
            .and_then(|p| p.assignment_mut(&fy_it(), "Maths", SubjectType::Theory))
            .unwrap();
        assert!(entry.consume());
        assert!(!entry.has_capacity());

        catalog.reset_workloads();
        let entry = catalog.professor("P").unwrap().assignment(&fy_it(), "Maths", SubjectType::Theory).unwrap();
        assert_eq!(entry.remaining(), Some(1));
    }
}
