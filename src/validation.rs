//! Input validation for timetabling runs.
//!
//! Checks the structural integrity of the catalog and the department
//! settings before scheduling. Detects:
//! - Cohorts whose department has no settings
//! - Degenerate teaching windows (zero lecture length, end not after start)
//! - Practical slot indices that never occur in a day
//! - Pairing links to unknown professors or missing partner subjects
//! - Empty or duplicate subject entries
//!
//! A missing department also stops a run with
//! [`crate::error::EngineError::MissingDepartment`]. The other findings
//! point at data that would silently produce empty slots.

use std::collections::{BTreeMap, HashSet};

use crate::models::{DepartmentSettings, ProfessorCatalog};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A cohort's department has no settings.
    MissingDepartment,
    /// Lecture length is zero.
    InvalidDuration,
    /// End of day is not after its start.
    InvalidTimeWindow,
    /// A practical slot index is at or past `lectures_per_day`.
    InvalidPracticalSlot,
    /// A pairing names a professor the catalog does not know.
    UnknownPairingProfessor,
    /// A pairing partner has no matching subject for the cohort.
    MissingPairedSubject,
    /// A subject entry has an empty name.
    EmptySubject,
    /// The same `(subject, type)` appears twice for one professor and cohort.
    DuplicateSubject,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalog against department settings.
///
/// Checks:
/// 1. Every cohort's department has settings
/// 2. Every department has a non-zero lecture length and a non-empty window
/// 3. Every practical slot index is below `lectures_per_day`
/// 4. Every subject entry has a name and is unique per professor and cohort
/// 5. Every pairing names a known professor that teaches the partner subject
///    (same type) to the same cohort
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    catalog: &ProfessorCatalog,
    departments: &BTreeMap<String, DepartmentSettings>,
) -> ValidationResult {
    let mut errors = Vec::new();

    // Department coverage
    for year in catalog.years() {
        if !departments.contains_key(year.department()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingDepartment,
                format!("{year}: department '{}' has no settings", year.department()),
            ));
        }
    }

    // Department settings
    for (id, settings) in departments {
        if settings.lecture_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Department '{id}' has a zero-minute lecture length"),
            ));
        }
        if settings.end_time <= settings.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeWindow,
                format!(
                    "Department '{id}' ends at {} which is not after its start {}",
                    settings.end_time.format("%H:%M"),
                    settings.start_time.format("%H:%M")
                ),
            ));
        }
        let lectures = settings.lectures_per_day();
        for &slot in settings.practical_slots.iter().filter(|&&s| s >= lectures) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPracticalSlot,
                format!("Department '{id}' marks practical slot {slot} but has {lectures} lectures per day"),
            ));
        }
    }

    // Subject entries and pairings
    for professor in catalog.professors() {
        for (year, subjects) in &professor.years {
            let mut seen = HashSet::new();
            for entry in subjects {
                if entry.subject.trim().is_empty() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::EmptySubject,
                        format!("Professor '{}' has an unnamed subject for {year}", professor.name),
                    ));
                }
                if !seen.insert((entry.subject.as_str(), entry.kind)) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateSubject,
                        format!(
                            "Professor '{}' lists {} '{}' twice for {year}",
                            professor.name, entry.kind, entry.subject
                        ),
                    ));
                }

                for pairing in &entry.pairings {
                    let Some(partner) = catalog.professor(&pairing.professor) else {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownPairingProfessor,
                            format!(
                                "'{}' ({}) is paired with unknown professor '{}'",
                                entry.subject, professor.name, pairing.professor
                            ),
                        ));
                        continue;
                    };
                    if partner.assignment(year, &pairing.subject, entry.kind).is_none() {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::MissingPairedSubject,
                            format!(
                                "'{}' ({}) is paired with '{}' ({}) which is not taught to {year}",
                                entry.subject, professor.name, pairing.subject, pairing.professor
                            ),
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubjectAssignment, Year};

    fn fy() -> Year {
        Year::new("FY", "IT")
    }

    fn sample_departments() -> BTreeMap<String, DepartmentSettings> {
        let mut departments = BTreeMap::new();
        departments.insert(
            "IT".to_string(),
            DepartmentSettings::from_hhmm("09:00", "12:00", 60)
                .unwrap()
                .with_practical_slot(2),
        );
        departments
    }

    fn sample_catalog() -> ProfessorCatalog {
        let mut catalog = ProfessorCatalog::new();
        catalog.add_assignment("A", fy(), SubjectAssignment::theory("French"));
        catalog.add_assignment("B", fy(), SubjectAssignment::theory("German"));
        catalog.add_assignment("B", fy(), SubjectAssignment::practical("German Lab"));
        catalog.link_pair(&fy(), ("A", "French"), ("B", "German")).unwrap();
        catalog
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_catalog(), &sample_departments()).is_ok());
    }

    #[test]
    fn test_missing_department() {
        let mut catalog = sample_catalog();
        catalog.register_year(Year::new("FY", "CS"));
        let errors = validate_input(&catalog, &sample_departments()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingDepartment);
        assert!(errors[0].message.contains("CS"));
    }

    #[test]
    fn test_bad_department_settings() {
        let mut departments = sample_departments();
        departments.insert(
            "IT".to_string(),
            DepartmentSettings::from_hhmm("10:00", "10:00", 0)
                .unwrap()
                .with_practical_slot(0),
        );
        let found = kinds(validate_input(&sample_catalog(), &departments));
        assert!(found.contains(&ValidationErrorKind::InvalidDuration));
        assert!(found.contains(&ValidationErrorKind::InvalidTimeWindow));
        assert!(found.contains(&ValidationErrorKind::InvalidPracticalSlot));
    }

    #[test]
    fn test_practical_slot_past_day() {
        let mut departments = sample_departments();
        departments.insert(
            "IT".to_string(),
            DepartmentSettings::from_hhmm("09:00", "12:00", 60)
                .unwrap()
                .with_practical_slot(3),
        );
        assert_eq!(
            kinds(validate_input(&sample_catalog(), &departments)),
            vec![ValidationErrorKind::InvalidPracticalSlot]
        );
    }

    #[test]
    fn test_unknown_pairing_professor() {
        let mut catalog = sample_catalog();
        catalog.add_assignment("C", fy(), SubjectAssignment::theory("Art").with_pairing("Ghost", "Music"));
        assert_eq!(
            kinds(validate_input(&catalog, &sample_departments())),
            vec![ValidationErrorKind::UnknownPairingProfessor]
        );
    }

    #[test]
    fn test_missing_paired_subject() {
        let mut catalog = sample_catalog();
        catalog.add_assignment("C", fy(), SubjectAssignment::practical("Lab").with_pairing("A", "French"));
        // A teaches French as Theory only
        assert_eq!(
            kinds(validate_input(&catalog, &sample_departments())),
            vec![ValidationErrorKind::MissingPairedSubject]
        );
    }

    #[test]
    fn test_empty_and_duplicate_subjects() {
        let mut catalog = sample_catalog();
        catalog.add_assignment("C", fy(), SubjectAssignment::theory(" "));
        catalog.add_assignment("C", fy(), SubjectAssignment::theory("Maths"));
        catalog.add_assignment("C", fy(), SubjectAssignment::theory("Maths"));
        let found = kinds(validate_input(&catalog, &sample_departments()));
        assert!(found.contains(&ValidationErrorKind::EmptySubject));
        assert!(found.contains(&ValidationErrorKind::DuplicateSubject));
        assert_eq!(found.len(), 2);
    }
}
