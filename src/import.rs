//! CSV catalog import.
//!
//! Reads one subject assignment per row with the headers
//!
//! | Header | Meaning |
//! |--------|---------|
//! | `Professor` | Professor name, or `A/B` for a co-taught subject |
//! | `College Year` | Year label, e.g. `FY` |
//! | `Department` | Department id, e.g. `IT` |
//! | `Subject` | Subject name, or `X/Y` matching a `A/B` professor cell |
//! | `Subject Type` | `Theory` or `Practical` |
//! | `Workload` | Optional weekly cap |
//!
//! A co-taught row gives every listed professor their own subject and
//! links them all pairwise. Every department seen gets the placeholder
//! [`DepartmentSettings::default`] so the catalog can be scheduled once
//! real timings are filled in.

use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::EngineError;
use crate::models::{DepartmentSettings, ProfessorCatalog, SubjectAssignment, SubjectType, Year};

/// Errors raised while importing a catalog.
#[derive(Debug, Error)]
pub enum ImportError {
    /// File could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV or missing header.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required cell is blank.
    #[error("line {line}: '{column}' is empty")]
    EmptyField { line: usize, column: &'static str },

    /// `Subject Type` is neither Theory nor Practical.
    #[error("line {line}: unknown subject type '{value}'")]
    InvalidSubjectType { line: usize, value: String },

    /// `Workload` is not a non-negative integer.
    #[error("line {line}: invalid workload '{value}'")]
    InvalidWorkload { line: usize, value: String },

    /// `A/B` professors with a subject cell of a different arity.
    #[error("line {line}: {professors} professors but {subjects} subjects")]
    PairArity {
        line: usize,
        professors: usize,
        subjects: usize,
    },

    /// Linking a co-taught row failed.
    #[error("line {line}: {source}")]
    Catalog {
        line: usize,
        #[source]
        source: EngineError,
    },
}

/// Result of a CSV import.
#[derive(Debug, Clone, Default)]
pub struct ImportedCatalog {
    pub catalog: ProfessorCatalog,
    /// Placeholder settings for every department seen.
    pub departments: BTreeMap<String, DepartmentSettings>,
    /// Data rows read.
    pub rows: usize,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Professor")]
    professor: String,
    #[serde(rename = "College Year")]
    college_year: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Subject Type")]
    subject_type: String,
    #[serde(rename = "Workload", default)]
    workload: String,
}

/// Reads a catalog from CSV data.
pub fn catalog_from_csv<R: Read>(reader: R) -> Result<ImportedCatalog, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut imported = ImportedCatalog::default();
    for (row_idx, result) in reader.deserialize::<CatalogRow>().enumerate() {
        // Header is line 1
        let line = row_idx + 2;
        let row = result?;
        add_row(&mut imported, row, line)?;
        imported.rows += 1;
    }

    info!(
        rows = imported.rows,
        professors = imported.catalog.len(),
        departments = imported.departments.len(),
        "catalog imported"
    );
    Ok(imported)
}

/// Reads a catalog from a CSV file.
pub fn catalog_from_path(path: impl AsRef<Path>) -> Result<ImportedCatalog, ImportError> {
    let file = File::open(path.as_ref())?;
    catalog_from_csv(file)
}

fn add_row(imported: &mut ImportedCatalog, row: CatalogRow, line: usize) -> Result<(), ImportError> {
    for (column, value) in [
        ("Professor", &row.professor),
        ("College Year", &row.college_year),
        ("Department", &row.department),
        ("Subject", &row.subject),
    ] {
        if value.is_empty() {
            return Err(ImportError::EmptyField { line, column });
        }
    }

    let kind: SubjectType = row
        .subject_type
        .parse()
        .map_err(|value| ImportError::InvalidSubjectType { line, value })?;
    let workload = match row.workload.as_str() {
        "" => None,
        raw => Some(raw.parse::<u32>().map_err(|_| ImportError::InvalidWorkload {
            line,
            value: raw.to_string(),
        })?),
    };
    let year = Year::new(row.college_year.as_str(), row.department.as_str());

    let professors: Vec<&str> = row.professor.split('/').map(str::trim).collect();
    let subjects: Vec<&str> = row.subject.split('/').map(str::trim).collect();
    if professors.len() > 1 && professors.len() != subjects.len() {
        return Err(ImportError::PairArity {
            line,
            professors: professors.len(),
            subjects: subjects.len(),
        });
    }

    if professors.len() == 1 {
        imported
            .catalog
            .add_assignment(professors[0], year.clone(), assignment(&row.subject, kind, workload));
    } else {
        for (professor, subject) in professors.iter().zip(&subjects) {
            imported
                .catalog
                .add_assignment(professor, year.clone(), assignment(subject, kind, workload));
        }
        for i in 0..professors.len() {
            for j in i + 1..professors.len() {
                imported
                    .catalog
                    .link_pair(&year, (professors[i], subjects[i]), (professors[j], subjects[j]))
                    .map_err(|source| ImportError::Catalog { line, source })?;
            }
        }
        debug!(%year, line, professors = %row.professor, "co-taught subject linked");
    }

    imported
        .departments
        .entry(row.department)
        .or_insert_with(DepartmentSettings::default);
    Ok(())
}

fn assignment(subject: &str, kind: SubjectType, workload: Option<u32>) -> SubjectAssignment {
    let entry = SubjectAssignment::new(subject, kind);
    match workload {
        Some(cap) => entry.with_workload(cap),
        None => entry,
    }
}
