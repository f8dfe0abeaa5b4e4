//! Cohort (class-year) key.
//!
//! A year identifies one schedulable cohort: a college year within a
//! department, written `"<college year> <department>"` (e.g. `"FY IT"`).
//! The department part selects the timing settings for the cohort.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Composite college-year + department key.
///
/// Serializes as its display string so it can key JSON maps.
/// Ordering compares the college year first, then the department.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Year {
    college_year: String,
    department: String,
}

/// Error returned when a year key has no department part.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("year key '{0}' must be '<college year> <department>'")]
pub struct ParseYearError(pub String);

impl Year {
    /// Creates a year from its two parts.
    pub fn new(college_year: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            college_year: college_year.into().trim().to_string(),
            department: department.into().trim().to_string(),
        }
    }

    /// College year part (e.g. `"FY"`).
    pub fn college_year(&self) -> &str {
        &self.college_year
    }

    /// Department part (e.g. `"IT"`).
    pub fn department(&self) -> &str {
        &self.department
    }
}

impl FromStr for Year {
    type Err = ParseYearError;

    /// Splits on the first whitespace; the remainder is the department.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once(char::is_whitespace) {
            Some((college_year, department)) if !department.trim().is_empty() => {
                Ok(Self::new(college_year, department))
            }
            _ => Err(ParseYearError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Year {
    type Error = ParseYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.to_string()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.college_year, self.department)
    }
}
