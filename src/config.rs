//! Engine configuration.
//!
//! Holds the knobs a run depends on besides the catalog: the allocation
//! retry policy and the timing settings of each department. Both can be
//! loaded from a JSON document; missing knobs take their defaults.
//!
//! ```
//! use class_sync::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{
//!     "departments": {
//!         "IT": { "start_time": "09:00", "end_time": "10:00", "minutes_lecture": 20 }
//!     }
//! }"#).unwrap();
//! assert_eq!(config.policy.max_attempts, 100);
//! assert_eq!(config.departments["IT"].lectures_per_day(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::models::DepartmentSettings;

/// Bounded-retry policy for the day-slot allocator.
///
/// `max_attempts` is the only termination guarantee of one
/// `(year, lecture_index)` allocation: after that many queue turns the
/// remaining days are filled with empty slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    100
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

impl AllocationPolicy {
    /// Policy with a custom attempt bound.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self { max_attempts }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub policy: AllocationPolicy,
    /// Department id → timing settings.
    #[serde(default)]
    pub departments: BTreeMap<String, DepartmentSettings>,
}

impl EngineConfig {
    /// Parses and checks a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Adds or replaces a department's settings.
    pub fn with_department(mut self, id: impl Into<String>, settings: DepartmentSettings) -> Self {
        self.departments.insert(id.into(), settings);
        self
    }

    /// Sets the allocation policy.
    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn check(&self) -> Result<()> {
        if self.policy.max_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "policy.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config.policy, AllocationPolicy::default());
        assert_eq!(config.policy.max_attempts, 100);
        assert!(config.departments.is_empty());
    }

    #[test]
    fn test_custom_policy() {
        let config = EngineConfig::from_json_str(r#"{"policy":{"max_attempts":25}}"#).unwrap();
        assert_eq!(config.policy.max_attempts, 25);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = EngineConfig::from_json_str(r#"{"policy":{"max_attempts":0}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_path("/nonexistent/class-sync.json").unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_policy(AllocationPolicy::with_max_attempts(10))
            .with_department("IT", DepartmentSettings::default());
        assert_eq!(config.policy.max_attempts, 10);
        assert!(config.departments.contains_key("IT"));
    }
}
