//! Department timing settings.
//!
//! Each department fixes the teaching window (start/end of day), the
//! lecture length, and which lecture indices are reserved for practical
//! (lab) sessions. All cohorts of a department share these settings.
//!
//! # Time Model
//! Times are wall-clock `NaiveTime` values, written as `"HH:MM"` in
//! serialized form. Lecture indices are zero-based from the start time.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Timing settings for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSettings {
    /// First lecture start.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// End of the teaching day.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Length of one lecture in minutes.
    #[serde(rename = "minutes_lecture")]
    pub lecture_minutes: u32,
    /// Lecture indices designated for practical sessions.
    #[serde(default)]
    pub practical_slots: BTreeSet<usize>,
}

impl DepartmentSettings {
    /// Creates settings for a teaching window.
    pub fn new(start_time: NaiveTime, end_time: NaiveTime, lecture_minutes: u32) -> Self {
        Self {
            start_time,
            end_time,
            lecture_minutes,
            practical_slots: BTreeSet::new(),
        }
    }

    /// Creates settings from `"HH:MM"` strings.
    ///
    /// Returns `None` if either time fails to parse.
    pub fn from_hhmm(start: &str, end: &str, lecture_minutes: u32) -> Option<Self> {
        let start_time = NaiveTime::parse_from_str(start.trim(), hhmm::FORMAT).ok()?;
        let end_time = NaiveTime::parse_from_str(end.trim(), hhmm::FORMAT).ok()?;
        Some(Self::new(start_time, end_time, lecture_minutes))
    }

    /// Marks a lecture index as a practical slot.
    pub fn with_practical_slot(mut self, lecture_index: usize) -> Self {
        self.practical_slots.insert(lecture_index);
        self
    }

    /// Number of whole lectures that fit between start and end.
    ///
    /// `floor((end - start) / lecture_minutes)`; zero when the window is
    /// empty or inverted, or the lecture length is zero.
    pub fn lectures_per_day(&self) -> usize {
        if self.lecture_minutes == 0 || self.end_time <= self.start_time {
            return 0;
        }
        let window = (self.end_time - self.start_time).num_minutes();
        (window / i64::from(self.lecture_minutes)) as usize
    }

    /// Whether a lecture index is reserved for practicals.
    #[inline]
    pub fn is_practical_slot(&self, lecture_index: usize) -> bool {
        self.practical_slots.contains(&lecture_index)
    }

    /// Start time of the lecture at `lecture_index`.
    pub fn slot_start(&self, lecture_index: usize) -> NaiveTime {
        let offset = i64::from(self.lecture_minutes) * lecture_index as i64;
        self.start_time + Duration::minutes(offset)
    }

    /// Start times of every lecture in the day.
    pub fn time_slots(&self) -> Vec<NaiveTime> {
        (0..self.lectures_per_day())
            .map(|i| self.slot_start(i))
            .collect()
    }
}

impl Default for DepartmentSettings {
    /// Placeholder for a newly created department: one 60-minute lecture
    /// from 00:00 to 01:00, no practical slots.
    fn default() -> Self {
        Self::new(NaiveTime::MIN, NaiveTime::MIN + Duration::hours(1), 60)
    }
}

/// `"HH:MM"` serde adapter for `NaiveTime`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn it_department() -> DepartmentSettings {
        DepartmentSettings::from_hhmm("09:00", "10:00", 20).unwrap()
    }

    #[test]
    fn test_lectures_per_day() {
        assert_eq!(it_department().lectures_per_day(), 3);

        let partial = DepartmentSettings::from_hhmm("09:00", "10:50", 30).unwrap();
        assert_eq!(partial.lectures_per_day(), 3); // 110 / 30 = 3
    }

    #[test]
    fn test_degenerate_windows() {
        let inverted = DepartmentSettings::from_hhmm("10:00", "09:00", 20).unwrap();
        assert_eq!(inverted.lectures_per_day(), 0);

        let zero = DepartmentSettings::from_hhmm("09:00", "10:00", 0).unwrap();
        assert_eq!(zero.lectures_per_day(), 0);
    }

    #[test]
    fn test_time_slots() {
        let slots = it_department().time_slots();
        let labels: Vec<String> = slots.iter().map(|t| t.format("%H:%M").to_string()).collect();
        assert_eq!(labels, vec!["09:00", "09:20", "09:40"]);
    }

    #[test]
    fn test_practical_slots() {
        let dept = it_department().with_practical_slot(2);
        assert!(dept.is_practical_slot(2));
        assert!(!dept.is_practical_slot(0));
    }

    #[test]
    fn test_default_placeholder() {
        let dept = DepartmentSettings::default();
        assert_eq!(dept.lectures_per_day(), 1);
        assert!(dept.practical_slots.is_empty());
    }

    #[test]
    fn test_serde_hhmm() {
        let json = r#"{"start_time":"09:00","end_time":"10:00","minutes_lecture":20,"practical_slots":[1,2]}"#;
        let dept: DepartmentSettings = serde_json::from_str(json).unwrap();
        assert_eq!(dept.lectures_per_day(), 3);
        assert!(dept.is_practical_slot(1));

        let out = serde_json::to_string(&dept).unwrap();
        assert!(out.contains("\"start_time\":\"09:00\""));

        let bad = r#"{"start_time":"9 am","end_time":"10:00","minutes_lecture":20}"#;
        assert!(serde_json::from_str::<DepartmentSettings>(bad).is_err());
    }
}
