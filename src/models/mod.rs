//! Timetabling domain models.
//!
//! Plain data exchanged with collaborators: the professor catalog and
//! department settings go in, the schedule grid comes out. Everything
//! here derives `Serialize`/`Deserialize` so callers can persist it.
//!
//! # Domain Mappings
//!
//! | class-sync | Meaning |
//! |------------|---------|
//! | Year | Cohort: college year within a department ("FY IT") |
//! | Professor | Lecturer with per-cohort subject lists |
//! | SubjectAssignment | One subject a professor teaches a cohort |
//! | ScheduleGrid | Cohort → weekday → lecture slots |

mod calendar;
mod catalog;
mod department;
mod professor;
mod schedule;
mod year;

pub use calendar::Weekday;
pub use catalog::ProfessorCatalog;
pub use department::DepartmentSettings;
pub use professor::{CoTeacher, Professor, SubjectAssignment, SubjectType};
pub use schedule::{
    Conflict, Lecture, LectureSlot, ScheduleGrid, Teaching, WeekSchedule, EMPTY_SLOT_LABEL,
};
pub use year::{ParseYearError, Year};
