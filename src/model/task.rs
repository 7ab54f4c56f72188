use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conventional status names. The status set is open (the registry can add
/// custom statuses) but these five drive the filter and overdue semantics.
pub mod status {
    pub const NOT_STARTED: &str = "Not started";
    pub const IN_PROGRESS: &str = "In progress";
    pub const DONE: &str = "Done";
    pub const POSTPONED: &str = "Postponed";
    pub const OVERDUE: &str = "Overdue";
}

/// A task: either timed (schedule-bound, with a start/end range that places
/// it on the day view) or untimed (date-only, list view only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub uid: Uuid,
    pub title: String,
    /// Key into the project registry
    pub project: String,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    /// Timed tasks occupy a time range; untimed tasks only have a due date
    pub timed: bool,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub description: String,
    pub created: NaiveDateTime,
    /// Set when a registry rename/removal was cascaded into this task
    #[serde(default)]
    pub modified_by_registry: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, project: impl Into<String>, created: NaiveDateTime) -> Self {
        Task {
            uid: Uuid::new_v4(),
            title: title.into(),
            project: project.into(),
            start: None,
            end: None,
            timed: false,
            status: status::NOT_STARTED.to_string(),
            priority: "Medium".to_string(),
            description: String::new(),
            created,
            modified_by_registry: false,
        }
    }

    /// The "due" timestamp is context-dependent: end time for timed tasks,
    /// start time for untimed (date-only) tasks.
    pub fn due(&self) -> Option<NaiveDateTime> {
        if self.timed { self.end } else { self.start }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due().map(|dt| dt.date())
    }

    /// Both timestamps present and strictly ordered. A task is eligible for
    /// day-view placement only if `timed && has_valid_range()`.
    pub fn has_valid_range(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s < e)
    }

    /// Human-readable date column for the list view.
    pub fn format_date(&self) -> String {
        if self.timed {
            match (self.start, self.end) {
                (Some(s), Some(e)) if s.date() == e.date() => {
                    format!(
                        "{} {}-{}",
                        s.format("%Y-%m-%d"),
                        s.format("%H:%M"),
                        e.format("%H:%M")
                    )
                }
                (Some(s), Some(e)) => {
                    format!(
                        "{} - {}",
                        s.format("%Y-%m-%d %H:%M"),
                        e.format("%Y-%m-%d %H:%M")
                    )
                }
                (Some(s), None) => s.format("%Y-%m-%d %H:%M").to_string(),
                _ => String::new(),
            }
        } else {
            self.start
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn due_is_end_for_timed_start_for_untimed() {
        let mut task = Task::new("t", "Work", dt(1, 8, 0));
        task.start = Some(dt(2, 9, 0));
        task.end = Some(dt(2, 10, 0));

        task.timed = true;
        assert_eq!(task.due(), Some(dt(2, 10, 0)));

        task.timed = false;
        assert_eq!(task.due(), Some(dt(2, 9, 0)));
    }

    #[test]
    fn valid_range_requires_strict_order() {
        let mut task = Task::new("t", "Work", dt(1, 8, 0));
        assert!(!task.has_valid_range());

        task.start = Some(dt(2, 9, 0));
        task.end = Some(dt(2, 9, 0));
        assert!(!task.has_valid_range());

        task.end = Some(dt(2, 9, 30));
        assert!(task.has_valid_range());

        task.end = Some(dt(2, 8, 0));
        assert!(!task.has_valid_range());
    }

    #[test]
    fn format_date_same_day_range() {
        let mut task = Task::new("t", "Work", dt(1, 8, 0));
        task.timed = true;
        task.start = Some(dt(2, 9, 0));
        task.end = Some(dt(2, 10, 30));
        assert_eq!(task.format_date(), "2026-03-02 09:00-10:30");
    }

    #[test]
    fn format_date_untimed_shows_due_day() {
        let mut task = Task::new("t", "Work", dt(1, 8, 0));
        task.start = Some(dt(5, 0, 0));
        assert_eq!(task.format_date(), "2026-03-05");
    }
}
