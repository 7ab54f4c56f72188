use chrono::{NaiveDate, NaiveDateTime};

use crate::model::task::Task;
use crate::store::TaskStore;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskOpError {
    #[error("invalid date/time '{0}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)")]
    InvalidDateTime(String),
    #[error("a timed task needs both --start and --end")]
    MissingRange,
    #[error("start must be before end")]
    ReversedRange,
    #[error("no task matches '{0}'")]
    NoMatch(String),
    #[error("'{0}' matches more than one task; use a longer uid prefix")]
    Ambiguous(String),
}

/// Fields for a new task, as collected from CLI flags or the TUI quick-add.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub project: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    /// Timed range (both required together)
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Due date for an untimed task (ignored when a range is given)
    pub due: Option<NaiveDate>,
}

/// Build a task from the collected fields. A start/end pair makes a timed
/// task; otherwise `due` (or nothing) makes an untimed one.
pub fn build_task(new: NewTask, now: NaiveDateTime) -> Result<Task, TaskOpError> {
    let mut task = Task::new(
        new.title,
        new.project.unwrap_or_else(|| "General".to_string()),
        now,
    );
    if let Some(priority) = new.priority {
        task.priority = priority;
    }
    if let Some(status) = new.status {
        task.status = status;
    }
    if let Some(description) = new.description {
        task.description = description;
    }

    match (new.start, new.end) {
        (Some(start), Some(end)) => {
            if start >= end {
                return Err(TaskOpError::ReversedRange);
            }
            task.timed = true;
            task.start = Some(start);
            task.end = Some(end);
        }
        (None, None) => {
            task.timed = false;
            task.start = new.due.and_then(|d| d.and_hms_opt(0, 0, 0));
        }
        _ => return Err(TaskOpError::MissingRange),
    }
    Ok(task)
}

/// Parse "YYYY-MM-DD HH:MM" (or a bare date, read as midnight).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, TaskOpError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    parse_date(s).and_then(|d| {
        d.and_hms_opt(0, 0, 0)
            .ok_or_else(|| TaskOpError::InvalidDateTime(s.to_string()))
    })
}

pub fn parse_date(s: &str) -> Result<NaiveDate, TaskOpError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| TaskOpError::InvalidDateTime(s.to_string()))
}

/// Resolve a uid prefix to a store index. Requires a unique match.
pub fn resolve_uid_prefix(store: &TaskStore, prefix: &str) -> Result<usize, TaskOpError> {
    let needle = prefix.to_lowercase();
    let matches: Vec<usize> = store
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.uid.to_string().starts_with(&needle))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [] => Err(TaskOpError::NoMatch(prefix.to_string())),
        [index] => Ok(*index),
        _ => Err(TaskOpError::Ambiguous(prefix.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::status;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn build_timed_task() {
        let task = build_task(
            NewTask {
                title: "Standup".into(),
                project: Some("Work".into()),
                start: Some(parse_datetime("2026-05-02 09:00").unwrap()),
                end: Some(parse_datetime("2026-05-02 09:30").unwrap()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        assert!(task.timed);
        assert!(task.has_valid_range());
        assert_eq!(task.status, status::NOT_STARTED);
    }

    #[test]
    fn build_untimed_task_uses_due_as_start() {
        let task = build_task(
            NewTask {
                title: "Pay rent".into(),
                due: Some(parse_date("2026-05-03").unwrap()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        assert!(!task.timed);
        assert_eq!(task.due_date(), parse_date("2026-05-03").ok());
        assert_eq!(task.project, "General");
    }

    #[test]
    fn reversed_or_partial_range_is_rejected() {
        let start = parse_datetime("2026-05-02 10:00").unwrap();
        let end = parse_datetime("2026-05-02 09:00").unwrap();
        let reversed = build_task(
            NewTask {
                title: "x".into(),
                start: Some(start),
                end: Some(end),
                ..Default::default()
            },
            now(),
        );
        assert!(matches!(reversed, Err(TaskOpError::ReversedRange)));

        let partial = build_task(
            NewTask {
                title: "x".into(),
                start: Some(start),
                ..Default::default()
            },
            now(),
        );
        assert!(matches!(partial, Err(TaskOpError::MissingRange)));
    }

    #[test]
    fn datetime_parsing() {
        assert!(parse_datetime("2026-05-02 09:00").is_ok());
        assert_eq!(
            parse_datetime("2026-05-02").unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert!(parse_datetime("yesterday-ish").is_err());
    }

    #[test]
    fn uid_prefix_resolution() {
        use crate::model::task::Task;
        use crate::store::TaskStore;

        let mut store = TaskStore::default();
        let task = Task::new("a", "Work", now());
        let uid = task.uid.to_string();
        store.add(task);
        store.add(Task::new("b", "Work", now()));

        assert_eq!(resolve_uid_prefix(&store, &uid[..8]).unwrap(), 0);
        assert!(matches!(
            resolve_uid_prefix(&store, "zzzz"),
            Err(TaskOpError::NoMatch(_))
        ));
        assert!(matches!(
            resolve_uid_prefix(&store, ""),
            Err(TaskOpError::Ambiguous(_))
        ));
    }
}
