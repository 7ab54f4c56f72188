//! Filter predicates for the two visibility contracts: the general list
//! (deadline/status precedence rules) and the day overlay (which ignores the
//! list criteria and always shows the full day's timed tasks).

use chrono::NaiveDate;

use crate::model::task::{Task, status};

/// Which deadline policy the list view applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadlineMode {
    #[default]
    All,
    UpcomingOnly,
    OverdueOnly,
    CompletedOnly,
}

impl DeadlineMode {
    pub fn parse(s: &str) -> Option<DeadlineMode> {
        match s {
            "all" => Some(DeadlineMode::All),
            "upcoming" => Some(DeadlineMode::UpcomingOnly),
            "overdue" => Some(DeadlineMode::OverdueOnly),
            "completed" => Some(DeadlineMode::CompletedOnly),
            _ => None,
        }
    }

    /// Next mode in the TUI cycle order, wrapping around.
    pub fn next(self) -> DeadlineMode {
        match self {
            DeadlineMode::All => DeadlineMode::UpcomingOnly,
            DeadlineMode::UpcomingOnly => DeadlineMode::OverdueOnly,
            DeadlineMode::OverdueOnly => DeadlineMode::CompletedOnly,
            DeadlineMode::CompletedOnly => DeadlineMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeadlineMode::All => "all",
            DeadlineMode::UpcomingOnly => "upcoming",
            DeadlineMode::OverdueOnly => "overdue",
            DeadlineMode::CompletedOnly => "completed",
        }
    }
}

/// Timed/untimed axis of the list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimedMode {
    #[default]
    All,
    TimedOnly,
    UntimedOnly,
}

impl TimedMode {
    pub fn parse(s: &str) -> Option<TimedMode> {
        match s {
            "all" => Some(TimedMode::All),
            "timed" => Some(TimedMode::TimedOnly),
            "untimed" => Some(TimedMode::UntimedOnly),
            _ => None,
        }
    }

    pub fn next(self) -> TimedMode {
        match self {
            TimedMode::All => TimedMode::TimedOnly,
            TimedMode::TimedOnly => TimedMode::UntimedOnly,
            TimedMode::UntimedOnly => TimedMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimedMode::All => "all",
            TimedMode::TimedOnly => "timed",
            TimedMode::UntimedOnly => "untimed",
        }
    }
}

/// Current list-view filter criteria. Every field defaults to unset, which
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub project: Option<String>,
    /// Title substring, matched trimmed and case-insensitively
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub deadline_mode: DeadlineMode,
    pub timed_mode: TimedMode,
}

impl FilterState {
    /// List-view predicate. Evaluated as an ordered chain; the first failing
    /// clause rejects the task.
    pub fn matches_list(&self, task: &Task) -> bool {
        if let Some(project) = &self.project
            && task.project != *project
        {
            return false;
        }

        if let Some(title) = &self.title {
            let needle = title.trim();
            if !needle.is_empty() && !contains_ignore_case(&task.title, needle) {
                return false;
            }
        }

        if let Some(date) = self.date {
            let date_matches = if task.timed {
                match (task.start, task.end) {
                    (Some(s), Some(e)) => s.date() <= date && date <= e.date(),
                    _ => false,
                }
            } else {
                task.due_date() == Some(date)
            };
            if !date_matches {
                return false;
            }
        }

        if let Some(priority) = &self.priority
            && task.priority != *priority
        {
            return false;
        }

        match self.timed_mode {
            TimedMode::TimedOnly if !task.timed => return false,
            TimedMode::UntimedOnly if task.timed => return false,
            _ => {}
        }

        // Status resolution, in precedence order. "Completed only" wins over
        // everything; an explicit status filter overrides the deadline-mode
        // hiding rules; otherwise Done/Overdue are hidden in general views.
        if self.deadline_mode == DeadlineMode::CompletedOnly {
            return task.status == status::DONE;
        }
        if let Some(wanted) = &self.status {
            return task.status == *wanted;
        }
        if self.deadline_mode == DeadlineMode::OverdueOnly {
            return task.status == status::OVERDUE;
        }
        if task.status == status::DONE || task.status == status::OVERDUE {
            return false;
        }
        if self.deadline_mode == DeadlineMode::UpcomingOnly && task.status == status::POSTPONED {
            return false;
        }
        true
    }
}

/// Day-overlay predicate: a timed task with a valid positive-duration range
/// whose span covers `date`. The overlay deliberately ignores every other
/// list criterion: it is a complete view of the day's schedule.
pub fn overlay_visible(task: &Task, date: NaiveDate) -> bool {
    if !task.timed || !task.has_valid_range() {
        return false;
    }
    // has_valid_range guarantees both are present
    let (Some(start), Some(end)) = (task.start, task.end) else {
        return false;
    };
    start.date() <= date && date <= end.date()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
