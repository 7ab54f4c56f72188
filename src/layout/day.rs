//! Day layout: assigns the day's timed tasks to non-overlapping display
//! columns (greedy interval coloring) and maps them to rectangles against the
//! hour-row geometry.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::layout::geometry::{Rect, RowGeometry};
use crate::model::task::Task;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Layout knobs, sourced from `[day]` in config.toml.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub min_col_width: i32,
    /// Rectangles with less visible height than this are dropped from the
    /// output (a display policy, the task itself is not excluded)
    pub min_visible_height: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            min_col_width: 12,
            min_visible_height: 1,
        }
    }
}

/// A task placed in the day view. Ephemeral: rebuilt from scratch on every
/// layout pass, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTask {
    /// Snapshot of the task with its times clamped to the target day
    pub task: Task,
    pub column: usize,
    /// Total columns in this day's layout
    pub columns: usize,
    pub rect: Rect,
}

/// Compute the day layout for `date`.
///
/// `tasks` should already be overlay-filtered; degenerate entries (missing
/// timestamps, non-positive effective duration) are silently dropped rather
/// than surfaced as errors. The result is deterministic for a given input
/// order: tasks are sorted by (effective start, effective end) with input
/// order as the final tie-break.
pub fn layout_day(
    date: NaiveDate,
    tasks: &[Task],
    geometry: &dyn RowGeometry,
    options: LayoutOptions,
) -> Vec<PositionedTask> {
    // Clamp to the day boundary and drop degenerates.
    let mut clamped: Vec<Task> = Vec::with_capacity(tasks.len());
    for task in tasks {
        if !task.timed {
            continue;
        }
        let (Some(start), Some(end)) = (task.start, task.end) else {
            continue;
        };
        let mut effective = task.clone();
        if start.date() != date {
            effective.start = date.and_hms_opt(0, 0, 0);
        }
        if end.date() != date {
            effective.end = date.and_hms_opt(23, 59, 0);
        }
        // Degenerates are judged on the clamped times: a task ending exactly
        // at midnight of the target day collapses to zero here and is
        // dropped, not floored to a sliver.
        if effective.start >= effective.end {
            continue;
        }
        clamped.push(effective);
    }

    // Deterministic ordering: (start, end) ascending, stable.
    clamped.sort_by_key(|t| (t.start, t.end));

    // Greedy column assignment over sorted intervals. Each marker holds the
    // end time of the last task placed in that column; the count of markers
    // opened equals the maximum simultaneous overlap.
    let mut column_ends: Vec<NaiveDateTime> = Vec::new();
    let mut assignments: Vec<usize> = Vec::with_capacity(clamped.len());
    for task in &clamped {
        let (Some(start), Some(end)) = (task.start, task.end) else {
            continue;
        };
        let column = match column_ends.iter().position(|&col_end| start >= col_end) {
            Some(col) => col,
            None => {
                column_ends.push(end);
                column_ends.len() - 1
            }
        };
        column_ends[column] = end;
        assignments.push(column);
    }

    let columns = column_ends.len();
    let viewport_width = geometry.viewport_width();
    let total_width = viewport_width.max(columns as i32 * options.min_col_width);
    let column_width = if columns > 0 {
        total_width / columns as i32
    } else {
        total_width
    };

    let mut result = Vec::with_capacity(clamped.len());
    for (task, &column) in clamped.iter().zip(&assignments) {
        let (Some(start), Some(end)) = (task.start, task.end) else {
            continue;
        };

        let mut s = (start.time().hour() * 60 + start.time().minute()) as i32;
        let mut e = (end.time().hour() * 60 + end.time().minute()) as i32;
        s = s.max(0);
        e = e.min(MINUTES_PER_DAY);
        if e <= s {
            e = s + 1;
        }

        let start_row = (s / 60) as u32;
        let end_row = ((e - 1) / 60) as u32;

        let y_start = geometry.row_y(start_row) + (s % 60) * geometry.row_height(start_row) / 60;
        let y_end = if e == MINUTES_PER_DAY {
            geometry.row_y(23) + geometry.row_height(23)
        } else {
            let end_minute = e % 60;
            if end_minute == 0 {
                geometry.row_y(end_row) + geometry.row_height(end_row)
            } else {
                geometry.row_y(end_row) + end_minute * geometry.row_height(end_row) / 60
            }
        };

        // Clip to the visible viewport.
        let visible_top = y_start.max(0);
        let visible_bottom = y_end.min(geometry.viewport_height());
        let visible_height = visible_bottom - visible_top;
        if visible_height < options.min_visible_height {
            continue;
        }

        let left = column as i32 * column_width;
        let width = column_width.max(options.min_col_width);

        result.push(PositionedTask {
            task: task.clone(),
            column,
            columns,
            rect: Rect::new(left, visible_top, width, visible_height),
        });
    }

    result
}
