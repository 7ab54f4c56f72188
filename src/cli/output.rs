use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::layout::PositionedTask;
use crate::model::registry::Rgb;
use crate::model::task::Task;
use crate::ops::search::{MatchField, SearchHit};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub uid: String,
    pub title: String,
    pub project: String,
    pub status: String,
    pub priority: String,
    pub timed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub created: String,
}

#[derive(Serialize)]
pub struct DayCardJson {
    #[serde(flatten)]
    pub task: TaskJson,
    pub column: usize,
    pub columns: usize,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: String,
    pub cards: Vec<DayCardJson>,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub uid: String,
    pub title: String,
    pub field: String,
}

#[derive(Serialize)]
pub struct RegistryEntryJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub system: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        uid: task.uid.to_string(),
        title: task.title.clone(),
        project: task.project.clone(),
        status: task.status.clone(),
        priority: task.priority.clone(),
        timed: task.timed,
        start: task.start.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string()),
        end: task.end.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string()),
        description: task.description.clone(),
        created: task.created.format("%Y-%m-%d %H:%M").to_string(),
    }
}

pub fn card_to_json(pt: &PositionedTask) -> DayCardJson {
    DayCardJson {
        task: task_to_json(&pt.task),
        column: pt.column,
        columns: pt.columns,
        left: pt.rect.left,
        top: pt.rect.top,
        width: pt.rect.width,
        height: pt.rect.height,
    }
}

pub fn hit_to_json(hit: &SearchHit, task: &Task) -> SearchHitJson {
    SearchHitJson {
        uid: task.uid.to_string(),
        title: task.title.clone(),
        field: match hit.field {
            MatchField::Title => "title".to_string(),
            MatchField::Description => "description".to_string(),
        },
    }
}

pub fn color_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn pad_to(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Short uid prefix for display. Eight hex chars is unique enough for a
/// personal task list.
pub fn short_uid(task: &Task) -> String {
    task.uid.to_string()[..8].to_string()
}

/// Format tasks as an aligned table: uid, date, project, priority, status,
/// title. Column widths follow the widest cell.
pub fn format_task_table(tasks: &[&Task]) -> Vec<String> {
    let rows: Vec<[String; 6]> = tasks
        .iter()
        .map(|t| {
            [
                short_uid(t),
                t.format_date(),
                t.project.clone(),
                t.priority.clone(),
                t.status.clone(),
                t.title.clone(),
            ]
        })
        .collect();

    let mut widths = [3usize, 4, 7, 8, 6, 5];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let header = ["UID", "DATE", "PROJECT", "PRIORITY", "STATUS", "TITLE"];
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        header
            .iter()
            .enumerate()
            .map(|(i, h)| pad_to(h, widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string(),
    );
    for row in &rows {
        lines.push(
            row.iter()
                .enumerate()
                .map(|(i, cell)| pad_to(cell, widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string(),
        );
    }
    lines
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(task.title.clone());
    lines.push(format!("uid:      {}", task.uid));
    lines.push(format!("project:  {}", task.project));
    lines.push(format!("priority: {}", task.priority));
    lines.push(format!("status:   {}", task.status));
    let when = task.format_date();
    if !when.is_empty() {
        let label = if task.timed { "when:" } else { "due:" };
        lines.push(format!("{:<9} {}", label, when));
    }
    lines.push(format!(
        "created:  {}",
        task.created.format("%Y-%m-%d %H:%M")
    ));
    if !task.description.is_empty() {
        lines.push("description:".to_string());
        for line in task.description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

/// Format one day-view card as a one-liner with its geometry.
pub fn format_card_line(pt: &PositionedTask) -> String {
    let times = match (pt.task.start, pt.task.end) {
        (Some(s), Some(e)) => format!("{}-{}", s.format("%H:%M"), e.format("%H:%M")),
        _ => String::new(),
    };
    format!(
        "{}  col {}/{}  x={} y={} w={} h={}  {}",
        times,
        pt.column + 1,
        pt.columns,
        pt.rect.left,
        pt.rect.top,
        pt.rect.width,
        pt.rect.height,
        pt.task.title
    )
}
