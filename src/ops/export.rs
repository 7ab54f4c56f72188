//! CSV export of a (filtered) task list.

use crate::model::task::Task;

const HEADER: &str = "uid,title,project,start,end,timed,status,priority,description";

/// Render tasks as CSV, header row first. Fields containing commas, quotes,
/// or newlines are quoted with doubled inner quotes.
pub fn export_csv<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for task in tasks {
        let fields = [
            task.uid.to_string(),
            task.title.clone(),
            task.project.clone(),
            format_dt(task.start),
            format_dt(task.end),
            task.timed.to_string(),
            task.status.clone(),
            task.priority.clone(),
            task.description.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn format_dt(dt: Option<chrono::NaiveDateTime>) -> String {
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
