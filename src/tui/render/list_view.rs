use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::text::truncate_to_width;

/// Render the filtered task list
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible = app.visible_list();
    let bg = app.theme.background;

    if visible.is_empty() {
        let empty = Paragraph::new(" No tasks match the current filter")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;

    // Keep the cursor on screen
    if app.list_cursor < app.list_scroll {
        app.list_scroll = app.list_cursor;
    } else if app.list_cursor >= app.list_scroll + height {
        app.list_scroll = app.list_cursor + 1 - height;
    }

    let date_width = 24usize;
    let project_width = app
        .store
        .tasks()
        .iter()
        .map(|t| t.project.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 16);
    // Leading space + padded date/project/status/priority columns
    let fixed_width = 1 + date_width + project_width + 1 + 13 + 7;
    let title_budget = (area.width as usize).saturating_sub(fixed_width);

    let mut lines: Vec<Line> = Vec::new();
    for (row, &index) in visible
        .iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(height)
    {
        let task = &app.store.tasks()[index];
        let is_cursor = row == app.list_cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let date_str = format!(" {:<width$}", task.format_date(), width = date_width);
        let project_str = format!("{:<width$} ", task.project, width = project_width);

        let title_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let mut spans = vec![
            Span::styled(date_str, Style::default().fg(app.theme.dim).bg(row_bg)),
            Span::styled(
                project_str,
                Style::default()
                    .fg(app.theme.project_color(&app.registry, &task.project))
                    .bg(row_bg),
            ),
            Span::styled(
                format!("{:<12} ", truncate_to_width(&task.status, 12)),
                Style::default().fg(app.theme.status_color(&task.status)).bg(row_bg),
            ),
            Span::styled(
                format!("{:<6} ", truncate_to_width(&task.priority, 6)),
                Style::default()
                    .fg(app.theme.priority_color(&app.registry, &task.priority))
                    .bg(row_bg),
            ),
            Span::styled(truncate_to_width(&task.title, title_budget), title_style),
        ];

        // Pad cursor line to full width
        if is_cursor {
            let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let w = area.width as usize;
            if content_width < w {
                spans.push(Span::styled(
                    " ".repeat(w - content_width),
                    Style::default().bg(row_bg),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
