use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::filter::{DeadlineMode, TimedMode};
use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &app.mode {
        Mode::Search => {
            // Search prompt: /pattern▌
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            push_right_hint(&mut spans, "Enter filter  Esc cancel", width, app, bg);
            Line::from(spans)
        }
        Mode::ConfirmDelete(index) => {
            let title = app
                .store
                .get(*index)
                .map(|t| t.title.as_str())
                .unwrap_or("?");
            Line::from(Span::styled(
                format!("delete '{}'? y/n", title),
                Style::default().fg(app.theme.red).bg(bg),
            ))
        }
        Mode::Navigate => {
            let mut spans: Vec<Span> = Vec::new();

            if let Some((msg, _)) = &app.status_msg {
                spans.push(Span::styled(
                    msg.clone(),
                    Style::default().fg(app.theme.yellow).bg(bg),
                ));
            } else {
                let mut parts: Vec<String> = Vec::new();
                if let Some(p) = &app.filter.project {
                    parts.push(format!("project:{}", p));
                }
                if let Some(t) = &app.filter.title {
                    parts.push(format!("/{}", t));
                }
                if let Some(s) = &app.filter.status {
                    parts.push(format!("status:{}", s));
                }
                if app.filter.deadline_mode != DeadlineMode::All {
                    parts.push(app.filter.deadline_mode.label().to_string());
                }
                if app.filter.timed_mode != TimedMode::All {
                    parts.push(app.filter.timed_mode.label().to_string());
                }
                if !parts.is_empty() {
                    spans.push(Span::styled(
                        parts.join("  "),
                        Style::default().fg(app.theme.dim).bg(bg),
                    ));
                }
            }

            push_right_hint(&mut spans, "? help  q quit", width, app, bg);
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn push_right_hint(
    spans: &mut Vec<Span<'static>>,
    hint: &'static str,
    width: usize,
    app: &App,
    bg: ratatui::style::Color,
) {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use crate::model::registry::Registry;
    use crate::store::TaskStore;
    use crate::tui::render::test_helpers::render_to_string;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let app = App::new(
            dir.path().to_path_buf(),
            TaskStore::new(Vec::new()),
            Registry::default(),
            AppConfig::default(),
        );
        (app, dir)
    }

    #[test]
    fn navigate_mode_shows_filter_summary() {
        let (mut app, _dir) = test_app();
        app.filter.project = Some("Work".into());
        app.filter.deadline_mode = DeadlineMode::UpcomingOnly;

        let out = render_to_string(60, 1, |frame, area| {
            render_status_row(frame, &mut app, area);
        });
        assert!(out.contains("project:Work"));
        assert!(out.contains("upcoming"));
    }

    #[test]
    fn search_mode_shows_prompt() {
        let (mut app, _dir) = test_app();
        app.mode = Mode::Search;
        app.search_input = "rep".into();

        let out = render_to_string(60, 1, |frame, area| {
            render_status_row(frame, &mut app, area);
        });
        assert!(out.contains("/rep"));
    }
}
