pub mod day_view;
pub mod help_overlay;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, View};

/// Main render function, dispatches to the per-view renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // view tabs + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    match app.view {
        View::List => list_view::render_list_view(frame, app, chunks[1]),
        View::Day => day_view::render_day_view(frame, app, chunks[1]),
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let bg = app.theme.background;
    let active = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(app.theme.dim).bg(bg);

    let (list_style, day_style) = match app.view {
        View::List => (active, inactive),
        View::Day => (inactive, active),
    };

    let mut spans = vec![
        Span::styled(" List ", list_style),
        Span::styled("\u{2502}", Style::default().fg(app.theme.grid_line).bg(bg)),
        Span::styled(" Day ", day_style),
    ];
    if app.view == View::Day {
        spans.push(Span::styled(
            format!("  {}", app.selected_date().format("%a %Y-%m-%d")),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let sep_width = area.width as usize;
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            "\u{2500}".repeat(sep_width),
            Style::default().fg(app.theme.grid_line).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
