use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(50, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Views", header_style)));
    add_binding(&mut lines, " Tab", "Toggle list / day view", key_style, desc_style);
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor / scroll grid", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    add_binding(&mut lines, " [/]", "Previous / next day", key_style, desc_style);
    add_binding(&mut lines, " t", "Jump to today", key_style, desc_style);
    add_binding(&mut lines, " +/-", "Zoom hour rows", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Filtering", header_style)));
    add_binding(&mut lines, " /", "Title search filter", key_style, desc_style);
    add_binding(&mut lines, " f", "Cycle deadline filter", key_style, desc_style);
    add_binding(&mut lines, " m", "Cycle timed filter", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Clear filters", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " d", "Mark done", key_style, desc_style);
    add_binding(&mut lines, " p", "Postpone", key_style, desc_style);
    add_binding(&mut lines, " x", "Delete (asks)", key_style, desc_style);
    add_binding(&mut lines, " 2\u{d7}click", "New task at that time", key_style, desc_style);
    lines.push(Line::from(""));

    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.grid_line).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding(
    lines: &mut Vec<Line>,
    key: &'static str,
    desc: &'static str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", key), key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Helper to create a centered rect using percentages of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
