use chrono::{Local, Timelike};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::layout::{PositionedTask, RowGeometry};
use crate::tui::app::App;
use crate::tui::grid::GUTTER_WIDTH;
use crate::util::text::wrap_to_lines;

/// Render the 24-hour day view: hour gutter, grid lines, the positioned
/// task cards, and the now-line when showing today.
pub fn render_day_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.day_area = area;
    if area.width <= GUTTER_WIDTH || area.height == 0 {
        return;
    }

    let card_width = area.width - GUTTER_WIDTH;
    if app.grid.set_viewport(card_width, area.height) || app.overlay.needs_layout() {
        app.relayout_day();
    }

    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let grid_line = Style::default().fg(app.theme.grid_line).bg(bg);

    // Hour rows
    let mut lines: Vec<Line> = Vec::new();
    for y in 0..area.height as i32 {
        let mut label = None;
        for hour in 0..24u32 {
            if app.grid.row_y(hour) == y {
                label = Some(hour);
                break;
            }
        }
        let line = match label {
            Some(hour) => Line::from(vec![
                Span::styled(format!("{:02}:00 ", hour), dim),
                Span::styled("\u{254c}".repeat(card_width as usize), grid_line),
            ]),
            None => Line::from(Span::styled(" ".repeat(area.width as usize), dim)),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);

    // Cards
    let positioned: Vec<PositionedTask> = app.overlay.positioned().to_vec();
    for (i, pt) in positioned.iter().enumerate() {
        let hovered = app.overlay.hovered() == Some(i);
        let selected = app.selected_card == Some(i);
        render_card(frame, app, area, pt, hovered, selected);
    }

    // Now-line on today
    let now = Local::now();
    if app.selected_date() == now.date_naive() {
        let minute = (now.time().hour() * 60 + now.time().minute()) as i32;
        let y = minute * app.grid.zoom as i32 / 60 - app.grid.scroll;
        if y >= 0 && y < area.height as i32 {
            let marker = Paragraph::new(Line::from(Span::styled(
                "\u{2500}".repeat(card_width as usize),
                Style::default().fg(app.theme.now_line).bg(bg),
            )));
            let line_area = Rect::new(area.x + GUTTER_WIDTH, area.y + y as u16, card_width, 1);
            frame.render_widget(marker, line_area);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    pt: &PositionedTask,
    hovered: bool,
    selected: bool,
) {
    // Horizontal clip: min-width flooring can push cards past the viewport
    let card_space = (area.width - GUTTER_WIDTH) as i32;
    let left = pt.rect.left.max(0);
    let right = (pt.rect.left + pt.rect.width).min(card_space);
    if right <= left || pt.rect.height <= 0 {
        return;
    }
    let width = (right - left) as u16;
    let height = pt.rect.height as u16;

    let card_area = Rect::new(
        area.x + GUTTER_WIDTH + left as u16,
        area.y + pt.rect.top as u16,
        width,
        height,
    );

    let card_bg = app.theme.project_color(&app.registry, &pt.task.project);
    let mut style = Style::default().fg(app.theme.text_bright).bg(card_bg);
    if hovered {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if selected {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let time_prefix = pt
        .task
        .start
        .map(|s| format!("{} ", s.format("%H:%M")))
        .unwrap_or_default();
    let text = format!("{}{}", time_prefix, pt.task.title);
    let wrapped = wrap_to_lines(&text, width as usize, height as usize);

    let mut lines: Vec<Line> = Vec::with_capacity(height as usize);
    for row in 0..height as usize {
        let content = wrapped.get(row).cloned().unwrap_or_default();
        let pad = (width as usize).saturating_sub(content.chars().count());
        lines.push(Line::from(Span::styled(
            format!("{}{}", content, " ".repeat(pad)),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines).style(style), card_area);
}
