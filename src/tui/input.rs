use chrono::{Duration, Local};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::model::task::status;

use super::app::{App, Mode, View, is_double_click};
use super::grid::GUTTER_WIDTH;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode.clone() {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::ConfirmDelete(index) => handle_confirm_delete(app, key, index),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Tab => {
            app.view = match app.view {
                View::List => View::Day,
                View::Day => View::List,
            };
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input = app.filter.title.clone().unwrap_or_default();
        }
        KeyCode::Esc => {
            if app.filter != Default::default() {
                app.filter = Default::default();
                app.clamp_list_cursor();
                app.set_status("filter cleared");
            }
        }

        // Cursor / scroll
        KeyCode::Char('j') | KeyCode::Down => match app.view {
            View::List => {
                let len = app.visible_list().len();
                if len > 0 && app.list_cursor + 1 < len {
                    app.list_cursor += 1;
                }
            }
            View::Day => {
                if app.grid.scroll_by(1) {
                    app.relayout_day();
                }
            }
        },
        KeyCode::Char('k') | KeyCode::Up => match app.view {
            View::List => app.list_cursor = app.list_cursor.saturating_sub(1),
            View::Day => {
                if app.grid.scroll_by(-1) {
                    app.relayout_day();
                }
            }
        },
        KeyCode::Char('g') => {
            if app.view == View::List {
                app.list_cursor = 0;
            } else {
                app.grid.scroll_to_hour(0);
                app.relayout_day();
            }
        }
        KeyCode::Char('G') => {
            if app.view == View::List {
                app.list_cursor = app.visible_list().len().saturating_sub(1);
            } else {
                app.grid.scroll_to_hour(23);
                app.relayout_day();
            }
        }

        // Day navigation
        KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::Left => shift_day(app, -1),
        KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::Right => shift_day(app, 1),
        KeyCode::Char('t') => {
            if app.overlay.set_selected_date(Local::now().date_naive()) {
                app.set_status("today");
            }
        }

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if app.grid.step_zoom(true) {
                app.relayout_day();
            }
        }
        KeyCode::Char('-') => {
            if app.grid.step_zoom(false) {
                app.relayout_day();
            }
        }

        // Filter cycles
        KeyCode::Char('f') => {
            app.filter.deadline_mode = app.filter.deadline_mode.next();
            app.clamp_list_cursor();
            app.set_status(format!("deadline: {}", app.filter.deadline_mode.label()));
        }
        KeyCode::Char('m') => {
            app.filter.timed_mode = app.filter.timed_mode.next();
            app.clamp_list_cursor();
            app.set_status(format!("timed: {}", app.filter.timed_mode.label()));
        }

        // Task actions on the current selection
        KeyCode::Char('d') => {
            if let Some(index) = current_task(app) {
                let title = app.store.tasks()[index].title.clone();
                let mut task = app.store.tasks()[index].clone();
                task.status = status::DONE.to_string();
                app.store.update(index, task);
                app.persist();
                app.set_status(format!("done: {}", title));
            }
        }
        KeyCode::Char('p') => {
            if let Some(index) = current_task(app) {
                let mut task = app.store.tasks()[index].clone();
                task.status = status::POSTPONED.to_string();
                // Push the due date out one day so Upcoming hides it honestly
                if !task.timed && let Some(start) = task.start {
                    task.start = Some(start + Duration::days(1));
                }
                app.store.update(index, task);
                app.persist();
                app.set_status("postponed");
            }
        }
        KeyCode::Char('x') => {
            if let Some(index) = current_task(app) {
                app.mode = Mode::ConfirmDelete(index);
            }
        }
        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
        }
        KeyCode::Enter => {
            let query = app.search_input.trim().to_string();
            app.filter.title = if query.is_empty() {
                None
            } else {
                Some(query.clone())
            };
            if !query.is_empty() {
                app.last_search = Some(query);
            }
            app.mode = Mode::Navigate;
            app.list_cursor = 0;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

fn handle_confirm_delete(app: &mut App, key: KeyEvent, index: usize) {
    app.mode = Mode::Navigate;
    if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
        if let Some(removed) = app.store.remove(index) {
            app.persist();
            app.clamp_list_cursor();
            app.set_status(format!("deleted: {}", removed.title));
        }
    } else {
        app.set_status("delete cancelled");
    }
}

fn shift_day(app: &mut App, days: i64) {
    let next = app.selected_date() + Duration::days(days);
    if app.overlay.set_selected_date(next) && app.view == View::List {
        // Date keys work from both views; flip to the day view so the
        // change is visible.
        app.view = View::Day;
    }
}

/// Store index of the task actions apply to: the clicked card in day view,
/// the cursor row in list view.
fn current_task(app: &mut App) -> Option<usize> {
    match app.view {
        View::List => app.cursor_task(),
        View::Day => {
            let card = app.selected_card?;
            let uid = app.overlay.positioned().get(card)?.task.uid;
            app.store.find_by_uid(uid)
        }
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Map a terminal cell to card-area coordinates, if inside the day view.
fn day_local(app: &App, column: u16, row: u16) -> Option<(i32, i32)> {
    if app.view != View::Day {
        return None;
    }
    let area = app.day_area;
    let left = area.x + GUTTER_WIDTH;
    if column < left || column >= area.x + area.width || row < area.y || row >= area.y + area.height
    {
        return None;
    }
    Some(((column - left) as i32, (row - area.y) as i32))
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate {
        return;
    }

    match mouse.kind {
        MouseEventKind::Moved => {
            if let Some((x, y)) = day_local(app, mouse.column, mouse.row) {
                app.overlay.update_hover(x, y);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some((x, y)) = day_local(app, mouse.column, mouse.row) else {
                return;
            };
            if app.overlay.take_suppressed_click() {
                return;
            }

            match app.overlay.hit_test(x, y) {
                Some(card) => {
                    let now = Local::now().naive_local();
                    let task = &app.overlay.positioned()[card].task;
                    if App::is_past_locked(task, now) {
                        let title = task.title.clone();
                        app.selected_card = None;
                        app.set_status(format!("'{}' has passed (locked)", title));
                    } else {
                        app.selected_card = Some(card);
                    }
                    app.last_click = None;
                }
                None => {
                    app.selected_card = None;
                    if is_double_click(app, (mouse.column, mouse.row))
                        && let Some(minute) = app.grid.minute_at(y)
                    {
                        app.quick_create(minute);
                    }
                }
            }
        }
        MouseEventKind::ScrollDown => {
            if app.view == View::Day {
                if app.grid.scroll_by(2) {
                    app.relayout_day();
                }
            } else {
                let len = app.visible_list().len();
                if len > 0 {
                    app.list_cursor = (app.list_cursor + 1).min(len - 1);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if app.view == View::Day {
                if app.grid.scroll_by(-2) {
                    app.relayout_day();
                }
            } else {
                app.list_cursor = app.list_cursor.saturating_sub(1);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use crate::model::registry::Registry;
    use crate::model::task::Task;
    use crate::store::TaskStore;
    use chrono::{NaiveDate, NaiveDateTime};
    use crossterm::event::{KeyModifiers, MouseEventKind};
    use tempfile::TempDir;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

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
    fn tab_toggles_view() {
        let (mut app, _dir) = test_app();
        assert_eq!(app.view, View::List);
        handle_key(&mut app, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.view, View::Day);
        handle_key(&mut app, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.view, View::List);
    }

    #[test]
    fn search_commits_title_filter() {
        let (mut app, _dir) = test_app();
        handle_key(&mut app, key('/'));
        assert_eq!(app.mode, Mode::Search);
        for c in "report".chars() {
            handle_key(&mut app, key(c));
        }
        handle_key(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.filter.title.as_deref(), Some("report"));
        assert_eq!(app.last_search.as_deref(), Some("report"));
    }

    #[test]
    fn done_key_completes_cursor_task() {
        let (mut app, _dir) = test_app();
        app.store.add(Task::new("a", "Work", dt(1, 8, 0)));
        app.store.add(Task::new("b", "Work", dt(1, 8, 0)));
        handle_key(&mut app, key('j'));
        handle_key(&mut app, key('d'));
        assert_eq!(app.store.tasks()[1].status, status::DONE);
        assert_eq!(app.store.tasks()[0].status, status::NOT_STARTED);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut app, _dir) = test_app();
        app.store.add(Task::new("a", "Work", dt(1, 8, 0)));

        handle_key(&mut app, key('x'));
        assert_eq!(app.mode, Mode::ConfirmDelete(0));
        handle_key(&mut app, key('n'));
        assert_eq!(app.store.len(), 1);

        handle_key(&mut app, key('x'));
        handle_key(&mut app, key('y'));
        assert_eq!(app.store.len(), 0);
    }

    #[test]
    fn date_keys_shift_selected_day() {
        let (mut app, _dir) = test_app();
        let start = app.selected_date();
        handle_key(&mut app, key(']'));
        assert_eq!(app.selected_date(), start + Duration::days(1));
        assert_eq!(app.view, View::Day);
        handle_key(&mut app, key('['));
        handle_key(&mut app, key('['));
        assert_eq!(app.selected_date(), start - Duration::days(1));
        handle_key(&mut app, key('t'));
        assert_eq!(app.selected_date(), start);
    }

    #[test]
    fn click_on_past_card_is_rejected() {
        let (mut app, _dir) = test_app();
        app.view = View::Day;
        app.day_area = ratatui::layout::Rect::new(0, 0, 80, 24);
        app.grid.set_viewport(74, 24);

        let date = app.selected_date();
        let mut task = Task::new("old", "Work", dt(1, 8, 0));
        task.timed = true;
        // Well in the past relative to any test run
        task.start = Some(date.and_hms_opt(0, 10, 0).unwrap() - Duration::days(400));
        task.end = Some(date.and_hms_opt(0, 40, 0).unwrap() - Duration::days(400));
        app.store.add(task);
        app.overlay
            .set_selected_date(date - Duration::days(400));
        app.relayout_day();
        assert_eq!(app.overlay.positioned().len(), 1);

        let rect = app.overlay.positioned()[0].rect;
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: (rect.left + GUTTER_WIDTH as i32) as u16,
            row: rect.top as u16,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, mouse);
        assert_eq!(app.selected_card, None);
        assert!(app.status_msg.is_some());
    }

    #[test]
    fn double_click_on_empty_slot_creates_task() {
        let (mut app, _dir) = test_app();
        app.view = View::Day;
        app.day_area = ratatui::layout::Rect::new(0, 0, 80, 24);
        app.grid.set_viewport(74, 24);
        app.grid.scroll_to_hour(9);

        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: GUTTER_WIDTH + 3,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, mouse.clone());
        assert_eq!(app.store.len(), 0);
        handle_mouse(&mut app, mouse);
        assert_eq!(app.store.len(), 1);
        let date = app.selected_date();
        assert_eq!(app.store.tasks()[0].start, date.and_hms_opt(9, 0, 0));
        // Follow-up click on the new card is swallowed
        app.relayout_day();
        let mouse2 = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: GUTTER_WIDTH,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, mouse2);
        assert_eq!(app.selected_card, None);
    }
}
