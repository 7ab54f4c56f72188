use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveDateTime};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::filter::FilterState;
use crate::io::lock::FileLock;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::DataWatcher;
use crate::io::{config_io, registry_io, store_io};
use crate::layout::{LayoutOptions, ScheduleOverlay};
use crate::model::config::AppConfig;
use crate::model::registry::Registry;
use crate::model::task::{Task, status};
use crate::store::{StoreEvent, TaskStore};

use super::grid::DayGrid;
use super::input;
use super::render;
use super::theme::Theme;

/// How often past-due tasks are swept to Overdue while the TUI runs
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Two clicks within this window count as a double-click
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// How long to wait for the write lock before giving up with a message
const WRITE_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Day,
}

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// Pending delete of the task at this store index
    ConfirmDelete(usize),
}

/// Main application state
pub struct App {
    pub data_dir: PathBuf,
    pub store: TaskStore,
    pub registry: Registry,
    pub config: AppConfig,
    pub theme: Theme,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,

    /// List view filter
    pub filter: FilterState,
    /// Cursor index into the filtered list
    pub list_cursor: usize,
    /// Scroll offset (first visible row) for the list view
    pub list_scroll: usize,

    /// Day view controller
    pub overlay: ScheduleOverlay,
    pub grid: DayGrid,
    /// Card selected by clicking (index into overlay.positioned())
    pub selected_card: Option<usize>,
    /// Card area of the last frame, for mapping mouse coordinates
    pub day_area: ratatui::layout::Rect,
    /// Time and position of the last left-click, for double-click detection
    pub last_click: Option<(Instant, (u16, u16))>,

    pub show_help: bool,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Last committed search pattern
    pub last_search: Option<String>,

    /// Transient status message with its creation time
    pub status_msg: Option<(String, Instant)>,

    store_rx: mpsc::Receiver<StoreEvent>,
    watcher: Option<DataWatcher>,
    last_sweep: Instant,
}

impl App {
    pub fn new(
        data_dir: PathBuf,
        mut store: TaskStore,
        registry: Registry,
        config: AppConfig,
    ) -> Self {
        let theme = Theme::from_config(&config.ui);
        let store_rx = store.subscribe();
        let grid = DayGrid::new(config.day.zoom);

        App {
            data_dir,
            store,
            registry,
            config,
            theme,
            view: View::List,
            mode: Mode::Navigate,
            should_quit: false,
            filter: FilterState::default(),
            list_cursor: 0,
            list_scroll: 0,
            overlay: ScheduleOverlay::new(Local::now().date_naive()),
            grid,
            selected_card: None,
            day_area: ratatui::layout::Rect::default(),
            last_click: None,
            show_help: false,
            search_input: String::new(),
            last_search: None,
            status_msg: None,
            store_rx,
            watcher: None,
            last_sweep: Instant::now(),
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            min_col_width: self.config.day.min_col_width,
            min_visible_height: self.config.day.min_visible_height,
        }
    }

    /// Store indices of tasks visible through the current list filter.
    pub fn visible_list(&self) -> Vec<usize> {
        self.store
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, t)| self.filter.matches_list(t))
            .map(|(i, _)| i)
            .collect()
    }

    /// Store index of the task under the list cursor.
    pub fn cursor_task(&self) -> Option<usize> {
        self.visible_list().get(self.list_cursor).copied()
    }

    pub fn clamp_list_cursor(&mut self) {
        let len = self.visible_list().len();
        if len == 0 {
            self.list_cursor = 0;
        } else if self.list_cursor >= len {
            self.list_cursor = len - 1;
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_msg = Some((msg.into(), Instant::now()));
    }

    /// Recompute the day layout and drop any stale card selection.
    pub fn relayout_day(&mut self) {
        let options = self.layout_options();
        self.overlay
            .recompute(self.store.tasks(), &self.grid, options);
        self.selected_card = None;
    }

    /// Drain pending store events; any event invalidates the day layout.
    fn drain_store_events(&mut self) -> bool {
        let mut changed = false;
        while self.store_rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }

    /// Per-tick maintenance: external file changes, store changes, and the
    /// periodic overdue sweep.
    pub fn tick(&mut self) {
        let files_changed = self
            .watcher
            .as_ref()
            .is_some_and(|w| !w.poll().is_empty());
        if files_changed {
            self.reload_from_disk();
        }

        if self.last_sweep.elapsed() >= SWEEP_INTERVAL {
            self.last_sweep = Instant::now();
            if self.store.mark_overdue(Local::now().naive_local()) > 0 {
                self.persist();
            }
        }

        if self.drain_store_events() || self.overlay.needs_layout() {
            self.relayout_day();
            self.clamp_list_cursor();
        }

        // Expire transient status messages
        if let Some((_, at)) = &self.status_msg
            && at.elapsed() > Duration::from_secs(4)
        {
            self.status_msg = None;
        }
    }

    /// Re-read tasks and registry after an external change.
    pub fn reload_from_disk(&mut self) {
        match store_io::load_tasks(&self.data_dir) {
            Ok(tasks) => self.store.replace_all(tasks),
            Err(e) => self.set_status(format!("reload failed: {}", e)),
        }
        if let Ok(registry) = registry_io::load_registry(&self.data_dir) {
            self.registry = registry;
        }
    }

    /// Write the task list to disk under the advisory lock. On contention the
    /// change stays in memory and a message is shown.
    pub fn persist(&mut self) {
        let lock = match FileLock::acquire(&self.data_dir, WRITE_LOCK_TIMEOUT) {
            Ok(l) => l,
            Err(e) => {
                self.set_status(format!("not saved: {}", e));
                return;
            }
        };
        if let Err(e) = store_io::save_tasks(&self.data_dir, self.store.tasks()) {
            self.set_status(format!("save failed: {}", e));
        }
        drop(lock);
    }

    /// A timed task whose range has fully passed cannot be edited from the
    /// day view; finishing or deleting it still works from the list.
    pub fn is_past_locked(task: &Task, now: NaiveDateTime) -> bool {
        task.timed && task.end.is_some_and(|e| e < now)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.overlay.selected_date()
    }

    /// Quick-create a one-hour task at the given minute of the selected day.
    pub fn quick_create(&mut self, minute: u32) {
        let date = self.selected_date();
        let Some(start) = date.and_hms_opt(minute / 60, minute % 60, 0) else {
            return;
        };
        let end = start + chrono::Duration::hours(1);

        let mut task = Task::new("New task", "General", Local::now().naive_local());
        task.timed = true;
        task.start = Some(start);
        // Clamped at render time if it spills past midnight
        task.end = Some(end);
        task.status = status::NOT_STARTED.to_string();
        self.store.add(task);
        self.persist();

        // The new card appears under the cursor; swallow the release click
        // so it does not immediately count as a card click.
        self.overlay.suppress_next_click();
        self.set_status(format!("created task at {:02}:{:02}", minute / 60, minute % 60));
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    let ui_state = match read_ui_state(&app.data_dir) {
        Some(s) => s,
        None => return,
    };

    if ui_state.view == "day" {
        app.view = View::Day;
    }
    if let Some(date) = ui_state.selected_date {
        app.overlay.set_selected_date(date);
    }
    app.list_cursor = ui_state.list_cursor;
    app.grid.scroll = ui_state.day_scroll;
    if let Some(zoom) = ui_state.zoom {
        app.grid = DayGrid::new(zoom);
        app.grid.scroll = ui_state.day_scroll;
    }
    app.last_search = ui_state.last_search;
    app.clamp_list_cursor();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    let view_str = match app.view {
        View::List => "list".to_string(),
        View::Day => "day".to_string(),
    };

    let ui_state = UiState {
        view: view_str,
        selected_date: Some(app.selected_date()),
        list_cursor: app.list_cursor,
        day_scroll: app.grid.scroll,
        zoom: Some(app.grid.zoom),
        last_search: app.last_search.clone(),
    };

    let _ = write_ui_state(&app.data_dir, &ui_state);
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let mut store = TaskStore::new(store_io::load_tasks(data_dir)?);
    let registry = registry_io::load_registry(data_dir)?;
    let config = config_io::load_config(data_dir)?;

    // Sweep once on startup so the list opens current
    if store.mark_overdue(Local::now().naive_local()) > 0
        && let Ok(_lock) = FileLock::acquire(data_dir, WRITE_LOCK_TIMEOUT)
    {
        store_io::save_tasks(data_dir, store.tasks())?;
    }

    let mut app = App::new(data_dir.to_path_buf(), store, registry, config);
    app.watcher = DataWatcher::start(data_dir).ok();

    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        app.tick();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    // Debounced state save: every ~5 key presses
                    save_counter += 1;
                    if save_counter >= 5 {
                        save_ui_state(app);
                        save_counter = 0;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Resize(_, _) => {
                    // Next draw picks up the new size and relayouts
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Double-click detection shared by the input handlers.
pub fn is_double_click(app: &mut App, pos: (u16, u16)) -> bool {
    let now = Instant::now();
    let double = matches!(
        app.last_click,
        Some((at, p)) if p == pos && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
    );
    app.last_click = if double { None } else { Some((now, pos)) };
    double
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
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
    fn visible_list_applies_filter() {
        let (mut app, _dir) = test_app();
        let mut a = Task::new("write report", "Work", dt(1, 8, 0));
        a.start = Some(dt(2, 0, 0));
        let b = Task::new("laundry", "Home", dt(1, 8, 0));
        app.store.add(a);
        app.store.add(b);

        assert_eq!(app.visible_list(), vec![0, 1]);
        app.filter.project = Some("Home".into());
        assert_eq!(app.visible_list(), vec![1]);
        assert_eq!(app.cursor_task(), Some(1));
    }

    #[test]
    fn clamp_cursor_after_filter_shrinks_list() {
        let (mut app, _dir) = test_app();
        for i in 0..5 {
            app.store.add(Task::new(format!("t{}", i), "Work", dt(1, 8, 0)));
        }
        app.list_cursor = 4;
        app.filter.project = Some("Home".into());
        app.clamp_list_cursor();
        assert_eq!(app.list_cursor, 0);
    }

    #[test]
    fn past_lock_applies_only_to_ended_timed_tasks() {
        let now = dt(10, 12, 0);
        let mut task = Task::new("t", "Work", dt(1, 8, 0));
        assert!(!App::is_past_locked(&task, now));

        task.timed = true;
        task.start = Some(dt(10, 9, 0));
        task.end = Some(dt(10, 10, 0));
        assert!(App::is_past_locked(&task, now));

        task.end = Some(dt(10, 13, 0));
        assert!(!App::is_past_locked(&task, now));
    }

    #[test]
    fn quick_create_adds_timed_hour_task_and_suppresses_click() {
        let (mut app, _dir) = test_app();
        app.quick_create(9 * 60 + 30);

        assert_eq!(app.store.len(), 1);
        let task = &app.store.tasks()[0];
        assert!(app.store.tasks()[0].timed);
        let date = app.selected_date();
        assert_eq!(task.start, date.and_hms_opt(9, 30, 0));
        assert_eq!(task.end, date.and_hms_opt(10, 30, 0));
        assert!(app.overlay.take_suppressed_click());
    }

    #[test]
    fn double_click_requires_same_cell_within_window() {
        let (mut app, _dir) = test_app();
        assert!(!is_double_click(&mut app, (4, 7)));
        assert!(is_double_click(&mut app, (4, 7)));
        // Consumed: a third click starts over
        assert!(!is_double_click(&mut app, (4, 7)));
        assert!(!is_double_click(&mut app, (5, 7)));
    }
}
