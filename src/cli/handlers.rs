use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::filter::{DeadlineMode, FilterState, TimedMode, overlay_visible};
use crate::io::lock::FileLock;
use crate::io::{config_io, paths, registry_io, store_io};
use crate::layout::{LayoutOptions, UniformRows, layout_day};
use crate::model::config::AppConfig;
use crate::model::registry::{FALLBACK_COLOR, Registry, Rgb};
use crate::model::task::{Task, status};
use crate::ops::{export, search, task_ops};
use crate::store::TaskStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let dir = resolve_data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        None => crate::tui::run(&dir),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&dir, args, json),
            Commands::Day(args) => cmd_day(&dir, args, json),
            Commands::Show(args) => cmd_show(&dir, args, json),
            Commands::Search(args) => cmd_search(&dir, args, json),
            Commands::Export(args) => cmd_export(&dir, args),

            // Write commands
            Commands::Add(args) => cmd_add(&dir, args, json),
            Commands::Status(args) => cmd_set_status(&dir, &args.uid, &args.status),
            Commands::Done(args) => cmd_set_status(&dir, &args.uid, status::DONE),
            Commands::Rm(args) => cmd_rm(&dir, args),
            Commands::SweepOverdue => cmd_sweep_overdue(&dir),

            // Registry management
            Commands::Projects(args) => cmd_registry(&dir, RegistryKind::Project, args, json),
            Commands::Statuses(args) => cmd_registry(&dir, RegistryKind::Status, args, json),
            Commands::Priorities(args) => cmd_registry(&dir, RegistryKind::Priority, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_data_dir(override_dir: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    let dir = paths::data_dir(override_dir.map(Path::new));
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("cannot create data dir '{}': {}", dir.display(), e))?;
    }
    Ok(dir)
}

/// Load tasks into a store and sweep past-due ones to Overdue. The sweep
/// result is persisted only by write commands.
fn load_store(dir: &Path) -> Result<TaskStore, Box<dyn Error>> {
    let mut store = TaskStore::new(store_io::load_tasks(dir)?);
    store.mark_overdue(Local::now().naive_local());
    Ok(store)
}

fn load_registry(dir: &Path) -> Result<Registry, Box<dyn Error>> {
    Ok(registry_io::load_registry(dir)?)
}

fn load_config(dir: &Path) -> Result<AppConfig, Box<dyn Error>> {
    Ok(config_io::load_config(dir)?)
}

fn save_store(dir: &Path, store: &TaskStore) -> Result<(), Box<dyn Error>> {
    store_io::save_tasks(dir, store.tasks())?;
    Ok(())
}

fn resolve_task(store: &TaskStore, prefix: &str) -> Result<usize, Box<dyn Error>> {
    Ok(task_ops::resolve_uid_prefix(store, prefix)?)
}

fn filter_from_args(args: &ListArgs) -> Result<FilterState, Box<dyn Error>> {
    let deadline_mode = DeadlineMode::parse(&args.deadline).ok_or_else(|| {
        format!(
            "unknown deadline mode '{}' (expected: all, upcoming, overdue, completed)",
            args.deadline
        )
    })?;
    let timed_mode = TimedMode::parse(&args.timed).ok_or_else(|| {
        format!(
            "unknown timed mode '{}' (expected: all, timed, untimed)",
            args.timed
        )
    })?;
    let date = args
        .date
        .as_deref()
        .map(task_ops::parse_date)
        .transpose()?;
    Ok(FilterState {
        project: args.project.clone(),
        title: args.title.clone(),
        date,
        status: args.status.clone(),
        priority: args.priority.clone(),
        deadline_mode,
        timed_mode,
    })
}

fn parse_day_arg(arg: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
    match arg {
        Some(s) => Ok(task_ops::parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = load_store(dir)?;
    let filter = filter_from_args(&args)?;
    let visible: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| filter.matches_list(t))
        .collect();

    if json {
        let out: Vec<TaskJson> = visible.iter().map(|t| task_to_json(t)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if visible.is_empty() {
        println!("no tasks");
    } else {
        for line in format_task_table(&visible) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_day(dir: &Path, args: DayArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = load_store(dir)?;
    let config = load_config(dir)?;
    let date = parse_day_arg(args.date.as_deref())?;

    let visible: Vec<Task> = store
        .tasks()
        .iter()
        .filter(|t| overlay_visible(t, date))
        .cloned()
        .collect();

    // One pixel per minute, so the printed geometry reads as minutes
    // past midnight.
    let geometry = UniformRows::minutes(120);
    let options = LayoutOptions {
        min_col_width: config.day.min_col_width,
        min_visible_height: config.day.min_visible_height,
    };
    let cards = layout_day(date, &visible, &geometry, options);

    if json {
        let out = DayJson {
            date: date.format("%Y-%m-%d").to_string(),
            cards: cards.iter().map(card_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if cards.is_empty() {
        println!("{}: nothing scheduled", date.format("%Y-%m-%d"));
    } else {
        println!("{}", date.format("%Y-%m-%d"));
        for card in &cards {
            println!("  {}", format_card_line(card));
        }
    }
    Ok(())
}

fn cmd_show(dir: &Path, args: ShowArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = load_store(dir)?;
    let index = resolve_task(&store, &args.uid)?;
    let task = &store.tasks()[index];

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else {
        for line in format_task_detail(task) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_search(dir: &Path, args: SearchArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = load_store(dir)?;
    let re = search::compile_pattern(&args.pattern)
        .ok_or_else(|| format!("cannot compile search pattern '{}'", args.pattern))?;
    let hits = search::search_tasks(store.tasks(), &re);

    if json {
        let out: Vec<SearchHitJson> = hits
            .iter()
            .map(|h| hit_to_json(h, &store.tasks()[h.index]))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if hits.is_empty() {
        println!("no matches");
    } else {
        for hit in &hits {
            let task = &store.tasks()[hit.index];
            let field = match hit.field {
                search::MatchField::Title => "title",
                search::MatchField::Description => "desc",
            };
            println!("{}  [{}]  {}", short_uid(task), field, task.title);
        }
    }
    Ok(())
}

fn cmd_export(dir: &Path, args: ExportArgs) -> Result<(), Box<dyn Error>> {
    let store = load_store(dir)?;
    let filter = filter_from_args(&args.filter)?;
    let csv = export::export_csv(store.tasks().iter().filter(|t| filter.matches_list(t)));

    match args.out {
        Some(path) => {
            std::fs::write(&path, csv)
                .map_err(|e| format!("cannot write '{}': {}", path, e))?;
            eprintln!("exported to {}", path);
        }
        None => print!("{}", csv),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let mut store = load_store(dir)?;

    let new = task_ops::NewTask {
        title: args.title,
        project: args.project,
        priority: args.priority,
        status: args.status,
        description: args.desc,
        start: args.start.as_deref().map(task_ops::parse_datetime).transpose()?,
        end: args.end.as_deref().map(task_ops::parse_datetime).transpose()?,
        due: args.due.as_deref().map(task_ops::parse_date).transpose()?,
    };
    let task = task_ops::build_task(new, Local::now().naive_local())?;
    let index = store.add(task);
    save_store(dir, &store)?;

    let task = &store.tasks()[index];
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else {
        println!("added {}  {}", short_uid(task), task.title);
    }
    Ok(())
}

fn cmd_set_status(dir: &Path, uid: &str, new_status: &str) -> Result<(), Box<dyn Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let registry = load_registry(dir)?;
    if !registry.statuses.iter().any(|s| s == new_status) {
        return Err(format!(
            "unknown status '{}' (see `dbk statuses`)",
            new_status
        )
        .into());
    }

    let mut store = load_store(dir)?;
    let index = resolve_task(&store, uid)?;
    let mut task = store.tasks()[index].clone();
    task.status = new_status.to_string();
    store.update(index, task);
    save_store(dir, &store)?;

    let task = &store.tasks()[index];
    println!("{}  {} -> {}", short_uid(task), task.title, new_status);
    Ok(())
}

fn cmd_rm(dir: &Path, args: UidArg) -> Result<(), Box<dyn Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let mut store = load_store(dir)?;
    let index = resolve_task(&store, &args.uid)?;
    let removed = store
        .remove(index)
        .ok_or_else(|| format!("no task at index {}", index))?;
    save_store(dir, &store)?;
    println!("removed {}  {}", short_uid(&removed), removed.title);
    Ok(())
}

fn cmd_sweep_overdue(dir: &Path) -> Result<(), Box<dyn Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let mut store = TaskStore::new(store_io::load_tasks(dir)?);
    let swept = store.mark_overdue(Local::now().naive_local());
    if swept > 0 {
        save_store(dir, &store)?;
    }
    println!("{} task(s) marked overdue", swept);
    Ok(())
}

// ---------------------------------------------------------------------------
// Registry handlers
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum RegistryKind {
    Project,
    Status,
    Priority,
}

impl RegistryKind {
    fn noun(self) -> &'static str {
        match self {
            RegistryKind::Project => "project",
            RegistryKind::Status => "status",
            RegistryKind::Priority => "priority",
        }
    }

    /// Where tasks land when their entry is removed without --reassign-to.
    fn fallback(self) -> &'static str {
        match self {
            RegistryKind::Project => "General",
            RegistryKind::Status => status::NOT_STARTED,
            RegistryKind::Priority => "Medium",
        }
    }
}

fn cmd_registry(
    dir: &Path,
    kind: RegistryKind,
    args: RegistryCmd,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match args.action {
        None | Some(RegistryAction::List) => registry_list(dir, kind, json),
        Some(RegistryAction::Add(add)) => registry_add(dir, kind, add),
        Some(RegistryAction::Rm(rm)) => registry_rm(dir, kind, rm),
    }
}

fn registry_list(dir: &Path, kind: RegistryKind, json: bool) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(dir)?;

    let entries: Vec<RegistryEntryJson> = match kind {
        RegistryKind::Project => registry
            .projects
            .iter()
            .map(|(name, color)| RegistryEntryJson {
                name: name.clone(),
                color: Some(color_hex(*color)),
                system: registry.is_system_project(name),
            })
            .collect(),
        RegistryKind::Status => registry
            .statuses
            .iter()
            .map(|name| RegistryEntryJson {
                name: name.clone(),
                color: None,
                system: registry.is_system_status(name),
            })
            .collect(),
        RegistryKind::Priority => registry
            .priorities
            .iter()
            .map(|(name, color)| RegistryEntryJson {
                name: name.clone(),
                color: Some(color_hex(*color)),
                system: registry.is_system_priority(name),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for e in &entries {
            let color = e.color.as_deref().unwrap_or("");
            let marker = if e.system { " *" } else { "" };
            println!("{:<16} {}{}", e.name, color, marker);
        }
    }
    Ok(())
}

fn registry_add(dir: &Path, kind: RegistryKind, args: RegistryAddArgs) -> Result<(), Box<dyn Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let mut registry = load_registry(dir)?;

    let color = match args.color.as_deref() {
        Some(hex) => {
            Rgb::parse_hex(hex).ok_or_else(|| format!("bad color '{}' (want #RRGGBB)", hex))?
        }
        None => FALLBACK_COLOR,
    };

    let added = match kind {
        RegistryKind::Project => registry.add_project(&args.name, color),
        RegistryKind::Status => registry.add_status(&args.name),
        RegistryKind::Priority => registry.add_priority(&args.name, color),
    };
    if !added {
        return Err(format!("cannot add {} '{}'", kind.noun(), args.name).into());
    }
    registry_io::save_registry(dir, &registry)?;
    println!("added {} '{}'", kind.noun(), args.name);
    Ok(())
}

fn registry_rm(dir: &Path, kind: RegistryKind, args: RegistryRmArgs) -> Result<(), Box<dyn Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let mut registry = load_registry(dir)?;

    let target = args
        .reassign_to
        .unwrap_or_else(|| kind.fallback().to_string());
    let target_known = match kind {
        RegistryKind::Project => registry.projects.contains_key(&target),
        RegistryKind::Status => registry.statuses.iter().any(|s| s == &target),
        RegistryKind::Priority => registry.priorities.contains_key(&target),
    };
    if !target_known {
        return Err(format!("unknown reassignment target '{}'", target).into());
    }

    let removed = match kind {
        RegistryKind::Project => registry.remove_project(&args.name),
        RegistryKind::Status => registry.remove_status(&args.name),
        RegistryKind::Priority => registry.remove_priority(&args.name),
    };
    if !removed {
        return Err(format!("cannot remove {} '{}'", kind.noun(), args.name).into());
    }

    // Cascade into the task list
    let mut store = TaskStore::new(store_io::load_tasks(dir)?);
    let indices = match kind {
        RegistryKind::Project => store.indices_using_project(&args.name),
        RegistryKind::Status => store.indices_using_status(&args.name),
        RegistryKind::Priority => store.indices_using_priority(&args.name),
    };
    match kind {
        RegistryKind::Project => store.replace_project(&indices, &target),
        RegistryKind::Status => store.replace_status(&indices, &target),
        RegistryKind::Priority => store.replace_priority(&indices, &target),
    }

    registry_io::save_registry(dir, &registry)?;
    if !indices.is_empty() {
        save_store(dir, &store)?;
    }
    println!(
        "removed {} '{}' ({} task(s) moved to '{}')",
        kind.noun(),
        args.name,
        indices.len(),
        target
    );
    Ok(())
}
