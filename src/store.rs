//! In-memory task collection with change notifications.
//!
//! Single-threaded: the store is owned by the frontend (CLI handler or TUI
//! app) and mutated only through these methods. Consumers that need to react
//! to changes subscribe to an mpsc channel and drain it on their own tick,
//! the same way the file watcher delivers its events.

use std::sync::mpsc;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::model::task::{Task, status};

/// Fired after every mutation, identifying the affected index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Inserted(usize),
    Removed(usize),
    Updated(usize),
    /// Bulk replacement (load / external reload)
    Reset,
}

#[derive(Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    listeners: Vec<mpsc::Sender<StoreEvent>>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskStore {
            tasks,
            listeners: Vec::new(),
        }
    }

    /// Register for change events. Events are buffered in the channel until
    /// the receiver drains them.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    fn emit(&self, event: StoreEvent) {
        for listener in &self.listeners {
            // A dropped receiver just stops getting events
            let _ = listener.send(event);
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        let index = self.tasks.len() - 1;
        self.emit(StoreEvent::Inserted(index));
        index
    }

    pub fn remove(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            return None;
        }
        let task = self.tasks.remove(index);
        self.emit(StoreEvent::Removed(index));
        Some(task)
    }

    pub fn update(&mut self, index: usize, task: Task) -> bool {
        let Some(slot) = self.tasks.get_mut(index) else {
            return false;
        };
        *slot = task;
        self.emit(StoreEvent::Updated(index));
        true
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.emit(StoreEvent::Reset);
    }

    pub fn find_by_uid(&self, uid: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.uid == uid)
    }

    pub fn indices_using_project(&self, project: &str) -> Vec<usize> {
        self.indices_where(|t| t.project == project)
    }

    pub fn indices_using_status(&self, status: &str) -> Vec<usize> {
        self.indices_where(|t| t.status == status)
    }

    pub fn indices_using_priority(&self, priority: &str) -> Vec<usize> {
        self.indices_where(|t| t.priority == priority)
    }

    fn indices_where(&self, pred: impl Fn(&Task) -> bool) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| pred(t))
            .map(|(i, _)| i)
            .collect()
    }

    /// Cascade a registry rename/removal: point the given tasks at the new
    /// project and flag them as registry-modified.
    pub fn replace_project(&mut self, indices: &[usize], new_project: &str) {
        self.replace_field(indices, |t| {
            t.project = new_project.to_string();
        });
    }

    pub fn replace_status(&mut self, indices: &[usize], new_status: &str) {
        self.replace_field(indices, |t| {
            t.status = new_status.to_string();
        });
    }

    pub fn replace_priority(&mut self, indices: &[usize], new_priority: &str) {
        self.replace_field(indices, |t| {
            t.priority = new_priority.to_string();
        });
    }

    fn replace_field(&mut self, indices: &[usize], apply: impl Fn(&mut Task)) {
        for &index in indices {
            if let Some(task) = self.tasks.get_mut(index) {
                apply(task);
                task.modified_by_registry = true;
                self.emit(StoreEvent::Updated(index));
            }
        }
    }

    /// Periodic sweep, driven externally (TUI tick / CLI startup): any task
    /// due before `now` that is neither Done nor Overdue becomes Overdue.
    /// Returns the number of tasks changed.
    pub fn mark_overdue(&mut self, now: NaiveDateTime) -> usize {
        let mut changed = 0;
        for index in 0..self.tasks.len() {
            let task = &self.tasks[index];
            let Some(due) = task.due() else {
                continue;
            };
            if due < now && task.status != status::DONE && task.status != status::OVERDUE {
                self.tasks[index].status = status::OVERDUE.to_string();
                self.emit(StoreEvent::Updated(index));
                changed += 1;
            }
        }
        changed
    }
}
