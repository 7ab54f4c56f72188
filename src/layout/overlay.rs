//! Schedule overlay controller: owns the selected date and the latest
//! rectangle set, and resolves pointer hit-testing/hover against it.

use chrono::NaiveDate;

use crate::filter::overlay_visible;
use crate::layout::day::{LayoutOptions, PositionedTask, layout_day};
use crate::layout::geometry::RowGeometry;
use crate::model::task::Task;

pub struct ScheduleOverlay {
    selected_date: NaiveDate,
    rects: Vec<PositionedTask>,
    hovered: Option<usize>,
    suppress_next_click: bool,
    /// Set when the selected date changed and no recompute has happened yet
    needs_layout: bool,
}

impl ScheduleOverlay {
    pub fn new(selected_date: NaiveDate) -> Self {
        ScheduleOverlay {
            selected_date,
            rects: Vec::new(),
            hovered: None,
            suppress_next_click: false,
            needs_layout: true,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Change the selected date; marks the layout stale only if it actually
    /// changed. Returns whether it changed.
    pub fn set_selected_date(&mut self, date: NaiveDate) -> bool {
        if self.selected_date == date {
            return false;
        }
        self.selected_date = date;
        self.needs_layout = true;
        true
    }

    /// Whether a recompute is pending (date change since last recompute).
    /// External triggers (store change, scroll, resize) call `recompute`
    /// directly; everything is a full recomputation.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Recompute the rectangle set from a snapshot of the store. Applies the
    /// overlay visibility contract, runs the day layout, and invalidates the
    /// hover index.
    pub fn recompute(&mut self, tasks: &[Task], geometry: &dyn RowGeometry, options: LayoutOptions) {
        let day_tasks: Vec<Task> = tasks
            .iter()
            .filter(|t| overlay_visible(t, self.selected_date))
            .cloned()
            .collect();
        self.rects = layout_day(self.selected_date, &day_tasks, geometry, options);
        self.hovered = None;
        self.needs_layout = false;
    }

    pub fn positioned(&self) -> &[PositionedTask] {
        &self.rects
    }

    /// First rectangle containing the point, in layout order. When rounded
    /// column widths make rectangles visually overlap this is not guaranteed
    /// to be the topmost one; kept as-is rather than redefining the
    /// tie-break.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.rects.iter().position(|p| p.rect.contains(x, y))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Update hover from a pointer position; returns true when the hover
    /// index changed (the consumer should redraw).
    pub fn update_hover(&mut self, x: i32, y: i32) -> bool {
        let hovered = self.hit_test(x, y);
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    /// Arrange for the next click to be swallowed (used after an empty-slot
    /// double-click creates a task, so the synthetic follow-on click is not
    /// reprocessed).
    pub fn suppress_next_click(&mut self) {
        self.suppress_next_click = true;
    }

    /// One-shot check-and-clear of the suppress flag. Returns true when the
    /// current click should be ignored.
    pub fn take_suppressed_click(&mut self) -> bool {
        std::mem::take(&mut self.suppress_next_click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::UniformRows;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
    }

    fn timed(title: &str, sh: u32, eh: u32) -> Task {
        let mut task = Task::new(title, "Work", day().and_hms_opt(7, 0, 0).unwrap());
        task.timed = true;
        task.start = Some(day().and_hms_opt(sh, 0, 0).unwrap());
        task.end = Some(day().and_hms_opt(eh, 0, 0).unwrap());
        task
    }

    fn recomputed(tasks: &[Task]) -> ScheduleOverlay {
        let mut overlay = ScheduleOverlay::new(day());
        overlay.recompute(tasks, &UniformRows::minutes(120), LayoutOptions::default());
        overlay
    }

    #[test]
    fn recompute_filters_to_selected_day() {
        let other_day = NaiveDate::from_ymd_opt(2026, 4, 11).unwrap();
        let mut elsewhere = timed("elsewhere", 9, 10);
        elsewhere.start = Some(other_day.and_hms_opt(9, 0, 0).unwrap());
        elsewhere.end = Some(other_day.and_hms_opt(10, 0, 0).unwrap());

        let overlay = recomputed(&[timed("here", 9, 10), elsewhere]);
        assert_eq!(overlay.positioned().len(), 1);
        assert_eq!(overlay.positioned()[0].task.title, "here");
    }

    #[test]
    fn set_selected_date_only_marks_stale_on_change() {
        let mut overlay = recomputed(&[timed("a", 9, 10)]);
        assert!(!overlay.needs_layout());
        assert!(!overlay.set_selected_date(day()));
        assert!(!overlay.needs_layout());
        assert!(overlay.set_selected_date(NaiveDate::from_ymd_opt(2026, 4, 11).unwrap()));
        assert!(overlay.needs_layout());
    }

    #[test]
    fn hit_test_first_match_in_layout_order() {
        let overlay = recomputed(&[timed("a", 9, 10), timed("b", 9, 10)]);
        // two columns of width 60 each; y in minutes
        assert_eq!(overlay.hit_test(5, 9 * 60 + 5), Some(0));
        assert_eq!(overlay.hit_test(65, 9 * 60 + 5), Some(1));
        assert_eq!(overlay.hit_test(5, 8 * 60), None);
    }

    #[test]
    fn hover_reports_changes_and_resets_on_recompute() {
        let tasks = vec![timed("a", 9, 10)];
        let mut overlay = recomputed(&tasks);
        assert!(overlay.update_hover(5, 9 * 60 + 5));
        assert_eq!(overlay.hovered(), Some(0));
        assert!(!overlay.update_hover(6, 9 * 60 + 6));
        assert!(overlay.update_hover(5, 8 * 60));
        assert_eq!(overlay.hovered(), None);

        overlay.update_hover(5, 9 * 60 + 5);
        overlay.recompute(&tasks, &UniformRows::minutes(120), LayoutOptions::default());
        assert_eq!(overlay.hovered(), None);
    }

    #[test]
    fn suppress_next_click_is_one_shot() {
        let mut overlay = ScheduleOverlay::new(day());
        assert!(!overlay.take_suppressed_click());
        overlay.suppress_next_click();
        assert!(overlay.take_suppressed_click());
        assert!(!overlay.take_suppressed_click());
    }

    #[test]
    fn recompute_is_idempotent() {
        let tasks = vec![timed("a", 9, 10), timed("b", 9, 11), timed("c", 10, 12)];
        let mut overlay = ScheduleOverlay::new(day());
        overlay.recompute(&tasks, &UniformRows::minutes(120), LayoutOptions::default());
        let first = overlay.positioned().to_vec();
        overlay.recompute(&tasks, &UniformRows::minutes(120), LayoutOptions::default());
        assert_eq!(first, overlay.positioned());
    }
}
