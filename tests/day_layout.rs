//! End-to-end day view behavior through the public API: overlay visibility,
//! column assignment, pointer interaction.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

use daybook::filter::{DeadlineMode, FilterState};
use daybook::layout::{LayoutOptions, ScheduleOverlay, UniformRows};
use daybook::model::task::{Task, status};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
}

fn timed(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Task {
    let mut t = Task::new(title, "Work", at(6, 0));
    t.timed = true;
    t.start = Some(start);
    t.end = Some(end);
    t
}

fn recompute(overlay: &mut ScheduleOverlay, tasks: &[Task]) {
    let geometry = UniformRows::minutes(120);
    overlay.recompute(tasks, &geometry, LayoutOptions::default());
}

#[test]
fn overlay_shows_full_day_regardless_of_list_filter() {
    let mut done = timed("already done", at(9, 0), at(10, 0));
    done.status = status::DONE.to_string();
    let mut other_project = timed("dentist", at(11, 0), at(12, 0));
    other_project.project = "Home".to_string();
    let tasks = vec![done.clone(), other_project.clone()];

    // A restrictive list filter hides both tasks from the list...
    let filter = FilterState {
        project: Some("Study".into()),
        deadline_mode: DeadlineMode::UpcomingOnly,
        ..Default::default()
    };
    assert!(!filter.matches_list(&done));
    assert!(!filter.matches_list(&other_project));

    // ...but the day overlay still shows both.
    let mut overlay = ScheduleOverlay::new(day());
    recompute(&mut overlay, &tasks);
    assert_eq!(overlay.positioned().len(), 2);
}

#[test]
fn columns_match_simultaneous_overlap_not_clique_chains() {
    // a: 09:00-11:00, b: 10:00-12:00, c: 11:00-13:00. b overlaps both, but a
    // and c do not overlap each other, so two columns suffice and c reuses
    // column 0.
    let tasks = vec![
        timed("a", at(9, 0), at(11, 0)),
        timed("b", at(10, 0), at(12, 0)),
        timed("c", at(11, 0), at(13, 0)),
    ];

    let mut overlay = ScheduleOverlay::new(day());
    recompute(&mut overlay, &tasks);

    let cards = overlay.positioned();
    assert_eq!(cards.len(), 3);
    assert!(cards.iter().all(|c| c.columns == 2));
    assert_eq!(cards[0].column, 0);
    assert_eq!(cards[1].column, 1);
    assert_eq!(cards[2].column, 0);
}

#[test]
fn layout_is_deterministic_across_recomputes() {
    let tasks = vec![
        timed("b", at(10, 0), at(12, 0)),
        timed("a", at(9, 0), at(11, 0)),
        timed("c", at(11, 0), at(13, 0)),
    ];

    let mut overlay = ScheduleOverlay::new(day());
    recompute(&mut overlay, &tasks);
    let first: Vec<_> = overlay.positioned().to_vec();
    recompute(&mut overlay, &tasks);
    assert_eq!(overlay.positioned(), first.as_slice());
}

#[test]
fn date_change_marks_layout_stale_and_filters_by_day() {
    let tasks = vec![
        timed("today", at(9, 0), at(10, 0)),
        timed(
            "tomorrow",
            (day() + chrono::Duration::days(1)).and_hms_opt(9, 0, 0).unwrap(),
            (day() + chrono::Duration::days(1)).and_hms_opt(10, 0, 0).unwrap(),
        ),
    ];

    let mut overlay = ScheduleOverlay::new(day());
    recompute(&mut overlay, &tasks);
    assert_eq!(overlay.positioned().len(), 1);
    assert_eq!(overlay.positioned()[0].task.title, "today");
    assert!(!overlay.needs_layout());

    // Same date is a no-op
    assert!(!overlay.set_selected_date(day()));
    assert!(!overlay.needs_layout());

    assert!(overlay.set_selected_date(day() + chrono::Duration::days(1)));
    assert!(overlay.needs_layout());
    recompute(&mut overlay, &tasks);
    assert_eq!(overlay.positioned()[0].task.title, "tomorrow");
}

#[test]
fn hit_test_and_hover_follow_rectangles() {
    let tasks = vec![
        timed("left", at(9, 0), at(10, 0)),
        timed("right", at(9, 30), at(10, 30)),
    ];

    let mut overlay = ScheduleOverlay::new(day());
    recompute(&mut overlay, &tasks);

    // columns split 120 wide viewport into two 60-cell columns
    assert_eq!(overlay.hit_test(10, 560), Some(0));
    assert_eq!(overlay.hit_test(70, 580), Some(1));
    assert_eq!(overlay.hit_test(70, 540), None, "right column starts at 09:30");
    assert_eq!(overlay.hit_test(10, 300), None);

    // Hover change reporting
    assert!(overlay.update_hover(10, 560));
    assert_eq!(overlay.hovered(), Some(0));
    assert!(!overlay.update_hover(15, 565), "same card, no change");
    assert!(overlay.update_hover(70, 580));
    assert!(overlay.update_hover(0, 0), "leaving clears hover");
    assert_eq!(overlay.hovered(), None);

    // Recompute resets hover
    overlay.update_hover(10, 560);
    recompute(&mut overlay, &tasks);
    assert_eq!(overlay.hovered(), None);
}

#[test]
fn suppressed_click_is_consumed_once() {
    let mut overlay = ScheduleOverlay::new(day());
    assert!(!overlay.take_suppressed_click());
    overlay.suppress_next_click();
    assert!(overlay.take_suppressed_click());
    assert!(!overlay.take_suppressed_click());
}

#[test]
fn range_collapsed_by_the_day_clamp_is_dropped() {
    // Ends exactly at midnight of the target day: the start clamps to 00:00,
    // the end is already 00:00, and the collapsed range is excluded rather
    // than floored to a sliver at the top of the grid.
    let t = timed(
        "boundary",
        (day() - chrono::Duration::days(1)).and_hms_opt(23, 0, 0).unwrap(),
        day().and_hms_opt(0, 0, 0).unwrap(),
    );

    let mut overlay = ScheduleOverlay::new(day());
    recompute(&mut overlay, &[t]);
    assert!(overlay.positioned().is_empty());
}
