//! Due-date views over a task list: the month agenda and the upcoming panel.

use super::task::Task;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Number of entries shown in the upcoming panel.
pub const UPCOMING_LIMIT: usize = 5;

/// Tasks with a due date inside the given month, grouped by day.
///
/// Days come out in ascending order; tasks within a day keep list order.
pub fn month_agenda(tasks: &[Task], year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            if due.year() == year && due.month() == month {
                days.entry(due).or_default().push(task.clone());
            }
        }
    }
    days
}

/// Tasks carrying a due date, earliest first, capped at `limit`.
pub fn upcoming(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut dated: Vec<&Task> = tasks.iter().filter(|task| task.due_date.is_some()).collect();
    dated.sort_by_key(|task| task.due_date);
    dated.into_iter().take(limit).cloned().collect()
}

/// Parses a `YYYY-MM` month argument.
pub fn parse_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
}
