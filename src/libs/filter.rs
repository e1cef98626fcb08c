//! Client-side task filtering.
//!
//! The full task list is always held in memory; narrowing it is a pure
//! function of the list and the current filter values. Three predicates are
//! AND-combined:
//!
//! - case-insensitive substring search over title and description
//! - exact status match
//! - exact priority match
//!
//! The status and priority predicates each have an "all" sentinel
//! ([`Selector::All`]) that disables them.

use super::task::{Task, TaskPriority, TaskStatus};
use std::fmt;
use std::str::FromStr;

pub const ALL_SENTINEL: &str = "all";

/// Either the "all" sentinel or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Selector::All);
        }
        s.parse().map(Selector::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(ALL_SENTINEL),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilter {
    pub search: String,
    pub status: Selector<TaskStatus>,
    pub priority: Selector<TaskPriority>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = term.to_string();
        self
    }

    pub fn status(mut self, status: Selector<TaskStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Selector<TaskPriority>) -> Self {
        self.priority = priority;
        self
    }

    /// Whether any predicate narrows the list.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.status.is_all() || !self.priority.is_all()
    }

    pub fn matches(&self, task: &Task) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = task.title.to_lowercase().contains(&term) || task.description.to_lowercase().contains(&term);

        matches_search && self.status.matches(&task.status) && self.priority.matches(&task.priority)
    }

    /// Returns the matching tasks in their original order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|task| self.matches(task)).cloned().collect()
    }
}
