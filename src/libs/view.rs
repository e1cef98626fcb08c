use super::messages::Message;
use super::project::Project;
use super::stats::TaskStats;
use super::task::Task;
use crate::msg_print;
use chrono::{Local, NaiveDate};
use prettytable::{row, Table};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let today = Local::now().date_naive();
        let mut table = Table::new();
        table.add_row(row!["ID", "TITLE", "STATUS", "PRIORITY", "DUE", "NEXT"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.status.label(),
                task.priority.label(),
                Self::due(task, today),
                task.status.advance_label().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn projects(projects: &[Project]) {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "DESCRIPTION", "CREATED"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name,
                project.description.as_deref().unwrap_or(""),
                project.created_at.format(DATE_FORMAT)
            ]);
        }
        table.printstd();
    }

    pub fn project(project: &Project) {
        msg_print!(project.name, true);
        if let Some(description) = &project.description {
            msg_print!(description);
        }
        msg_print!(Message::ProjectCreatedOn(project.created_at.format(DATE_FORMAT).to_string()));
        msg_print!(Message::ProjectUpdatedOn(project.updated_at.format(DATE_FORMAT).to_string()));
    }

    pub fn stats(stats: &TaskStats) {
        let mut table = Table::new();
        table.add_row(row!["TOTAL", "COMPLETED", "IN PROGRESS", "TODO"]);
        table.add_row(row![stats.total, stats.completed, stats.in_progress, stats.todo]);
        table.printstd();
        msg_print!(Message::CompletionRate(stats.completion_rate()));
    }

    pub fn agenda(days: &BTreeMap<NaiveDate, Vec<Task>>) {
        let mut table = Table::new();
        table.add_row(row!["DATE", "TITLE", "STATUS", "PRIORITY"]);
        for (day, tasks) in days {
            for task in tasks {
                table.add_row(row![day.format(DATE_FORMAT), task.title, task.status.label(), task.priority.label()]);
            }
        }
        table.printstd();
    }

    pub fn upcoming(tasks: &[Task]) {
        let today = Local::now().date_naive();
        let mut table = Table::new();
        table.add_row(row!["DUE", "TITLE", "PRIORITY"]);
        for task in tasks {
            table.add_row(row![Self::due(task, today), task.title, task.priority.label()]);
        }
        table.printstd();
    }

    /// Due date cell, flagged once the task is overdue.
    pub fn due(task: &Task, today: NaiveDate) -> String {
        let date = task.due_date.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default();
        match task.is_overdue(today) {
            true => Message::DueOverdue(date).to_string(),
            false => date,
        }
    }
}
