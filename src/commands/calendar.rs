use super::Connection;
use crate::{
    libs::{agenda, messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM, defaults to the current month
    #[arg(short, long)]
    month: Option<String>,
}

pub async fn cmd(args: CalendarArgs) -> Result<()> {
    let (year, month) = match args.month {
        Some(value) => match agenda::parse_month(&value) {
            Some(month) => month,
            None => msg_bail_anyhow!(Message::InvalidMonth(value)),
        },
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let conn = Connection::open().await?;
    let tasks = conn.read(conn.data.tasks(None).list().await)?;

    msg_print!(Message::CalendarHeader(format!("{:04}-{:02}", year, month)), true);
    let days = agenda::month_agenda(&tasks, year, month);
    if days.is_empty() {
        msg_info!(Message::NoTasksWithDueDate);
    } else {
        View::agenda(&days);
    }

    let upcoming = agenda::upcoming(&tasks, agenda::UPCOMING_LIMIT);
    msg_print!(Message::UpcomingHeader, true);
    if upcoming.is_empty() {
        msg_info!(Message::NoUpcomingTasks);
    } else {
        View::upcoming(&upcoming);
    }
    Ok(())
}
