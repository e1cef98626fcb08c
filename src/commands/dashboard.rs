use super::Connection;
use crate::{
    libs::{agenda, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let conn = Connection::open().await?;
    let tasks = conn.data.tasks(None);
    let list = conn.read(tasks.list().await)?;

    msg_print!(Message::DashboardHeader, true);
    msg_print!(Message::DashboardWelcome);
    View::stats(&tasks.stats());

    let upcoming = agenda::upcoming(&list, agenda::UPCOMING_LIMIT);
    msg_print!(Message::UpcomingHeader, true);
    if upcoming.is_empty() {
        msg_info!(Message::NoUpcomingTasks);
    } else {
        View::upcoming(&upcoming);
    }
    Ok(())
}
