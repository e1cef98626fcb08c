use crate::{
    api::Supabase,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    if let Some(backend) = Config::read()?.backend {
        Supabase::new(&backend).logout()?;
    }
    msg_success!(Message::LoggedOut);
    Ok(())
}
