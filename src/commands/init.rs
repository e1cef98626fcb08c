use crate::{
    api::Supabase,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the configuration together with the cached session and password
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if let Some(backend) = Config::read()?.backend {
            Supabase::new(&backend).logout()?;
        }
        Config::delete()?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    let previous = Config::read().unwrap_or_default().backend;
    let config = Config::init()?;
    config.save()?;
    // A session or password of the old backend account must not be reused.
    if let Some(previous) = previous.filter(|previous| config.backend.as_ref() != Some(previous)) {
        Supabase::new(&previous).logout()?;
    }
    msg_success!(Message::ConfigSaved);
    Ok(())
}
