use crate::{
    api::{Session, Supabase},
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email to log in with; saved to the configuration
    #[arg(short, long)]
    email: Option<String>,
}

/// Starts a fresh session: the cached session and password are discarded and
/// the password is asked for again.
pub async fn cmd(login_args: LoginArgs) -> Result<()> {
    let mut config = Config::read()?;
    let mut backend = config.backend()?;

    let email = match login_args.email {
        Some(email) => email,
        None if backend.email.trim().is_empty() => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
        None => backend.email.clone(),
    };
    if email != backend.email {
        backend.email = email;
        config.backend = Some(backend.clone());
        config.save()?;
    }

    let mut auth = Supabase::new(&backend);
    auth.logout()?;
    let session = auth.get_session().await?;
    msg_success!(Message::LoggedIn(session.email));
    Ok(())
}
