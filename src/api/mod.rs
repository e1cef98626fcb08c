//! Authentication against the hosted backend.
//!
//! [`Session`] drives password login with a cached session file and a small
//! retry loop; [`supabase::Supabase`] implements it for a GoTrue-style auth
//! endpoint and hands out an authenticated [`RestStore`](crate::store::rest::RestStore).

use crate::libs::messages::Message;
use crate::libs::{data_storage::DataStorage, secret::Secret};
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

pub mod supabase;

pub use supabase::{BackendConfig, Supabase};

const MAX_RETRY_COUNT: i32 = 3;

/// An authenticated identity: bearer token plus the owner id used on rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}

#[allow(async_fn_in_trait)]
pub trait Session {
    async fn login(&self) -> Result<AuthSession>;
    fn set_credentials(&mut self, password: &str) -> Result<()>;
    fn session_file(&self) -> &str;
    fn secret(&self) -> Secret;
    fn retry(&self) -> i32;
    fn inc_retry(&mut self);

    fn storage(&self) -> DataStorage {
        DataStorage::new()
    }

    /// Email the session must belong to; empty accepts any cached session.
    fn account(&self) -> &str {
        ""
    }

    /// Cached session if present; otherwise logs in, asking for the password
    /// again after each failure up to [`MAX_RETRY_COUNT`] times.
    async fn get_session(&mut self) -> Result<AuthSession> {
        let session_file_path = self.storage().get_path(self.session_file())?;
        if let Some(session) = self.cached_session()? {
            return Ok(session);
        }

        loop {
            let password: String = match self.retry() > 0 {
                true => self.secret().prompt()?,
                false => self.secret().get_or_prompt()?,
            };
            self.set_credentials(&password)?;
            match self.login().await {
                Ok(session) => {
                    let _ = Self::write_session(&session_file_path, &session);
                    return Ok(session);
                }
                Err(_) => {
                    if self.retry() < MAX_RETRY_COUNT {
                        self.inc_retry();
                        continue;
                    }
                    break Err(msg_error_anyhow!(Message::WrongPassword(MAX_RETRY_COUNT)));
                }
            }
        }
    }

    /// Session file of the configured account. One left behind by another
    /// account is removed together with the cached password.
    fn cached_session(&self) -> Result<Option<AuthSession>> {
        let path = self.storage().get_path(self.session_file())?;
        let session = match Self::read_session(&path) {
            Ok(session) => session,
            Err(_) => return Ok(None),
        };

        let account = self.account();
        if account.is_empty() || session.email.eq_ignore_ascii_case(account) {
            return Ok(Some(session));
        }

        msg_debug!(format!("cached session of {:?} does not match {:?}", session.email, account));
        self.delete_session()?;
        self.secret().delete()?;
        Ok(None)
    }

    fn read_session(path: &Path) -> Result<AuthSession> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn write_session(path: &Path, session: &AuthSession) -> Result<()> {
        let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        file.write_all(serde_json::to_string(session)?.as_bytes())?;
        Ok(())
    }

    fn delete_session(&self) -> Result<()> {
        self.storage().remove(self.session_file())
    }
}
