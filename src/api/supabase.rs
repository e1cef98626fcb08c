use super::{AuthSession, Session};
use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::libs::{data_storage::DataStorage, secret::Secret};
use crate::store::rest::{ApiError, RestStore};
use crate::{msg_bail_anyhow, msg_debug, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = ".session.json";
const SECRET_FILE: &str = ".secret";
const AUTH_URL: &str = "auth/v1/token?grant_type=password";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    #[serde(default)]
    pub email: String,
}

impl BackendConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "backend".to_string(),
            name: Message::ConfigModuleBackend.to_string(),
        }
    }

    pub fn init(config: &Option<BackendConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            url: String::new(),
            anon_key: String::new(),
            email: String::new(),
        });
        msg_print!(Message::ConfigModuleBackend);

        Ok(Self {
            url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBackendUrl.to_string())
                .default(config.url)
                .interact_text()?,
            anon_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBackendAnonKey.to_string())
                .default(config.anon_key)
                .interact_text()?,
            email: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptEmail.to_string())
                .default(config.email)
                .interact_text()?,
        })
    }
}

#[derive(Serialize)]
struct LoginCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Password login against the backend's auth endpoint.
pub struct Supabase {
    client: Client,
    config: BackendConfig,
    storage: DataStorage,
    password: String,
    retries: i32,
}

impl Supabase {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_storage(config, DataStorage::new())
    }

    pub fn with_storage(config: &BackendConfig, storage: DataStorage) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            storage,
            password: String::new(),
            retries: 0,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Authenticated row store plus the id of the logged-in user.
    pub async fn connect(&mut self) -> Result<(RestStore, String)> {
        let session = self.get_session().await?;
        let store = RestStore::new(&self.config.url, &self.config.anon_key, &session.access_token);
        Ok((store, session.user_id))
    }

    /// Drops the cached session and password.
    pub fn logout(&self) -> Result<()> {
        self.delete_session()?;
        self.secret().delete()
    }
}

impl Session for Supabase {
    async fn login(&self) -> Result<AuthSession> {
        let url = format!("{}/{}", self.config.url.trim_end_matches('/'), AUTH_URL);
        let credentials = LoginCredentials {
            email: &self.config.email,
            password: &self.password,
        };
        let res = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(&credentials)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            msg_debug!(format!("login failed with {}: {}", status, body));
            match ApiError::message(&body) {
                Some(message) => msg_bail_anyhow!(message),
                None => msg_bail_anyhow!(Message::LoginFailed),
            }
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(AuthSession {
            access_token: token.access_token,
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| self.config.email.clone()),
        })
    }

    fn set_credentials(&mut self, password: &str) -> Result<()> {
        self.password = password.to_string();
        Ok(())
    }

    fn session_file(&self) -> &str {
        SESSION_FILE
    }

    fn secret(&self) -> Secret {
        Secret::with_storage(&self.storage, SECRET_FILE, &Message::PromptPassword.to_string())
    }

    fn retry(&self) -> i32 {
        self.retries
    }

    fn inc_retry(&mut self) {
        self.retries += 1;
    }

    fn storage(&self) -> DataStorage {
        self.storage.clone()
    }

    fn account(&self) -> &str {
        &self.config.email
    }
}
