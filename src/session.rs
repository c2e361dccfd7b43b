use crate::errors::AppError;
use crate::storage::{AUTH_KEY, Storage};
use std::env;
use tracing::info;

pub const DEFAULT_ACCESS_KEY: &str = "1234";

pub fn resolve_access_key() -> String {
    env::var("ACCESS_KEY").unwrap_or_else(|_| DEFAULT_ACCESS_KEY.to_string())
}

// Access-code gate, not a security boundary: the key is a plaintext configured
// constant compared verbatim. Swapping in real authentication means replacing
// this type; nothing else reads the flag directly.
pub struct SessionGate {
    storage: Storage,
    access_key: String,
    authenticated: bool,
    login_error: Option<String>,
}

impl SessionGate {
    pub async fn load(storage: Storage, access_key: String) -> SessionGate {
        let authenticated = storage.get(AUTH_KEY).await.as_deref() == Some("true");

        SessionGate {
            storage,
            access_key,
            authenticated,
            login_error: None,
        }
    }

    pub async fn attempt_login(&mut self, input: &str) -> Result<(), AppError> {
        if input != self.access_key {
            let message = "Incorrect Access Key.";
            self.login_error = Some(message.to_string());
            return Err(AppError::unauthorized(message));
        }

        self.storage.set(AUTH_KEY, "true".to_string()).await?;
        self.authenticated = true;
        self.login_error = None;
        info!("session unlocked");
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.storage.remove(AUTH_KEY).await?;
        self.authenticated = false;
        self.login_error = None;
        info!("session locked");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }
}
