//! Service configuration loaded from environment variables
//!
//! Built once in `main` and handed to the router; there is no process-wide
//! mutable state.

use axum_extra::extract::cookie::Key;
use std::env;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Trainer service configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Directory holding the scenario HTML templates
    pub template_dir: String,
    /// Key used to sign the session cookie
    pub session_key: Key,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables.
    ///
    /// `TRAINER_SESSION_SECRET` must be at least 64 bytes when set; when
    /// unset a fresh random key is generated, so session cookies do not
    /// survive a restart.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            env::var("TRAINER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let template_dir =
            env::var("TRAINER_TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string());

        let session_key = match env::var("TRAINER_SESSION_SECRET") {
            Ok(secret) => {
                if secret.len() < 64 {
                    return Err(ConfigError::Invalid {
                        name: "TRAINER_SESSION_SECRET",
                        reason: format!("need at least 64 bytes, got {}", secret.len()),
                    });
                }
                Key::from(secret.as_bytes())
            }
            Err(_) => Key::generate(),
        };

        Ok(Self {
            bind_addr,
            template_dir,
            session_key,
        })
    }
}
