use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Minimum length of `APP_SECRET`; the cookie key is derived from it.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub static_dir: PathBuf,
    pub secret: Option<String>,
    pub session_ttl_hours: i64,
    pub insecure_cookie: bool,
    pub loglevel: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:db/app.db".to_string(),
            static_dir: PathBuf::from("static"),
            secret: None,
            session_ttl_hours: 12,
            insecure_cookie: false,
            loglevel: "info".to_string(),
            admin_email: None,
            admin_password: None,
        }
    }
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("APP_SECRET must be at least 32 bytes, got {0}")]
    SecretTooShort(usize),

    #[error("session_ttl_hours must be positive, got {0}")]
    InvalidSessionTtl(i64),
}

impl Config {
    /// Defaults overlaid with `APP_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("APP_"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Config = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secret) = self.secret.as_deref()
            && secret.len() < MIN_SECRET_LEN
        {
            return Err(ConfigError::SecretTooShort(secret.len()));
        }
        if self.session_ttl_hours <= 0 {
            return Err(ConfigError::InvalidSessionTtl(self.session_ttl_hours));
        }
        Ok(())
    }

    /// Admin credentials to seed, only when both halves are configured.
    pub fn admin_seed(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}
