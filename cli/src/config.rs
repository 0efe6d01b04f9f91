use std::env;

use thiserror::Error;
use trackgraph_core::DEFAULT_MARKET;

pub const SPOTIFY_CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const SPOTIFY_CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
pub const LASTFM_API_KEY_VAR: &str = "LASTFM_API_KEY";
pub const MARKET_VAR: &str = "TRACKGRAPH_MARKET";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set (export it or add it to a .env file)")]
    MissingVar(&'static str),
}

/// Credentials and defaults read from the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub lastfm_api_key: String,
    pub market: String,
}

impl Credentials {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the variables may be exported
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Self {
            spotify_client_id: required(SPOTIFY_CLIENT_ID_VAR)?,
            spotify_client_secret: required(SPOTIFY_CLIENT_SECRET_VAR)?,
            lastfm_api_key: required(LASTFM_API_KEY_VAR)?,
            market: lookup(MARKET_VAR)
                .map(|value| value.trim().to_uppercase())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_MARKET.to_string()),
        })
    }
}
