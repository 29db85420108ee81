use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub admin_email: String,
    pub admin_password: String,
    pub public_rps: u32,
    pub admin_rps: u32,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub search_debounce_ms: u64,
    pub max_upload_bytes: usize,
    pub session_token_length: usize,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

pub const MIN_DEBOUNCE_MS: u64 = 300;
pub const MAX_DEBOUNCE_MS: u64 = 500;

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:8080".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "adminPass".to_string(),
            public_rps: 50,
            admin_rps: 50,
            default_page_size: 10,
            max_page_size: 100,
            search_debounce_ms: MIN_DEBOUNCE_MS,
            max_upload_bytes: 5 * 1024 * 1024,
            session_token_length: 48,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Config::default();

        let config = Self {
            server_address: get_env("SERVER_ADDRESS")?,
            admin_email: get_env("ADMIN_EMAIL")?,
            admin_password: get_env("ADMIN_PASSWORD")?,
            public_rps: get_env_parse_or("PUBLIC_RPS", defaults.public_rps)?,
            admin_rps: get_env_parse_or("ADMIN_RPS", defaults.admin_rps)?,
            default_page_size: get_env_parse_or("DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            max_page_size: get_env_parse_or("MAX_PAGE_SIZE", defaults.max_page_size)?,
            search_debounce_ms: get_env_parse_or("SEARCH_DEBOUNCE_MS", defaults.search_debounce_ms)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            session_token_length: get_env_parse_or(
                "SESSION_TOKEN_LENGTH",
                defaults.session_token_length,
            )?,
        };

        if config.default_page_size == 0 || config.default_page_size > config.max_page_size {
            return Err(Error::Config(format!(
                "DEFAULT_PAGE_SIZE must be between 1 and {}",
                config.max_page_size
            )));
        }

        Ok(config)
    }

    /// Quiescent interval for the dashboard search box, kept inside 300-500ms.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(
            self.search_debounce_ms
                .clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS),
        )
    }

    /// Page size to use for a request, falling back to the default for 0/None.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => self.default_page_size,
            Some(n) => n.min(self.max_page_size),
        }
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_is_clamped_into_window() {
        let mut config = Config::default();
        config.search_debounce_ms = 50;
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        config.search_debounce_ms = 2_000;
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        config.search_debounce_ms = 400;
        assert_eq!(config.search_debounce(), Duration::from_millis(400));
    }

    #[test]
    fn page_size_falls_back_and_caps() {
        let config = Config::default();
        assert_eq!(config.page_size(None), 10);
        assert_eq!(config.page_size(Some(0)), 10);
        assert_eq!(config.page_size(Some(25)), 25);
        assert_eq!(config.page_size(Some(5_000)), 100);
    }
}
