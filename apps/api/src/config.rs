use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Chips shown per tier in the compact candidate row.
    pub chip_max_compact: usize,
    /// Chips shown per tier in the expanded candidate detail.
    pub chip_max_detail: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            chip_max_compact: 2,
            chip_max_detail: 12,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            chip_max_compact: parse_env("CHIP_MAX_COMPACT", defaults.chip_max_compact)
                .context("CHIP_MAX_COMPACT must be a non-negative integer")?,
            chip_max_detail: parse_env("CHIP_MAX_DETAIL", defaults.chip_max_detail)
                .context("CHIP_MAX_DETAIL must be a non-negative integer")?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}
