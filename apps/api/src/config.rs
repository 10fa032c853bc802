use anyhow::{Context, Result};

const DEFAULT_EMAIL_DOMAINS: &str = "gmail.com,yahoo.com,rediffmail.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Unset means the service scores with the fallback only.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub oracle_timeout_secs: u64,
    pub allowed_email_domains: Vec<String>,
    pub seed_catalog_on_empty: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            oracle_timeout_secs: std::env::var("ORACLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("ORACLE_TIMEOUT_SECS must be a whole number of seconds")?,
            allowed_email_domains: parse_domains(
                &std::env::var("ALLOWED_EMAIL_DOMAINS")
                    .unwrap_or_else(|_| DEFAULT_EMAIL_DOMAINS.to_string()),
            ),
            seed_catalog_on_empty: std::env::var("SEED_CATALOG_ON_EMPTY")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .context("SEED_CATALOG_ON_EMPTY must be true or false")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Splits a comma-separated domain list, dropping blanks and any leading '@'.
pub fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().trim_start_matches('@').to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/scholarmatch_test".to_string(),
            anthropic_api_key: None,
            port: 0,
            rust_log: "debug".to_string(),
            oracle_timeout_secs: 5,
            allowed_email_domains: parse_domains(DEFAULT_EMAIL_DOMAINS),
            seed_catalog_on_empty: false,
        }
    }
}
