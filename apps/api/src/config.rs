use anyhow::{anyhow, Context, Result};

use crate::layout::Paper;

const DEFAULT_MAX_IMPORT_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset, records live in memory for the lifetime of the process.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub default_paper: Paper,
    pub default_resume_name: String,
    pub max_import_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            default_paper: Paper::Letter,
            default_resume_name: "Mi CV".to_string(),
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            database_url: var("DATABASE_URL"),
            port: match var("PORT") {
                Some(v) => v
                    .trim()
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_paper: match var("DEFAULT_PAPER") {
                Some(v) => v
                    .parse::<Paper>()
                    .map_err(|e| anyhow!(e))
                    .context("DEFAULT_PAPER must be 'letter' or 'a4'")?,
                None => defaults.default_paper,
            },
            default_resume_name: var("DEFAULT_RESUME_NAME").unwrap_or(defaults.default_resume_name),
            max_import_bytes: match var("MAX_IMPORT_BYTES") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .context("MAX_IMPORT_BYTES must be a byte count")?,
                None => defaults.max_import_bytes,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_none());
        assert_eq!(config.default_paper, Paper::Letter);
        assert_eq!(config.default_resume_name, "Mi CV");
        assert_eq!(config.max_import_bytes, 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/cv"),
            ("DEFAULT_PAPER", "A4"),
            ("MAX_IMPORT_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/cv"));
        assert_eq!(config.default_paper, Paper::A4);
        assert_eq!(config.max_import_bytes, 2048);
    }

    #[test]
    fn test_malformed_values_name_the_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        let err = load(&[("DEFAULT_PAPER", "legal")]).unwrap_err();
        assert!(err.to_string().contains("DEFAULT_PAPER"));
    }
}
