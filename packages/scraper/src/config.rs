//! Environment-sourced scrape configuration.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |---|---|---|
//! | `LEDGER_BASE_URL` | Yes | Base URL of the portal |
//! | `LEDGER_USERNAME` | Yes | Portal login |
//! | `LEDGER_PASSWORD` | Yes | Portal password |

use crate::ScrapeError;

/// Environment variable holding the portal base URL.
const BASE_URL_ENV: &str = "LEDGER_BASE_URL";

/// Environment variable holding the portal login.
const USERNAME_ENV: &str = "LEDGER_USERNAME";

/// Environment variable holding the portal password.
const PASSWORD_ENV: &str = "LEDGER_PASSWORD";

/// Immutable configuration for one scraper process.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Base URL all requests are issued against.
    pub base_url: String,
    /// Value of the `login` form field.
    pub username: String,
    /// Value of the `pass` form field.
    pub password: String,
}

impl ScrapeConfig {
    /// Reads the configuration from the environment and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] naming the offending variable when
    /// any of the three values is unset or empty.
    pub fn from_env() -> Result<Self, ScrapeError> {
        let config = Self::from_values(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        )?;

        log::info!("Scrape configuration loaded for {}", config.base_url);

        Ok(config)
    }

    /// Validates raw values into a configuration. Split out from
    /// [`from_env`](Self::from_env) so validation is testable without
    /// touching process-wide environment state.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] when any value is `None` or empty.
    pub fn from_values(
        base_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            base_url: require(BASE_URL_ENV, base_url)?,
            username: require(USERNAME_ENV, username)?,
            password: require(PASSWORD_ENV, password)?,
        })
    }
}

/// Requires a present, non-empty string value.
fn require(name: &str, value: Option<String>) -> Result<String, ScrapeError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ScrapeError::Config {
            message: format!("{name} must be set to a non-empty string"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Option<String> {
        Some(s.to_owned())
    }

    #[test]
    fn accepts_complete_values() {
        let config = ScrapeConfig::from_values(
            value("https://portal.example"),
            value("jan"),
            value("hunter2"),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://portal.example");
        assert_eq!(config.username, "jan");
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn rejects_missing_base_url() {
        let err = ScrapeConfig::from_values(None, value("jan"), value("hunter2")).unwrap_err();

        match err {
            ScrapeError::Config { message } => assert!(message.contains("LEDGER_BASE_URL")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_password() {
        let err = ScrapeConfig::from_values(
            value("https://portal.example"),
            value("jan"),
            value(""),
        )
        .unwrap_err();

        match err {
            ScrapeError::Config { message } => assert!(message.contains("LEDGER_PASSWORD")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
