//! Runtime configuration read from the environment.
//!
//! | Variable               | Meaning                                   |
//! |------------------------|-------------------------------------------|
//! | `DIGESTIGO_VOCABULARY` | path to a JSON vocabulary file (optional) |
//! | `DIGESTIGO_SEED`       | `u64` seed for estimated values (optional)|
//! | `DIGESTIGO_LOG_FORMAT` | `pretty` (default) or `json`              |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

pub const VOCABULARY_VAR: &str = "DIGESTIGO_VOCABULARY";
pub const SEED_VAR: &str = "DIGESTIGO_SEED";
pub const LOG_FORMAT_VAR: &str = "DIGESTIGO_LOG_FORMAT";

/// Log output style for the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                LOG_FORMAT_VAR, other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub vocabulary_path: Option<PathBuf>,
    pub rng_seed: Option<u64>,
    pub log_format: LogFormat,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let vocabulary_path = non_empty_var(VOCABULARY_VAR).map(PathBuf::from);

        let rng_seed = non_empty_var(SEED_VAR)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    AppError::Config(format!("{} must be an unsigned integer: {}", SEED_VAR, e))
                })
            })
            .transpose()?;

        let log_format = match non_empty_var(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            vocabulary_path,
            rng_seed,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset([VOCABULARY_VAR, SEED_VAR, LOG_FORMAT_VAR], || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config, AppConfig::default());
        });
    }

    #[test]
    fn test_reads_all_values() {
        temp_env::with_vars(
            [
                (VOCABULARY_VAR, Some("/tmp/vocab.json")),
                (SEED_VAR, Some(" 42 ")),
                (LOG_FORMAT_VAR, Some("JSON")),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert_eq!(config.vocabulary_path, Some(PathBuf::from("/tmp/vocab.json")));
                assert_eq!(config.rng_seed, Some(42));
                assert_eq!(config.log_format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_bad_seed_is_config_error() {
        temp_env::with_var(SEED_VAR, Some("forty-two"), || {
            assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_bad_log_format_is_config_error() {
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }
}
