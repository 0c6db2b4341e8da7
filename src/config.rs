use crate::error::AppError;
use chrono::format::{Item, StrftimeItems};
use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const APP_DIR: &str = "league_predictions";

pub const DEFAULT_TABLE: &str = "predictions";
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RPS: u32 = 5;

/// Where the league filter is applied. Some deployments keep every league in
/// one unpartitioned table, in which case the filter runs after the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Server,
    Client,
}

impl FromStr for FilterMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "server" => Ok(FilterMode::Server),
            "client" => Ok(FilterMode::Client),
            other => Err(AppError::ConfigError(format!(
                "PREDICTIONS_FILTER_MODE must be 'server' or 'client', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
    pub filter_mode: FilterMode,
    pub timeout: Duration,
    pub max_requests_per_second: NonZeroU32,
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            supabase_url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            filter_mode: FilterMode::Server,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_requests_per_second: NonZeroU32::new(DEFAULT_MAX_RPS).unwrap_or(NonZeroU32::MIN),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        if dotenvy::dotenv().is_err() {
            if let Some(path) = fallback_env_path() {
                dotenvy::from_path(&path).ok();
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so it can be exercised without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        config.supabase_url = get("SUPABASE_URL");
        config.api_key = get("SUPABASE_ANON_KEY");

        if let Some(table) = get("PREDICTIONS_TABLE") {
            config.table = table;
        }

        if let Some(mode) = get("PREDICTIONS_FILTER_MODE") {
            config.filter_mode = mode.parse()?;
        }

        if let Some(secs) = get("PREDICTIONS_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                AppError::ConfigError(format!("PREDICTIONS_TIMEOUT_SECS is not a number: '{}'", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(rps) = get("PREDICTIONS_MAX_RPS") {
            config.max_requests_per_second = rps
                .parse::<u32>()
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "PREDICTIONS_MAX_RPS must be a positive integer, got '{}'",
                        rps
                    ))
                })?;
        }

        if let Some(format) = get("PREDICTIONS_DATE_FORMAT") {
            if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
                return Err(AppError::ConfigError(format!(
                    "PREDICTIONS_DATE_FORMAT is not a valid strftime pattern: '{}'",
                    format
                )));
            }
            config.date_format = format;
        }

        Ok(config)
    }

    /// URL and anon key for the remote store; only needed when not running
    /// against the built-in fixtures.
    pub fn store_credentials(&self) -> Result<(&str, &str), AppError> {
        let url = self.supabase_url.as_deref().ok_or_else(|| {
            AppError::ConfigError("SUPABASE_URL not found in environment or .env file".to_string())
        })?;
        let key = self.api_key.as_deref().ok_or_else(|| {
            AppError::ConfigError(
                "SUPABASE_ANON_KEY not found in environment or .env file".to_string(),
            )
        })?;
        Ok((url, key))
    }
}

fn fallback_env_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(".env"))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.table, "predictions");
        assert_eq!(config.filter_mode, FilterMode::Server);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_requests_per_second.get(), 5);
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert!(config.store_credentials().is_err());
    }

    #[test]
    fn reads_every_key() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("PREDICTIONS_TABLE", "predictions_v2"),
            ("PREDICTIONS_FILTER_MODE", "Client"),
            ("PREDICTIONS_TIMEOUT_SECS", "3"),
            ("PREDICTIONS_MAX_RPS", "2"),
            ("PREDICTIONS_DATE_FORMAT", "%Y/%m/%d"),
        ])
        .unwrap();

        assert_eq!(
            config.store_credentials().unwrap(),
            ("https://abc.supabase.co", "anon")
        );
        assert_eq!(config.table, "predictions_v2");
        assert_eq!(config.filter_mode, FilterMode::Client);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_requests_per_second.get(), 2);
        assert_eq!(config.date_format, "%Y/%m/%d");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("SUPABASE_URL", "  "), ("PREDICTIONS_TABLE", "")]).unwrap();
        assert_eq!(config.supabase_url, None);
        assert_eq!(config.table, "predictions");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            config_from(&[("PREDICTIONS_FILTER_MODE", "both")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("PREDICTIONS_MAX_RPS", "0")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("PREDICTIONS_TIMEOUT_SECS", "soon")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("PREDICTIONS_DATE_FORMAT", "%Q")]),
            Err(AppError::ConfigError(_))
        ));
    }
}
