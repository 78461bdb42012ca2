//! Shell configuration, read from the environment at startup.
//!
//! - `STOCKROOM_TODAY`: `YYYY-MM-DD` override for "today" (default: local date)
//! - `STOCKROOM_LOG_FORMAT`: `json` (default) or `pretty`
//! - `STOCKROOM_PROMPT`: prompt string (default `stockroom> `)
//!
//! Log filtering itself stays on `RUST_LOG`.

use chrono::NaiveDate;

use stockroom_inventory::parse_date;
use stockroom_observability::LogFormat;

use crate::error::ShellError;

pub const TODAY_VAR: &str = "STOCKROOM_TODAY";
pub const LOG_FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";
pub const PROMPT_VAR: &str = "STOCKROOM_PROMPT";

const DEFAULT_PROMPT: &str = "stockroom> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub today: Option<NaiveDate>,
    pub log_format: LogFormat,
    pub prompt: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            today: None,
            log_format: LogFormat::default(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ShellError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShellError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(today) = lookup(TODAY_VAR) {
            let date = parse_date(&today)
                .map_err(|e| ShellError::Config(format!("{TODAY_VAR}: {e}")))?;
            config.today = Some(date);
        }

        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.log_format = format
                .parse()
                .map_err(|e| ShellError::Config(format!("{LOG_FORMAT_VAR}: {e}")))?;
        }

        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }

        Ok(config)
    }

    /// The date expiry is measured against.
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ShellConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.prompt, "stockroom> ");
    }

    #[test]
    fn reads_all_variables() {
        let config = ShellConfig::from_lookup(lookup(&[
            (TODAY_VAR, "2024-06-10"),
            (LOG_FORMAT_VAR, "pretty"),
            (PROMPT_VAR, "> "),
        ]))
        .unwrap();

        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn invalid_values_are_startup_errors() {
        let err = ShellConfig::from_lookup(lookup(&[(TODAY_VAR, "2024-02-31")])).unwrap_err();
        assert!(matches!(err, ShellError::Config(msg) if msg.starts_with(TODAY_VAR)));

        let err = ShellConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }
}
