use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::CurrencyFormat;

pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub currency_symbol: String,
    pub group_thousands: bool,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".into(),
            currency_symbol: "₹".into(),
            group_thousands: false,
            request_timeout_secs: 10,
            log_filter: "warn".into(),
        }
    }
}

impl Settings {
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency_symbol.clone(),
            group_thousands: self.group_thousands,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Defaults, then `roster.toml` (or `path`), then environment. A missing
/// default file is fine; a missing explicit file is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                apply_file(&mut settings, &raw)
                    .with_context(|| format!("invalid config file '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let table: toml::Table = toml::from_str(raw)?;

    if let Some(v) = string_value(&table, "api_url") {
        settings.api_url = v;
    }
    if let Some(v) = string_value(&table, "currency_symbol") {
        settings.currency_symbol = v;
    }
    if let Some(v) = table.get("group_thousands") {
        settings.group_thousands = match v {
            toml::Value::Boolean(flag) => *flag,
            other => parse_flag(&value_text(other)).context("group_thousands must be a boolean")?,
        };
    }
    if let Some(v) = table.get("request_timeout_secs") {
        settings.request_timeout_secs = match v {
            toml::Value::Integer(secs) => u64::try_from(*secs)
                .context("request_timeout_secs must not be negative")?,
            other => value_text(other)
                .parse()
                .context("request_timeout_secs must be a whole number of seconds")?,
        };
    }
    if let Some(v) = string_value(&table, "log_filter") {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ROSTER_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("ROSTER_CURRENCY") {
        settings.currency_symbol = v;
    }
    if let Some(v) = lookup("APP__CURRENCY_SYMBOL") {
        settings.currency_symbol = v;
    }

    if let Some(v) = lookup("APP__GROUP_THOUSANDS") {
        if let Some(flag) = parse_flag(&v) {
            settings.group_thousands = flag;
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn string_value(table: &toml::Table, key: &str) -> Option<String> {
    table.get(key).map(value_text)
}

fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
