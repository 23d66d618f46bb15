use crate::config::model::{CatalogConfig, Config, FilterConfig};
use chrono::{Local, NaiveDate};
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "https://opendata.paris.fr/api/records/1.0/search/";
pub const DEFAULT_DECORATION_URL: &str =
    "https://assets5.lottiefiles.com/packages/lf20_7D0uqz.json";
const DEFAULT_MAX_RECORDS: usize = 5_000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DECORATION_TIMEOUT_SECS: u64 = 10;
const LIST_SEPARATOR: char = ';';

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config '{name}'. Expected {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

pub fn load_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let catalog = CatalogConfig {
        base_url: lookup("CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
        max_records: load_parsed_config(&lookup, "CATALOG_MAX_RECORDS", "a record count")?
            .unwrap_or(DEFAULT_MAX_RECORDS),
        timeout: Duration::from_secs(
            load_parsed_config(&lookup, "CATALOG_TIMEOUT_SECS", "a number of seconds")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    };

    // Set but empty disables the decoration
    let decoration_url = match lookup("DECORATION_URL") {
        None => Some(DEFAULT_DECORATION_URL.to_string()),
        Some(url) if url.trim().is_empty() => None,
        Some(url) => Some(url),
    };
    let decoration_timeout = Duration::from_secs(
        load_parsed_config(&lookup, "DECORATION_TIMEOUT_SECS", "a number of seconds")?
            .unwrap_or(DEFAULT_DECORATION_TIMEOUT_SECS),
    );

    let filter = FilterConfig {
        categories: load_list_config(&lookup, "FILTER_CATEGORIES"),
        postcodes: load_list_config(&lookup, "FILTER_POSTCODES"),
        venue: lookup("FILTER_VENUE").filter(|venue| !venue.trim().is_empty()),
        specific_day: load_parsed_config(&lookup, "FILTER_SPECIFIC_DAY", "either 'true' or 'false'")?
            .unwrap_or(false),
        date: load_date_config(&lookup, "FILTER_DATE")?
            .unwrap_or_else(|| Local::now().date_naive()),
    };

    Ok(Config {
        catalog,
        decoration_url,
        decoration_timeout,
        filter,
    })
}

fn load_parsed_config<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
        None => Ok(None),
    }
}

fn load_date_config(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<NaiveDate>, ConfigError> {
    match lookup(name) {
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected: "a YYYY-MM-DD date",
                value,
            }),
        None => Ok(None),
    }
}

fn load_list_config(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Vec<String> {
    lookup(name)
        .map(|value| {
            value
                .split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
