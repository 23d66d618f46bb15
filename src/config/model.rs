use chrono::NaiveDate;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub decoration_url: Option<String>,
    pub decoration_timeout: Duration,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub max_records: usize,
    pub timeout: Duration,
}

/// Selections as the user made them, before they become a `FilterSpec`.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub categories: Vec<String>,
    pub postcodes: Vec<String>,
    pub venue: Option<String>,
    pub specific_day: bool,
    pub date: NaiveDate,
}
