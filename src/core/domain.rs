use std::env;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult, REASON_INVALID_CONFIG};

// longest loan period accepted, about a century
pub(crate) const MAX_LOAN_DAYS: i64 = 36_500;

// Identifiable defines common traits that can be shared by catalog records
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for the catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub max_loans: usize,
    pub loan_days: i64,
    pub recent_books: usize,
    pub data_file: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_loans: 3,
            loan_days: 14,
            recent_books: 10,
            data_file: "data/catalog.json".to_string(),
        }
    }

    // from_env applies CATALOG_* overrides on top of the defaults
    pub fn from_env(branch_id: &str) -> LibraryResult<Self> {
        Self::from_lookup(branch_id, |key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(branch_id: &str, lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(branch_id);
        if let Some(val) = lookup("CATALOG_MAX_LOANS") {
            config.max_loans = parse_setting("CATALOG_MAX_LOANS", &val)?;
        }
        if let Some(val) = lookup("CATALOG_LOAN_DAYS") {
            config.loan_days = parse_setting("CATALOG_LOAN_DAYS", &val)?;
        }
        if let Some(val) = lookup("CATALOG_RECENT_BOOKS") {
            config.recent_books = parse_setting("CATALOG_RECENT_BOOKS", &val)?;
        }
        if let Some(val) = lookup("CATALOG_DATA_FILE") {
            if !val.trim().is_empty() {
                config.data_file = val.trim().to_string();
            }
        }
        if config.max_loans == 0 || !(1..=MAX_LOAN_DAYS).contains(&config.loan_days) {
            return Err(LibraryError::validation(
                format!("max_loans {} must be positive and loan_days {} within 1..={}",
                        config.max_loans, config.loan_days, MAX_LOAN_DAYS).as_str(),
                Some(REASON_INVALID_CONFIG.to_string())));
        }
        Ok(config)
    }
}

fn parse_setting<T: FromStr>(key: &str, val: &str) -> LibraryResult<T> {
    val.trim().parse::<T>().map_err(|_| LibraryError::validation(
        format!("invalid value {:?} for {}", val, key).as_str(), Some(REASON_INVALID_CONFIG.to_string())))
}
