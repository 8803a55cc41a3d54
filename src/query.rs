//! Query-string codec for list endpoints.
//!
//! The same [`ListQuery`] value is produced by the list controller and parsed
//! by the API, so both sides agree on which keys are significant: `page` and
//! `limit` are always sent, an empty search is omitted and a filter set to
//! [`FILTER_ALL`] is never stored.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Sentinel filter value meaning "do not filter on this dimension".
pub const FILTER_ALL: &str = "all";

const PAGE_KEY: &str = "page";
const LIMIT_KEY: &str = "limit";
const SEARCH_KEY: &str = "search";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("failed to encode query: {0}")]
    Encode(String),

    #[error("failed to decode query: {0}")]
    Decode(String),

    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Search, filter and page state of one list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub search: String,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(key, value);
        self
    }

    /// Stores a filter value; [`FILTER_ALL`] or a blank value clears it.
    /// `page`, `limit` and `search` are not filters and are ignored.
    /// Returns `true` when the stored state changed.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if is_reserved_key(&key) {
            log::debug!("Ignoring filter on reserved key `{key}`");
            return false;
        }
        let value = value.into();
        let value = value.trim();

        if value.is_empty() || value == FILTER_ALL {
            self.filters.remove(&key).is_some()
        } else {
            self.filters.insert(key, value.to_string()).as_deref() != Some(value)
        }
    }

    /// Raw value of a filter dimension, `None` when at its default.
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Parses a filter dimension into `T`.
    pub fn parse_filter<T: FromStr>(&self, key: &str) -> Result<Option<T>, QueryError> {
        match self.filter_value(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| QueryError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|s| !s.is_empty())
    }

    /// `true` when neither a search term nor any filter narrows the list.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term().is_none() && self.filters.is_empty()
    }

    pub fn to_query_string(&self) -> Result<String, QueryError> {
        let mut pairs: Vec<(&str, String)> = vec![
            (PAGE_KEY, self.page.to_string()),
            (LIMIT_KEY, self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push((SEARCH_KEY, self.search.clone()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone())),
        );

        serde_html_form::to_string(&pairs).map_err(|e| QueryError::Encode(e.to_string()))
    }

    pub fn from_query_string(raw: &str) -> Result<Self, QueryError> {
        let pairs: Vec<(String, String)> =
            serde_html_form::from_str(raw).map_err(|e| QueryError::Decode(e.to_string()))?;

        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                PAGE_KEY => query.page = parse_number(&key, &value)?.max(1),
                LIMIT_KEY => query.limit = parse_number(&key, &value)?,
                SEARCH_KEY => query.search = value,
                _ => {
                    query.set_filter(key, value);
                }
            }
        }

        Ok(query)
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize, QueryError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| QueryError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn is_reserved_key(key: &str) -> bool {
    matches!(key, PAGE_KEY | LIMIT_KEY | SEARCH_KEY)
}
