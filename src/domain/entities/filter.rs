use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A single filter criterion value as bound to a search widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    Instant(DateTime<Utc>),
    List(Vec<String>),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Empty text and empty lists mean "no constraint" and are dropped
    /// from outgoing queries.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(value) => value.is_empty(),
            FilterValue::List(values) => values.is_empty(),
            FilterValue::Flag(_) | FilterValue::Instant(_) => false,
        }
    }
}

pub type Filter = BTreeMap<String, FilterValue>;
