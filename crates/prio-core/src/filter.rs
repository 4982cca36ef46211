use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::types::{Category, Initiative, TimeHorizon, WorkStream};

/// Label of the "no constraint" choice in filter selectors.
pub const ALL_LABEL: &str = "All";

/// One filter selector: either "All" or a single exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Category> Selection<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// "All" followed by every value, in selector order.
    pub fn choices() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(T::all().iter().copied().map(Self::Only))
            .collect()
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.trim().eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(Self::All);
        }
        T::parse(s).map(Self::Only)
    }
}

impl<T: Category> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_LABEL),
            Self::Only(v) => f.write_str(v.label()),
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Conjunction of the work stream and time horizon selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    pub work_stream: Selection<WorkStream>,
    pub time_horizon: Selection<TimeHorizon>,
}

impl FilterSet {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_work_stream(mut self, selection: impl Into<Selection<WorkStream>>) -> Self {
        self.work_stream = selection.into();
        self
    }

    pub fn with_time_horizon(mut self, selection: impl Into<Selection<TimeHorizon>>) -> Self {
        self.time_horizon = selection.into();
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.work_stream.is_all() && self.time_horizon.is_all()
    }

    pub fn matches(&self, record: &Initiative) -> bool {
        self.work_stream.matches(record.work_stream())
            && self.time_horizon.matches(record.time_horizon())
    }
}

impl From<WorkStream> for Selection<WorkStream> {
    fn from(value: WorkStream) -> Self {
        Self::Only(value)
    }
}

impl From<TimeHorizon> for Selection<TimeHorizon> {
    fn from(value: TimeHorizon) -> Self {
        Self::Only(value)
    }
}

/// Records satisfying every active constraint, in input order.
pub fn filter(records: &[Initiative], set: &FilterSet) -> Vec<Initiative> {
    records.iter().filter(|r| set.matches(r)).cloned().collect()
}

/// Records belonging to one work stream, in input order.
pub fn scope(records: &[Initiative], work_stream: WorkStream) -> Vec<Initiative> {
    filter(records, &FilterSet::all().with_work_stream(work_stream))
}

/// Result of filtering a snapshot that may not have been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Nothing has been fetched from the store yet.
    NotLoaded,
    /// The store holds no records at all.
    EmptyStore,
    /// Records exist but none pass the filter.
    NoMatch { total: usize },
    Rows(Vec<Initiative>),
}

impl FilterOutcome {
    pub fn apply(snapshot: Option<&[Initiative]>, set: &FilterSet) -> Self {
        let Some(records) = snapshot else {
            return Self::NotLoaded;
        };
        if records.is_empty() {
            return Self::EmptyStore;
        }
        let rows = filter(records, set);
        if rows.is_empty() {
            return Self::NoMatch {
                total: records.len(),
            };
        }
        Self::Rows(rows)
    }

    /// Matching rows; empty for every variant but `Rows`.
    pub fn rows(&self) -> &[Initiative] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}
