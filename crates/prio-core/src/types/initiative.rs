use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TimeHorizon, WorkStream};

/// Lowest accepted impact/feasibility score.
pub const SCORE_MIN: i64 = 0;
/// Highest accepted impact/feasibility score.
pub const SCORE_MAX: i64 = 10;

/// Row id assigned by the store on insert. Never reused for another record
/// while the table exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitiativeId(i64);

impl InitiativeId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for InitiativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Debug for InitiativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InitiativeId({})", self.0)
    }
}

/// Every field of an initiative except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeFields {
    pub name: String,
    pub impact: i64,
    pub feasibility: i64,
    pub work_stream: WorkStream,
    pub time_horizon: TimeHorizon,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: InitiativeId,
    #[serde(flatten)]
    pub fields: InitiativeFields,
}

impl Initiative {
    pub fn new(id: InitiativeId, fields: InitiativeFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn work_stream(&self) -> WorkStream {
        self.fields.work_stream
    }

    pub fn time_horizon(&self) -> TimeHorizon {
        self.fields.time_horizon
    }
}
