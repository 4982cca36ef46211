use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkStream {
    #[serde(rename = "Service Desk")]
    ServiceDesk,
    Deployment,
    Reliability,
    Finance,
    Network,
}

impl WorkStream {
    pub const ALL: [WorkStream; 5] = [
        Self::ServiceDesk,
        Self::Deployment,
        Self::Reliability,
        Self::Finance,
        Self::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceDesk => "Service Desk",
            Self::Deployment => "Deployment",
            Self::Reliability => "Reliability",
            Self::Finance => "Finance",
            Self::Network => "Network",
        }
    }
}

impl Category for WorkStream {
    const FIELD: &'static str = "work stream";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for WorkStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
