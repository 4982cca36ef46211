use serde::{Deserialize, Serialize};
use std::fmt;

use super::{normalize_label, Category};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeHorizon {
    #[serde(rename = "Long term")]
    LongTerm,
    #[serde(rename = "Medium term")]
    MediumTerm,
    #[serde(rename = "Short term")]
    ShortTerm,
}

impl TimeHorizon {
    pub const ALL: [TimeHorizon; 3] = [Self::LongTerm, Self::MediumTerm, Self::ShortTerm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongTerm => "Long term",
            Self::MediumTerm => "Medium term",
            Self::ShortTerm => "Short term",
        }
    }
}

impl Category for TimeHorizon {
    const FIELD: &'static str = "time horizon";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(self) -> &'static str {
        self.as_str()
    }

    // "short" is accepted as shorthand for "Short term".
    fn from_label(s: &str) -> Option<Self> {
        let wanted = normalize_label(s);
        let wanted = wanted.strip_suffix(" term").unwrap_or(&wanted);
        Self::ALL.iter().copied().find(|h| {
            let label = normalize_label(h.as_str());
            label.strip_suffix(" term") == Some(wanted)
        })
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
