mod initiative;
mod time_horizon;
mod work_stream;

pub use initiative::{Initiative, InitiativeFields, InitiativeId, SCORE_MAX, SCORE_MIN};
pub use time_horizon::TimeHorizon;
pub use work_stream::WorkStream;

use crate::ValidationError;

/// A closed set of labelled values an initiative is grouped by.
pub trait Category: Copy + Eq + std::fmt::Debug + 'static {
    /// Field name used in error messages and table headers.
    const FIELD: &'static str;

    fn all() -> &'static [Self];

    fn label(self) -> &'static str;

    /// Case-insensitive lookup accepting the display label ("Service Desk")
    /// as well as kebab or snake forms ("service-desk").
    fn from_label(s: &str) -> Option<Self> {
        let wanted = normalize_label(s);
        Self::all()
            .iter()
            .copied()
            .find(|v| normalize_label(v.label()) == wanted)
    }

    fn parse(s: &str) -> Result<Self, ValidationError> {
        Self::from_label(s).ok_or_else(|| ValidationError::UnknownEnum {
            field: Self::FIELD,
            value: s.to_string(),
        })
    }

    /// Position within `all()`; used as a stable palette key.
    fn ordinal(self) -> usize {
        Self::all().iter().position(|v| *v == self).unwrap_or(0)
    }
}

pub(crate) fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_label("  Service_Desk "), "service desk");
        assert_eq!(normalize_label("short-term"), "short term");
        assert_eq!(normalize_label("Long   term"), "long term");
    }

    #[test]
    fn parse_reports_field_on_unknown_value() {
        let err = WorkStream::parse("Marketing").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownEnum {
                field: "work stream",
                value: "Marketing".into(),
            }
        );
    }

    #[test]
    fn ordinal_follows_declaration_order() {
        assert_eq!(WorkStream::ServiceDesk.ordinal(), 0);
        assert_eq!(WorkStream::Network.ordinal(), 4);
        assert_eq!(TimeHorizon::ShortTerm.ordinal(), 2);
    }
}
