use thiserror::Error;

use crate::types::WorkStream;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("initiative name must not be empty")]
    EmptyName,
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("unknown {field}: {value:?}")]
    UnknownEnum { field: &'static str, value: String },
    #[error("work stream is locked after creation ({current} cannot become {requested})")]
    WorkStreamLocked {
        current: WorkStream,
        requested: WorkStream,
    },
}
