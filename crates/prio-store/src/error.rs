use prio_core::{InitiativeId, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("initiative {0} no longer exists")]
    NotFound(InitiativeId),
    // Not a `source`: the message already carries the reason.
    #[error("invalid input: {0}")]
    Validation(ValidationError),
    #[error("database error")]
    Persistence(#[from] rusqlite::Error),
    #[error("corrupt row {id}: {column} = {value:?}")]
    CorruptRow {
        id: i64,
        column: &'static str,
        value: String,
    },
    #[error("cannot open database at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl StoreError {
    /// Validation and not-found failures are reported to the user as warnings;
    /// everything else aborts the current operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn each_message_appears_once_in_the_chain() {
        let err = StoreError::from(ValidationError::EmptyName);
        assert_eq!(err.to_string(), "invalid input: initiative name must not be empty");
        assert!(err.source().is_none());

        let err = StoreError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.to_string(), "database error");
        assert!(err.source().is_some());

        let err = StoreError::Open {
            path: PathBuf::from("/nowhere/initiatives.db"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.to_string(), "cannot open database at /nowhere/initiatives.db");
        assert!(err.source().is_some());
    }
}
