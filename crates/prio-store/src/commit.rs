//! Commit step of the record forms: staged input goes to `create` or `update`.

use prio_core::form::check_work_stream_lock;
use prio_core::{validate_and_stage, InitiativeDraft, InitiativeId, ValidatedRecord};

use crate::{InitiativeStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(InitiativeId),
    Updated(InitiativeId),
}

impl CommitOutcome {
    pub fn id(&self) -> InitiativeId {
        match self {
            Self::Created(id) | Self::Updated(id) => *id,
        }
    }
}

pub struct FormController<'a> {
    store: &'a mut InitiativeStore,
    lock_work_stream: bool,
}

impl<'a> FormController<'a> {
    /// Controller with the work stream locked on edit.
    pub fn new(store: &'a mut InitiativeStore) -> Self {
        Self {
            store,
            lock_work_stream: true,
        }
    }

    pub fn with_work_stream_lock(mut self, locked: bool) -> Self {
        self.lock_work_stream = locked;
        self
    }

    /// Edit form defaults for `id`, read fresh from the table.
    pub fn load_for_edit(&self, id: InitiativeId) -> Result<InitiativeDraft, StoreError> {
        let existing = self.store.get(id)?;
        Ok(InitiativeDraft::for_edit(&existing))
    }

    /// Validates and commits in one call. Invalid input never reaches the
    /// store.
    pub fn submit(&mut self, draft: &InitiativeDraft) -> Result<CommitOutcome, StoreError> {
        let staged = validate_and_stage(draft).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected form input");
        })?;
        self.commit(staged)
    }

    pub fn commit(&mut self, staged: ValidatedRecord) -> Result<CommitOutcome, StoreError> {
        match staged.target() {
            None => {
                let (_, fields) = staged.into_parts();
                let id = self.store.create(&fields)?;
                Ok(CommitOutcome::Created(id))
            }
            Some(id) => {
                // The record may have been removed since the form was loaded.
                let existing = self.store.get(id).inspect_err(|e| {
                    if matches!(e, StoreError::NotFound(_)) {
                        tracing::warn!(%id, "edit target vanished before commit");
                    }
                })?;
                if self.lock_work_stream {
                    check_work_stream_lock(&existing, &staged)?;
                }
                let (_, fields) = staged.into_parts();
                self.store.update(id, &fields)?;
                Ok(CommitOutcome::Updated(id))
            }
        }
    }
}
