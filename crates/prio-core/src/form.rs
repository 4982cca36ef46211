//! Validation and staging for the add and edit forms.
//!
//! Staging is pure: it turns raw form input into an [`InitiativeFields`] value
//! (plus the id being edited, if any) or a [`ValidationError`]. Persisting the
//! staged record is a separate step owned by the store crate.

use crate::error::ValidationError;
use crate::types::{
    Category, Initiative, InitiativeFields, InitiativeId, TimeHorizon, WorkStream, SCORE_MAX,
    SCORE_MIN,
};

/// Default slider position for a blank add form.
pub const DEFAULT_SCORE: i64 = 5;

/// Raw form input, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiativeDraft {
    /// Set when the draft edits an existing record.
    pub id: Option<InitiativeId>,
    pub name: String,
    pub impact: i64,
    pub feasibility: i64,
    pub work_stream: String,
    pub time_horizon: String,
    pub description: Option<String>,
}

impl Default for InitiativeDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            impact: DEFAULT_SCORE,
            feasibility: DEFAULT_SCORE,
            work_stream: WorkStream::ALL[0].as_str().to_string(),
            time_horizon: TimeHorizon::ALL[0].as_str().to_string(),
            description: None,
        }
    }
}

impl InitiativeDraft {
    /// Edit form pre-populated from an existing record.
    pub fn for_edit(existing: &Initiative) -> Self {
        let f = &existing.fields;
        Self {
            id: Some(existing.id),
            name: f.name.clone(),
            impact: f.impact,
            feasibility: f.feasibility,
            work_stream: f.work_stream.as_str().to_string(),
            time_horizon: f.time_horizon.as_str().to_string(),
            description: f.description.clone(),
        }
    }
}

/// Form input that passed validation and is ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    target: Option<InitiativeId>,
    fields: InitiativeFields,
}

impl ValidatedRecord {
    /// The record being edited, or `None` for a new record.
    pub fn target(&self) -> Option<InitiativeId> {
        self.target
    }

    pub fn fields(&self) -> &InitiativeFields {
        &self.fields
    }

    pub fn into_parts(self) -> (Option<InitiativeId>, InitiativeFields) {
        (self.target, self.fields)
    }
}

pub fn validate_and_stage(draft: &InitiativeDraft) -> Result<ValidatedRecord, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let impact = check_score("impact", draft.impact)?;
    let feasibility = check_score("feasibility", draft.feasibility)?;
    let work_stream = WorkStream::parse(&draft.work_stream)?;
    let time_horizon = TimeHorizon::parse(&draft.time_horizon)?;
    let description = draft
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(ValidatedRecord {
        target: draft.id,
        fields: InitiativeFields {
            name: name.to_string(),
            impact,
            feasibility,
            work_stream,
            time_horizon,
            description,
        },
    })
}

/// Rejects an edit that moves a record to a different work stream.
pub fn check_work_stream_lock(
    existing: &Initiative,
    staged: &ValidatedRecord,
) -> Result<(), ValidationError> {
    let current = existing.work_stream();
    let requested = staged.fields.work_stream;
    if current != requested {
        return Err(ValidationError::WorkStreamLocked { current, requested });
    }
    Ok(())
}

fn check_score(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: SCORE_MIN,
            max: SCORE_MAX,
        });
    }
    Ok(value)
}
