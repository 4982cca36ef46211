pub mod error;
pub mod filter;
pub mod form;
pub mod plot;
pub mod types;

pub use error::ValidationError;
pub use filter::{filter, scope, FilterOutcome, FilterSet, Selection};
pub use form::{validate_and_stage, InitiativeDraft, ValidatedRecord};
pub use plot::{project, to_table, PlotModel, TabularModel};
pub use types::{Category, Initiative, InitiativeFields, InitiativeId, TimeHorizon, WorkStream};
