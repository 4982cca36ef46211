use serde::Serialize;

use prio_core::{
    project, to_table, FilterOutcome, FilterSet, Initiative, InitiativeDraft, InitiativeId,
    PlotModel, TabularModel,
};
use prio_store::{CommitOutcome, FormController, InitiativeStore, StoreError};

use crate::router::View;

/// Store plus the state one render cycle reads: the last fetched snapshot and
/// the active filter selectors.
pub struct Dashboard {
    store: InitiativeStore,
    snapshot: Option<Vec<Initiative>>,
    filters: FilterSet,
    lock_work_stream: bool,
}

/// Everything a view needs to draw itself.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub view: View,
    pub filters: FilterSet,
    pub outcome: FilterOutcome,
    pub plot: PlotModel,
    pub table: TabularModel,
}

/// JSON hand-off for an external chart renderer.
#[derive(Debug, Serialize)]
pub struct ChartPayload<'a> {
    pub view: String,
    pub filters: &'a FilterSet,
    pub plot: &'a PlotModel,
    pub table: &'a TabularModel,
}

impl ViewModel {
    pub fn payload(&self) -> ChartPayload<'_> {
        ChartPayload {
            view: self.view.title(),
            filters: &self.filters,
            plot: &self.plot,
            table: &self.table,
        }
    }
}

impl Dashboard {
    pub fn new(store: InitiativeStore, lock_work_stream: bool) -> Self {
        Self {
            store,
            snapshot: None,
            filters: FilterSet::all(),
            lock_work_stream,
        }
    }

    pub fn store(&self) -> &InitiativeStore {
        &self.store
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&[Initiative]> {
        self.snapshot.as_deref()
    }

    /// Re-fetches the full record set. Returns the number of records.
    pub fn refresh(&mut self) -> Result<usize, StoreError> {
        let records = self.store.refresh()?;
        let count = records.len();
        self.snapshot = Some(records);
        tracing::debug!(count, "dashboard refreshed");
        Ok(count)
    }

    pub fn filters(&self) -> FilterSet {
        self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    /// Filters in effect for `view`: browse pins the work stream, master uses
    /// the selectors as set, add shows everything.
    pub fn filters_for(&self, view: View) -> FilterSet {
        match view {
            View::Add => FilterSet::all(),
            View::Browse(ws) => self.filters.with_work_stream(ws),
            View::Master => self.filters,
        }
    }

    pub fn view_model(&self, view: View) -> ViewModel {
        let filters = self.filters_for(view);
        let outcome = FilterOutcome::apply(self.snapshot(), &filters);
        let rows = outcome.rows();
        ViewModel {
            view,
            filters,
            plot: project(rows),
            table: to_table(rows),
            outcome,
        }
    }

    pub fn load_for_edit(&mut self, id: InitiativeId) -> Result<InitiativeDraft, StoreError> {
        let result = FormController::new(&mut self.store).load_for_edit(id);
        self.after_write(&result)?;
        result
    }

    /// Validates and commits a form, then re-fetches.
    pub fn submit(&mut self, draft: &InitiativeDraft) -> Result<CommitOutcome, StoreError> {
        let result = FormController::new(&mut self.store)
            .with_work_stream_lock(self.lock_work_stream)
            .submit(draft);
        self.after_write(&result)?;
        result
    }

    /// Deletes a record and returns what it held.
    pub fn remove(&mut self, id: InitiativeId) -> Result<Initiative, StoreError> {
        let result = self
            .store
            .get(id)
            .and_then(|record| self.store.delete(id).map(|()| record));
        self.after_write(&result)?;
        result
    }

    // Successful writes and vanished records both leave the snapshot stale.
    fn after_write<T>(&mut self, result: &Result<T, StoreError>) -> Result<(), StoreError> {
        match result {
            Ok(_) | Err(StoreError::NotFound(_)) => {
                self.refresh()?;
            }
            Err(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prio_core::{Selection, TimeHorizon, WorkStream};

    fn dashboard() -> Dashboard {
        Dashboard::new(InitiativeStore::open_in_memory().unwrap(), true)
    }

    fn draft(name: &str, ws: &str, th: &str) -> InitiativeDraft {
        InitiativeDraft {
            name: name.into(),
            impact: 6,
            feasibility: 4,
            work_stream: ws.into(),
            time_horizon: th.into(),
            ..Default::default()
        }
    }

    #[test]
    fn not_loaded_until_first_refresh() {
        let mut dash = dashboard();
        assert_eq!(dash.view_model(View::Master).outcome, FilterOutcome::NotLoaded);
        dash.refresh().unwrap();
        assert_eq!(dash.view_model(View::Master).outcome, FilterOutcome::EmptyStore);
    }

    #[test]
    fn submit_refreshes_the_snapshot() {
        let mut dash = dashboard();
        dash.submit(&draft("a", "Finance", "Short term")).unwrap();
        assert!(dash.is_loaded());
        assert_eq!(dash.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn browse_pins_its_work_stream_and_master_uses_selectors() {
        let mut dash = dashboard();
        dash.submit(&draft("f1", "Finance", "Short term")).unwrap();
        dash.submit(&draft("n1", "Network", "Long term")).unwrap();
        dash.submit(&draft("f2", "Finance", "Long term")).unwrap();

        let browse = dash.view_model(View::Browse(WorkStream::Finance));
        assert_eq!(browse.table.rows.len(), 2);
        assert_eq!(browse.plot.points.len(), 2);

        dash.set_filters(FilterSet::all().with_time_horizon(TimeHorizon::LongTerm));
        let master = dash.view_model(View::Master);
        let names: Vec<_> = master.outcome.rows().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["n1", "f2"]);

        let browse = dash.view_model(View::Browse(WorkStream::Finance));
        assert_eq!(browse.filters.work_stream, Selection::Only(WorkStream::Finance));
        assert_eq!(browse.outcome.rows().len(), 1);

        dash.set_filters(FilterSet::all().with_work_stream(WorkStream::Deployment));
        assert_eq!(
            dash.view_model(View::Master).outcome,
            FilterOutcome::NoMatch { total: 3 }
        );
    }

    #[test]
    fn remove_returns_the_deleted_record() {
        let mut dash = dashboard();
        let id = dash.submit(&draft("gone", "Network", "Medium term")).unwrap().id();
        let removed = dash.remove(id).unwrap();
        assert_eq!(removed.name(), "gone");
        assert!(dash.snapshot().unwrap().is_empty());
        assert!(matches!(dash.remove(id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn failed_validation_leaves_snapshot_alone() {
        let mut dash = dashboard();
        let err = dash.submit(&draft("", "Finance", "Short term")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!dash.is_loaded());
    }

    #[test]
    fn payload_serializes_plot_and_table() {
        let mut dash = dashboard();
        dash.submit(&draft("a", "Finance", "Short term")).unwrap();
        let model = dash.view_model(View::Master);
        let json = serde_json::to_value(model.payload()).unwrap();
        assert_eq!(json["plot"]["points"][0]["x"], 6);
        assert_eq!(json["table"]["rows"][0][1], "a");
        assert_eq!(json["filters"]["work_stream"], "All");
    }
}
