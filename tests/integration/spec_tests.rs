use prio_core::{
    filter, project, scope, to_table, FilterOutcome, FilterSet, InitiativeDraft, InitiativeFields,
    InitiativeId, Selection, TimeHorizon, ValidationError, WorkStream,
};
use prio_store::{CommitOutcome, FormController, InitiativeStore, StoreError};

fn make_test_store() -> (tempfile::TempDir, InitiativeStore) {
    let tmp = tempfile::tempdir().unwrap();
    let store = InitiativeStore::open(&tmp.path().join("initiatives.db")).unwrap();
    (tmp, store)
}

fn fields(name: &str, impact: i64, feasibility: i64, ws: WorkStream, th: TimeHorizon) -> InitiativeFields {
    InitiativeFields {
        name: name.to_string(),
        impact,
        feasibility,
        work_stream: ws,
        time_horizon: th,
        description: None,
    }
}

// === Test 1: Upgrade ticketing lifecycle ===
#[test]
fn test_upgrade_ticketing_lifecycle() {
    let (_tmp, mut store) = make_test_store();

    let draft = InitiativeDraft {
        name: "Upgrade ticketing".to_string(),
        impact: 7,
        feasibility: 3,
        work_stream: "Service Desk".to_string(),
        time_horizon: "Short term".to_string(),
        ..Default::default()
    };
    let outcome = FormController::new(&mut store).submit(&draft).unwrap();
    let CommitOutcome::Created(id) = outcome else {
        panic!("expected a new record, got {outcome:?}");
    };

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(
        all[0].fields,
        fields("Upgrade ticketing", 7, 3, WorkStream::ServiceDesk, TimeHorizon::ShortTerm)
    );

    let finance = FilterSet::all().with_work_stream(WorkStream::Finance);
    assert!(filter(&all, &finance).is_empty());
    let service_desk = FilterSet::all().with_work_stream(WorkStream::ServiceDesk);
    assert_eq!(filter(&all, &service_desk), all);

    let mut edit = FormController::new(&mut store).load_for_edit(id).unwrap();
    edit.feasibility = 9;
    let outcome = FormController::new(&mut store).submit(&edit).unwrap();
    assert_eq!(outcome, CommitOutcome::Updated(id));

    let all = store.list_all().unwrap();
    assert_eq!(all[0].fields.feasibility, 9);
    assert_eq!(all[0].fields.impact, 7);
    assert_eq!(all[0].name(), "Upgrade ticketing");
    assert_eq!(all[0].work_stream(), WorkStream::ServiceDesk);
    assert_eq!(all[0].time_horizon(), TimeHorizon::ShortTerm);

    store.delete(id).unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

// === Test 2: Empty name never reaches the store ===
#[test]
fn test_empty_name_creates_nothing() {
    let (_tmp, mut store) = make_test_store();

    let draft = InitiativeDraft {
        name: "   ".to_string(),
        ..Default::default()
    };
    let err = FormController::new(&mut store).submit(&draft).unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::EmptyName)));
    assert!(store.list_all().unwrap().is_empty());
}

// === Test 3: Update touches only its target ===
#[test]
fn test_update_isolation() {
    let (_tmp, mut store) = make_test_store();
    let a = store
        .create(&fields("a", 1, 1, WorkStream::Finance, TimeHorizon::LongTerm))
        .unwrap();
    let b = store
        .create(&fields("b", 2, 2, WorkStream::Network, TimeHorizon::MediumTerm))
        .unwrap();
    let before = store.list_all().unwrap();

    let replacement = fields("a2", 10, 0, WorkStream::Finance, TimeHorizon::ShortTerm);
    store.update(a, &replacement).unwrap();

    let after = store.list_all().unwrap();
    assert_eq!(after.len(), 2);
    assert_eq!(after[0].fields, replacement);
    let untouched = after.iter().find(|r| r.id == b).unwrap();
    let original = before.iter().find(|r| r.id == b).unwrap();
    assert_eq!(untouched, original);

    let missing = store.update(InitiativeId::new(999), &replacement).unwrap_err();
    assert!(matches!(missing, StoreError::NotFound(_)));
}

// === Test 4: Double delete reports not-found and changes nothing ===
#[test]
fn test_double_delete() {
    let (_tmp, mut store) = make_test_store();
    let keep = store
        .create(&fields("keep", 5, 5, WorkStream::Reliability, TimeHorizon::LongTerm))
        .unwrap();
    let gone = store
        .create(&fields("gone", 5, 5, WorkStream::Reliability, TimeHorizon::LongTerm))
        .unwrap();

    store.delete(gone).unwrap();
    let snapshot = store.list_all().unwrap();
    assert!(snapshot.iter().all(|r| r.id != gone));

    let err = store.delete(gone).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == gone));
    assert_eq!(store.list_all().unwrap(), snapshot);
    assert_eq!(snapshot[0].id, keep);
}

// === Test 5: Filters are conjunctive and stable ===
#[test]
fn test_filter_stability() {
    let (_tmp, mut store) = make_test_store();
    let rows = [
        ("d1", WorkStream::Deployment, TimeHorizon::ShortTerm),
        ("f1", WorkStream::Finance, TimeHorizon::ShortTerm),
        ("d2", WorkStream::Deployment, TimeHorizon::LongTerm),
        ("d3", WorkStream::Deployment, TimeHorizon::ShortTerm),
    ];
    for (name, ws, th) in rows {
        store.create(&fields(name, 4, 6, ws, th)).unwrap();
    }
    let all = store.list_all().unwrap();

    assert_eq!(filter(&all, &FilterSet::all()), all);

    let deployment: Vec<_> = scope(&all, WorkStream::Deployment)
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(deployment, ["d1", "d2", "d3"]);

    let set = FilterSet {
        work_stream: Selection::Only(WorkStream::Deployment),
        time_horizon: Selection::Only(TimeHorizon::ShortTerm),
    };
    let both: Vec<_> = filter(&all, &set).iter().map(|r| r.name().to_string()).collect();
    assert_eq!(both, ["d1", "d3"]);

    let none = FilterSet::all().with_work_stream(WorkStream::Network);
    assert_eq!(
        FilterOutcome::apply(Some(all.as_slice()), &none),
        FilterOutcome::NoMatch { total: 4 }
    );
    assert_eq!(FilterOutcome::apply(None, &none), FilterOutcome::NotLoaded);
}

// === Test 6: Projection stays inside the axis domain ===
#[test]
fn test_projection_clamps_for_display_only() {
    let (_tmp, mut store) = make_test_store();
    // Rows written by another tool can hold scores outside the form's range.
    let id = store
        .create(&fields("loud", 14, -2, WorkStream::Network, TimeHorizon::MediumTerm))
        .unwrap();
    store
        .create(&fields("quiet", 3, 8, WorkStream::Finance, TimeHorizon::LongTerm))
        .unwrap();
    let all = store.list_all().unwrap();

    let plot = project(&all);
    assert_eq!(plot.points.len(), 2);
    assert!(plot
        .points
        .iter()
        .all(|p| (0..=10).contains(&p.x) && (0..=10).contains(&p.y)));
    assert_eq!((plot.points[0].x, plot.points[0].y), (10, 0));
    assert!(plot.points[0].clamped);
    assert!(!plot.points[1].clamped);

    assert_eq!(store.get(id).unwrap().fields.impact, 14);

    let table = to_table(&all);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][2], "14");

    let json = serde_json::to_value(&plot).unwrap();
    assert_eq!(json["points"][0]["marker"], "square");
    assert_eq!(json["x_axis"]["max"], 10);
}

// === Test 7: Records survive reopening the database file ===
#[test]
fn test_file_persistence() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("initiatives.db");

    let id = {
        let mut store = InitiativeStore::open(&path).unwrap();
        let mut f = fields("Ledger cleanup", 6, 7, WorkStream::Finance, TimeHorizon::MediumTerm);
        f.description = Some("quarter close".to_string());
        store.create(&f).unwrap()
    };

    let mut reopened = InitiativeStore::open(&path).unwrap();
    let all = reopened.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].fields.description.as_deref(), Some("quarter close"));
}

// === Test 8: Work stream is locked once created ===
#[test]
fn test_work_stream_lock() {
    let (_tmp, mut store) = make_test_store();
    let id = store
        .create(&fields("Patch rollout", 5, 5, WorkStream::Deployment, TimeHorizon::ShortTerm))
        .unwrap();

    let mut edit = FormController::new(&mut store).load_for_edit(id).unwrap();
    edit.work_stream = "Reliability".to_string();
    let err = FormController::new(&mut store).submit(&edit).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::WorkStreamLocked { .. })
    ));
    assert_eq!(store.get(id).unwrap().work_stream(), WorkStream::Deployment);

    FormController::new(&mut store)
        .with_work_stream_lock(false)
        .submit(&edit)
        .unwrap();
    assert_eq!(store.get(id).unwrap().work_stream(), WorkStream::Reliability);
}

// === Test 9: Editing a record deleted mid-flight ===
#[test]
fn test_edit_of_vanished_record() {
    let (_tmp, mut store) = make_test_store();
    let id = store
        .create(&fields("Short lived", 2, 2, WorkStream::Network, TimeHorizon::LongTerm))
        .unwrap();
    let edit = FormController::new(&mut store).load_for_edit(id).unwrap();
    store.delete(id).unwrap();

    let err = FormController::new(&mut store).submit(&edit).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(err.is_recoverable());
    assert_eq!(err.to_string(), format!("initiative {id} no longer exists"));
    assert!(store.list_all().unwrap().is_empty());
}
