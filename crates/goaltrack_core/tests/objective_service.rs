use chrono::NaiveDate;
use goaltrack_core::db::{open_db_in_memory, DbError};
use goaltrack_core::repo::objective_repo::OBJECTIVES_KEY;
use goaltrack_core::{
    CardListView, FixedClock, FormError, FormField, FormMode, KeyValueStore,
    KvObjectiveRepository, NullView, Objective, ObjectiveForm, ObjectiveListView,
    ObjectiveRepository, ObjectiveService, ObjectiveServiceError, RepoError, RepoResult,
    SqliteKeyValueStore,
};
use std::cell::Cell;
use uuid::Uuid;

fn form(title: &str) -> ObjectiveForm {
    ObjectiveForm {
        title: title.to_string(),
        description: format!("{title} description"),
        ..ObjectiveForm::default()
    }
}

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    )
}

#[derive(Default)]
struct RecordingView {
    renders: Vec<Vec<String>>,
}

impl ObjectiveListView for RecordingView {
    fn render(&mut self, objectives: &[Objective]) {
        self.renders
            .push(objectives.iter().map(|o| o.title.clone()).collect());
    }
}

#[test]
fn load_renders_persisted_list_once() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    KvObjectiveRepository::new(&store)
        .save_objectives(&[Objective::new("A", "a")])
        .unwrap();

    let service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), RecordingView::default())
            .unwrap();
    assert_eq!(service.view().renders, vec![vec!["A".to_string()]]);
}

#[test]
fn create_appends_with_defaults_persists_and_renders() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), RecordingView::default())
            .unwrap();

    let id = service.create(&form("A")).unwrap();

    let objectives = service.objectives();
    assert_eq!(objectives.len(), 1);
    assert_eq!(objectives[0].id, id);
    assert_eq!(objectives[0].title, "A");
    assert_eq!(objectives[0].description, "A description");
    assert_eq!(objectives[0].current_progress, 0);
    assert_eq!(objectives[0].total_progress, 100);
    assert_eq!(objectives[0].deadline, None);

    let persisted = KvObjectiveRepository::new(&store).load_objectives().unwrap();
    assert_eq!(persisted, objectives);
    assert_eq!(service.view().renders.len(), 2);
}

#[test]
fn create_rejects_invalid_form_without_mutating() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), RecordingView::default())
            .unwrap();

    let mut bad = form("A");
    bad.total_progress = "0".to_string();
    let err = service.create(&bad).unwrap_err();
    assert!(matches!(
        err,
        ObjectiveServiceError::Form(FormError::TotalBelowMinimum(0))
    ));

    let err = service.create(&form("")).unwrap_err();
    assert!(matches!(
        err,
        ObjectiveServiceError::Form(FormError::MissingField(FormField::Title))
    ));

    assert!(service.objectives().is_empty());
    assert_eq!(service.view().renders.len(), 1);
    assert_eq!(store.get("objectives").unwrap(), None);
}

#[test]
fn update_replaces_in_place_and_keeps_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), NullView).unwrap();

    let first = service.create(&form("A")).unwrap();
    let second = service.create(&form("B")).unwrap();

    let mut edit = service.edit_form(first).unwrap();
    assert_eq!(edit.mode, FormMode::Edit(first));
    edit.fields.title = "A2".to_string();
    edit.fields.current_progress = "40".to_string();
    edit.fields.deadline = "2026-12-01".to_string();
    service.update(first, &edit.fields).unwrap();

    let objectives = service.objectives();
    assert_eq!(objectives[0].id, first);
    assert_eq!(objectives[0].title, "A2");
    assert_eq!(objectives[0].current_progress, 40);
    assert_eq!(objectives[0].deadline, NaiveDate::from_ymd_opt(2026, 12, 1));
    assert_eq!(objectives[1].id, second);

    let persisted = KvObjectiveRepository::new(&store).load_objectives().unwrap();
    assert_eq!(persisted[0].title, "A2");
}

#[test]
fn legacy_list_ids_survive_reload_and_accept_updates() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .set(
            OBJECTIVES_KEY,
            r#"[{"title":"A","description":"a","deadline":"","currentProgress":5,"totalProgress":10}]"#,
        )
        .unwrap();

    let listed = ObjectiveService::load(KvObjectiveRepository::new(&store), NullView)
        .unwrap()
        .id_at(0)
        .unwrap();

    // Each GUI call reloads the service from storage.
    let mut reloaded =
        ObjectiveService::load(KvObjectiveRepository::new(&store), NullView).unwrap();
    assert_eq!(reloaded.id_at(0), Some(listed));

    reloaded.update(listed, &form("A2")).unwrap();
    let persisted = KvObjectiveRepository::new(&store).load_objectives().unwrap();
    assert_eq!(persisted[0].id, listed);
    assert_eq!(persisted[0].title, "A2");
}

#[test]
fn update_with_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), NullView).unwrap();

    let missing = Uuid::new_v4();
    let err = service.update(missing, &form("A")).unwrap_err();
    assert!(matches!(err, ObjectiveServiceError::ObjectiveNotFound(id) if id == missing));
    assert!(matches!(
        service.edit_form(missing),
        Err(ObjectiveServiceError::ObjectiveNotFound(_))
    ));
}

#[test]
fn declined_delete_leaves_list_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), RecordingView::default())
            .unwrap();
    let id = service.create(&form("A")).unwrap();
    let before = store.get("objectives").unwrap();
    let renders_before = service.view().renders.len();

    let asked = Cell::new(0);
    let mut decline = |_message: &str| {
        asked.set(asked.get() + 1);
        false
    };
    assert!(!service.delete(id, &mut decline).unwrap());

    assert_eq!(asked.get(), 1);
    assert_eq!(service.objectives().len(), 1);
    assert_eq!(store.get("objectives").unwrap(), before);
    assert_eq!(service.view().renders.len(), renders_before);
}

#[test]
fn confirmed_delete_removes_one_and_shifts_positions() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), NullView).unwrap();
    let a = service.create(&form("A")).unwrap();
    let b = service.create(&form("B")).unwrap();
    let c = service.create(&form("C")).unwrap();

    let mut accept = |_message: &str| true;
    assert!(service.delete(b, &mut accept).unwrap());

    assert_eq!(service.objectives().len(), 2);
    assert_eq!(service.id_at(0), Some(a));
    assert_eq!(service.id_at(1), Some(c));
    assert_eq!(service.position_of(c), Some(1));
    assert_eq!(service.position_of(b), None);

    let persisted = KvObjectiveRepository::new(&store).load_objectives().unwrap();
    assert_eq!(persisted.len(), 2);
}

#[test]
fn delete_of_unknown_id_does_not_prompt() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), NullView).unwrap();

    let mut prompt = |_message: &str| -> bool { panic!("must not prompt for a stale id") };
    let err = service.delete(Uuid::new_v4(), &mut prompt).unwrap_err();
    assert!(matches!(err, ObjectiveServiceError::ObjectiveNotFound(_)));
}

#[test]
fn cancel_edit_rerenders_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), RecordingView::default())
            .unwrap();
    service.create(&form("A")).unwrap();
    let blob = store.get("objectives").unwrap();

    service.cancel_edit();

    let renders = &service.view().renders;
    assert_eq!(renders.len(), 3);
    assert_eq!(renders[1], renders[2]);
    assert_eq!(store.get("objectives").unwrap(), blob);
}

#[test]
fn card_view_reflects_latest_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(&store), CardListView::new(clock()))
            .unwrap();

    let mut input = form("Half");
    input.current_progress = "50".to_string();
    input.deadline = "2026-10-29".to_string();
    service.create(&input).unwrap();

    let cards = service.view().cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].progress_percent, 50);
    assert_eq!(cards[0].days_remaining, Some(10));
    assert_eq!(cards[0].daily_progress_needed, Some(5.0));
    assert_eq!(service.view().render_count(), 2);
}

struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> RepoResult<()> {
        let full = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL);
        Err(RepoError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(
            full,
            Some("database or disk is full".to_string()),
        ))))
    }

    fn remove(&self, _key: &str) -> RepoResult<()> {
        Ok(())
    }
}

#[test]
fn failed_save_is_surfaced_and_keeps_previous_list() {
    let mut service =
        ObjectiveService::load(KvObjectiveRepository::new(FullStore), RecordingView::default())
            .unwrap();

    let err = service.create(&form("A")).unwrap_err();
    assert!(matches!(err, ObjectiveServiceError::Repo(_)));
    assert!(err.to_string().contains("full"));
    assert!(service.objectives().is_empty());
    assert_eq!(service.view().renders.len(), 1);
}
