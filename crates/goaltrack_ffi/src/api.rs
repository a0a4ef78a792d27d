//! FFI use-case API for GUI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the GUI shell via FRB.
//! - Return flat, UI-ready envelopes instead of core error types.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the configured database, so state lives only in storage.
//! - Calls are serialized process-wide; each one is a load-modify-save of
//!   whole entries and must not interleave with another.
//! - Delete confirmation happens in the UI; `confirmed=false` is a no-op.

use goaltrack_core::db::open_db;
use goaltrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, CardListView, DisplayPreferences, KvObjectiveRepository, KvPreferenceRepository,
    ObjectiveCard, ObjectiveForm, ObjectiveId, ObjectiveService, PreferenceService,
    SqliteKeyValueStore, SystemClock,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static CALL_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One objective card, flattened for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveCardItem {
    pub objective_id: String,
    pub title: String,
    pub description: String,
    pub progress_percent: u8,
    /// Display text such as `5 days` or `N/A`.
    pub days_remaining: String,
    /// Display text such as `5.00% per day` or `N/A`.
    pub daily_progress_needed: String,
    pub edit_label: String,
    pub delete_label: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveListResponse {
    pub ok: bool,
    pub items: Vec<ObjectiveCardItem>,
    pub message: String,
}

/// Generic action response envelope for objective mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveActionResponse {
    pub ok: bool,
    /// Affected objective ID when the action touched one.
    pub objective_id: Option<String>,
    /// Form field name for validation failures.
    pub field: Option<String>,
    pub message: String,
}

impl ObjectiveActionResponse {
    fn success(message: impl Into<String>, objective_id: Option<String>) -> Self {
        Self {
            ok: true,
            objective_id,
            field: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            objective_id: None,
            field: None,
            message: message.into(),
        }
    }
}

/// Form input as entered in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveFormInput {
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub current_progress: String,
    pub total_progress: String,
}

/// Display preferences envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesResponse {
    pub ok: bool,
    pub high_contrast: bool,
    pub font_size_px: f64,
    pub message: String,
}

/// Lists objective cards in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn objectives_list() -> ObjectiveListResponse {
    match with_objective_service(|service| Ok(service.view().cards().to_vec())) {
        Ok(cards) => ObjectiveListResponse {
            ok: true,
            items: cards.into_iter().map(to_card_item).collect(),
            message: String::new(),
        },
        Err(err) => ObjectiveListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("objectives_list failed: {err}"),
        },
    }
}

/// Creates an objective from form input.
#[flutter_rust_bridge::frb(sync)]
pub fn objective_create(input: ObjectiveFormInput) -> ObjectiveActionResponse {
    let form = to_form(input);
    match with_objective_service(|service| service.create(&form).map_err(FfiError::Service)) {
        Ok(id) => ObjectiveActionResponse::success("Objective created.", Some(id.to_string())),
        Err(err) => failure_response("objective_create", err),
    }
}

/// Replaces the fields of an existing objective.
#[flutter_rust_bridge::frb(sync)]
pub fn objective_update(
    objective_id: String,
    input: ObjectiveFormInput,
) -> ObjectiveActionResponse {
    let id = match parse_objective_id(&objective_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let form = to_form(input);
    match with_objective_service(|service| service.update(id, &form).map_err(FfiError::Service))
    {
        Ok(()) => ObjectiveActionResponse::success("Objective updated.", Some(objective_id)),
        Err(err) => failure_response("objective_update", err),
    }
}

/// Deletes an objective when the UI reports the user confirmed.
#[flutter_rust_bridge::frb(sync)]
pub fn objective_delete(objective_id: String, confirmed: bool) -> ObjectiveActionResponse {
    let id = match parse_objective_id(&objective_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut answer = |_message: &str| confirmed;
    match with_objective_service(|service| {
        service.delete(id, &mut answer).map_err(FfiError::Service)
    }) {
        Ok(true) => ObjectiveActionResponse::success("Objective deleted.", Some(objective_id)),
        Ok(false) => ObjectiveActionResponse::success("Delete cancelled.", None),
        Err(err) => failure_response("objective_delete", err),
    }
}

/// Reads both display preferences.
#[flutter_rust_bridge::frb(sync)]
pub fn preferences_get() -> PreferencesResponse {
    preferences_call("preferences_get", |_service| Ok(()))
}

/// Flips high-contrast mode.
#[flutter_rust_bridge::frb(sync)]
pub fn preferences_toggle_high_contrast() -> PreferencesResponse {
    preferences_call("preferences_toggle_high_contrast", |service| {
        service.toggle_high_contrast().map(|_| ())
    })
}

/// Grows the font by one step.
#[flutter_rust_bridge::frb(sync)]
pub fn preferences_font_increase() -> PreferencesResponse {
    preferences_call("preferences_font_increase", |service| {
        service.increase_font_size().map(|_| ())
    })
}

/// Shrinks the font by one step, never below the minimum size.
#[flutter_rust_bridge::frb(sync)]
pub fn preferences_font_decrease() -> PreferencesResponse {
    preferences_call("preferences_font_decrease", |service| {
        service.decrease_font_size().map(|_| ())
    })
}

enum FfiError {
    Open(String),
    Service(goaltrack_core::ObjectiveServiceError),
}

impl std::fmt::Display for FfiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(message) => write!(f, "{message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

type CardService<'conn> = ObjectiveService<
    KvObjectiveRepository<SqliteKeyValueStore<'conn>>,
    CardListView<SystemClock>,
>;

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| AppConfig::from_env().db_path)
        .clone()
}

fn lock_calls() -> MutexGuard<'static, ()> {
    // The guarded state is on disk; a panicked holder leaves nothing half-built.
    CALL_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_objective_service<T>(
    f: impl FnOnce(&mut CardService<'_>) -> Result<T, FfiError>,
) -> Result<T, FfiError> {
    let _guard = lock_calls();
    let conn = open_db(resolve_db_path())
        .map_err(|err| FfiError::Open(format!("DB open failed: {err}")))?;
    let repo = KvObjectiveRepository::new(SqliteKeyValueStore::new(&conn));
    let mut service = ObjectiveService::load(repo, CardListView::new(SystemClock))
        .map_err(|err| FfiError::Open(format!("objective load failed: {err}")))?;
    f(&mut service)
}

fn preferences_call(
    operation: &str,
    f: impl FnOnce(
        &mut PreferenceService<KvPreferenceRepository<SqliteKeyValueStore<'_>>>,
    ) -> goaltrack_core::RepoResult<()>,
) -> PreferencesResponse {
    let _guard = lock_calls();
    let outcome = open_db(resolve_db_path())
        .map_err(|err| format!("DB open failed: {err}"))
        .and_then(|conn| {
            let repo = KvPreferenceRepository::new(SqliteKeyValueStore::new(&conn));
            let mut service = PreferenceService::load(repo).map_err(|err| err.to_string())?;
            f(&mut service).map_err(|err| err.to_string())?;
            Ok(service.current())
        });

    match outcome {
        Ok(preferences) => preferences_response(preferences, String::new()),
        Err(message) => {
            warn!("event=ffi_call module=ffi status=error operation={operation}");
            let mut response = preferences_response(
                DisplayPreferences::default(),
                format!("{operation} failed: {message}"),
            );
            response.ok = false;
            response
        }
    }
}

fn preferences_response(preferences: DisplayPreferences, message: String) -> PreferencesResponse {
    PreferencesResponse {
        ok: true,
        high_contrast: preferences.high_contrast,
        font_size_px: preferences.effective_font_size_px(),
        message,
    }
}

fn parse_objective_id(raw: &str) -> Result<ObjectiveId, ObjectiveActionResponse> {
    uuid::Uuid::parse_str(raw.trim())
        .map_err(|_| ObjectiveActionResponse::failure(format!("invalid objective id: `{raw}`")))
}

fn failure_response(operation: &str, err: FfiError) -> ObjectiveActionResponse {
    warn!("event=ffi_call module=ffi status=error operation={operation}");
    let field = match &err {
        FfiError::Service(goaltrack_core::ObjectiveServiceError::Form(form_err)) => {
            Some(form_err.field().as_str().to_string())
        }
        _ => None,
    };
    ObjectiveActionResponse {
        field,
        ..ObjectiveActionResponse::failure(format!("{operation} failed: {err}"))
    }
}

fn to_form(input: ObjectiveFormInput) -> ObjectiveForm {
    ObjectiveForm {
        title: input.title,
        description: input.description,
        deadline: input.deadline,
        current_progress: input.current_progress,
        total_progress: input.total_progress,
    }
}

fn to_card_item(card: ObjectiveCard) -> ObjectiveCardItem {
    ObjectiveCardItem {
        objective_id: card.id.to_string(),
        days_remaining: card.days_remaining_label(),
        daily_progress_needed: card.daily_progress_label(),
        title: card.title,
        description: card.description,
        progress_percent: card.progress_percent,
        edit_label: card.edit_label,
        delete_label: card.delete_label,
    }
}
