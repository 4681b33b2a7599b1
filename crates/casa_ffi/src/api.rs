//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose household use cases to Dart via FRB.
//! - Map core outcomes to flat `ok + message` envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Storage-backed calls are not `sync`; FRB runs them on its worker pool,
//!   so Dart awaits them like the original async storage calls.
//! - Slice read-modify-write cycles are serialized process-wide.

use casa_core::calendar::{events_in_month, malformed_event_dates};
use casa_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, BetBoard, BetDraft, CalendarBook, CalendarEvent, DateKey, EventDraft,
    LoadOutcome, MonthGrid, NewTask, Persistence, SaveOutcome, SliceKey, SliceStore,
    SqliteKvStore, TaskBoard, YearMonth,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

const STORE_DB_FILE_NAME: &str = "casa_store.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SLICE_EDIT_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
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
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   blank picks the build default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(effective_level(&level), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

fn effective_level(level: &str) -> &str {
    let trimmed = level.trim();
    if trimmed.is_empty() {
        default_log_level()
    } else {
        trimmed
    }
}

/// Raw slice document returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceLoadResponse {
    /// `false` only when the key is unknown or the store failed.
    pub ok: bool,
    /// JSON text; `None` when nothing is stored yet.
    pub json: Option<String>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or affected record.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Month grid layout for a 7-column, Sunday-first view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGridResponse {
    pub ok: bool,
    /// Blank cells before day 1 (0 = Sunday).
    pub leading_blanks: u32,
    pub days_in_month: u32,
    /// `DD/MM/YYYY` key of each day, index 0 = day 1.
    pub date_keys: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventItem {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    pub time: String,
}

/// Events of one month ordered by day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventsResponse {
    pub ok: bool,
    pub items: Vec<CalendarEventItem>,
    /// Stored events whose date could not be read (month-independent).
    pub malformed_count: u32,
    pub message: String,
}

/// Reads the JSON document stored for slice `key`.
///
/// # FFI contract
/// - Async on the Dart side (FRB worker pool).
/// - Unknown keys are refused; a missing document is `ok` with `json=None`.
pub fn slice_load(key: String) -> SliceLoadResponse {
    let Some(slice_key) = SliceKey::parse(&key) else {
        return SliceLoadResponse {
            ok: false,
            json: None,
            message: format!("unknown slice key `{key}`"),
        };
    };
    let store = match open_store() {
        Ok(store) => store,
        Err(err) => {
            return SliceLoadResponse {
                ok: false,
                json: None,
                message: err,
            }
        }
    };

    match store.load_raw(&slice_key.name()) {
        LoadOutcome::Loaded(json) => SliceLoadResponse {
            ok: true,
            json: Some(json),
            message: "Loaded.".to_string(),
        },
        LoadOutcome::Missing => SliceLoadResponse {
            ok: true,
            json: None,
            message: "Nothing stored.".to_string(),
        },
        LoadOutcome::DecodeFailed(reason) | LoadOutcome::StoreFailed(reason) => {
            SliceLoadResponse {
                ok: false,
                json: None,
                message: format!("slice_load failed: {reason}"),
            }
        }
    }
}

/// Replaces the whole JSON document of slice `key`.
///
/// # FFI contract
/// - Async on the Dart side (FRB worker pool).
/// - Refuses unknown keys and text that is not JSON.
pub fn slice_save(key: String, json: String) -> ActionResponse {
    let Some(slice_key) = SliceKey::parse(&key) else {
        return ActionResponse::failure(format!("unknown slice key `{key}`"));
    };
    let _guard = lock_slice_edits();
    let store = match open_store() {
        Ok(store) => store,
        Err(err) => return ActionResponse::failure(err),
    };
    match store.save_raw(&slice_key.name(), &json) {
        SaveOutcome::Saved => ActionResponse::success("Saved.", None),
        failure => ActionResponse::failure(save_failure_message("slice_save", &failure)),
    }
}

/// Grid layout for `month` (1-12) of `year`.
///
/// # FFI contract
/// - Sync call, pure computation.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month_grid(year: i32, month: u32) -> CalendarGridResponse {
    match YearMonth::new(year, month) {
        Ok(ym) => {
            let grid = MonthGrid::build(ym);
            let date_keys = grid
                .cells
                .iter()
                .filter_map(|cell| cell.day())
                .map(|day| casa_core::format_date(day, month, year))
                .collect::<Vec<_>>();
            CalendarGridResponse {
                ok: true,
                leading_blanks: casa_core::first_weekday_of_month(ym),
                days_in_month: casa_core::days_in_month(ym),
                date_keys,
                message: String::new(),
            }
        }
        Err(err) => CalendarGridResponse {
            ok: false,
            leading_blanks: 0,
            days_in_month: 0,
            date_keys: Vec::new(),
            message: err.to_string(),
        },
    }
}

/// Events stored in the personal calendar for `month` of `year`.
pub fn calendar_month_events(year: i32, month: u32) -> CalendarEventsResponse {
    let failure = |message: String| CalendarEventsResponse {
        ok: false,
        items: Vec::new(),
        malformed_count: 0,
        message,
    };
    let ym = match YearMonth::new(year, month) {
        Ok(ym) => ym,
        Err(err) => return failure(err.to_string()),
    };
    let store = match open_store() {
        Ok(store) => store,
        Err(err) => return failure(err),
    };
    let book = CalendarBook::open(Persistence::Direct(store));
    let events = book.events();

    let items = events_in_month(events, ym)
        .into_iter()
        .map(to_event_item)
        .collect::<Vec<_>>();
    let malformed_count = malformed_event_dates(events).len() as u32;
    CalendarEventsResponse {
        ok: true,
        message: format!("Found {} event(s).", items.len()),
        items,
        malformed_count,
    }
}

/// Adds an event on `date` (`DD/MM/YYYY`), or edits it when `id` is set.
pub fn calendar_save_event(
    date: String,
    id: Option<String>,
    title: String,
    description: String,
    time: String,
) -> ActionResponse {
    let date = match DateKey::parse(&date) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("calendar_save_event failed: {err}")),
    };
    let draft = EventDraft {
        id,
        title: title.trim().to_string(),
        description,
        time,
    };
    let result = with_service(CalendarBook::open, |book| {
        let saved = book.save_event(date, draft);
        (saved, book.slice().last_save().cloned())
    });
    match result {
        Ok((Some(id), save)) => finish("calendar_save_event", "Event saved.", id, save),
        Ok((None, _)) => {
            ActionResponse::failure("calendar_save_event failed: blank title or unknown id")
        }
        Err(err) => ActionResponse::failure(err),
    }
}

pub fn calendar_delete_event(id: String) -> ActionResponse {
    let result = with_service(CalendarBook::open, |book| {
        let removed = book.delete_event(&id).map(|event| event.id);
        (removed, book.slice().last_save().cloned())
    });
    match result {
        Ok((Some(id), save)) => finish("calendar_delete_event", "Event deleted.", id, save),
        Ok((None, _)) => ActionResponse::failure(format!("no event with id `{id}`")),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Creates a household task. Empty `category`/`responsible` fall back to
/// the form defaults.
pub fn tasks_add(
    title: String,
    category: String,
    responsible: String,
    due_date: String,
) -> ActionResponse {
    let defaults = NewTask::default();
    let input = NewTask {
        title: title.trim().to_string(),
        category: non_empty_or(category, defaults.category),
        responsible: non_empty_or(responsible, defaults.responsible),
        due_date,
    };
    let result = with_service(TaskBoard::open, |board| {
        let added = board.add_task(input);
        (added, board.slice().last_save().cloned())
    });
    match result {
        Ok((Ok(id), save)) => finish("tasks_add", "Task created.", id, save),
        Ok((Err(err), _)) => ActionResponse::failure(format!("tasks_add failed: {err}")),
        Err(err) => ActionResponse::failure(err),
    }
}

pub fn tasks_toggle(id: String) -> ActionResponse {
    let result = with_service(TaskBoard::open, |board| {
        let completed = board.toggle_task(&id);
        (completed, board.slice().last_save().cloned())
    });
    match result {
        Ok((Some(completed), save)) => {
            let message = if completed {
                "Task completed."
            } else {
                "Task reopened."
            };
            finish("tasks_toggle", message, id, save)
        }
        Ok((None, _)) => ActionResponse::failure(format!("no task with id `{id}`")),
        Err(err) => ActionResponse::failure(err),
    }
}

pub fn tasks_delete(id: String) -> ActionResponse {
    let result = with_service(TaskBoard::open, |board| {
        let removed = board.delete_task(&id).map(|task| task.id);
        (removed, board.slice().last_save().cloned())
    });
    match result {
        Ok((Some(id), save)) => finish("tasks_delete", "Task deleted.", id, save),
        Ok((None, _)) => ActionResponse::failure(format!("no task with id `{id}`")),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Records a match prediction dated today.
pub fn bets_place(
    championship: String,
    home_team: String,
    away_team: String,
    home_goals: String,
    away_goals: String,
) -> ActionResponse {
    let draft = BetDraft {
        championship: championship.trim().to_string(),
        home_team: home_team.trim().to_string(),
        away_team: away_team.trim().to_string(),
        home_goals,
        away_goals,
    };
    let result = with_service(BetBoard::open, |board| {
        let placed = board.place_bet(draft);
        (placed, board.slice().last_save().cloned())
    });
    match result {
        Ok((Ok(id), save)) => finish("bets_place", "Bet placed.", id.to_string(), save),
        Ok((Err(err), _)) => ActionResponse::failure(format!("bets_place failed: {err}")),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Removes a bet whose match is over.
pub fn bets_finalize(id: u64) -> ActionResponse {
    let result = with_service(BetBoard::open, |board| {
        let removed = board.finalize_bet(id).map(|bet| bet.id);
        (removed, board.slice().last_save().cloned())
    });
    match result {
        Ok((Some(id), save)) => finish("bets_finalize", "Bet finalized.", id.to_string(), save),
        Ok((None, _)) => ActionResponse::failure(format!("no bet with id `{id}`")),
        Err(err) => ActionResponse::failure(err),
    }
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("CASA_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn open_store() -> Result<SliceStore, String> {
    let kv = SqliteKvStore::open(resolve_store_db_path())
        .map_err(|err| format!("store open failed: {err}"))?;
    Ok(SliceStore::new(Arc::new(kv)))
}

fn lock_slice_edits() -> std::sync::MutexGuard<'static, ()> {
    SLICE_EDIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Services whose edits rewrite one stored slice.
trait SliceBacked {
    fn load_failure(&self) -> Option<&str>;
}

impl SliceBacked for TaskBoard {
    fn load_failure(&self) -> Option<&str> {
        self.slice().load_failure()
    }
}

impl SliceBacked for BetBoard {
    fn load_failure(&self) -> Option<&str> {
        self.slice().load_failure()
    }
}

impl SliceBacked for CalendarBook {
    fn load_failure(&self) -> Option<&str> {
        self.slice().load_failure()
    }
}

/// Opens a service over the on-disk store and runs one use case under the
/// edit lock.
fn with_service<S: SliceBacked, R>(
    open: impl FnOnce(Persistence) -> S,
    action: impl FnOnce(&mut S) -> R,
) -> Result<R, String> {
    let _guard = lock_slice_edits();
    let store = open_store()?;
    let mut service = open(Persistence::Direct(store));
    ensure_loaded(&service)?;
    Ok(action(&mut service))
}

/// A slice that could not be read must not be edited: the first write would
/// replace every stored record with the in-memory default plus one change.
fn ensure_loaded(service: &impl SliceBacked) -> Result<(), String> {
    match service.load_failure() {
        Some(reason) => {
            warn!("event=ffi_call module=ffi status=error error_code=slice_not_loaded");
            Err(format!("stored data could not be read: {reason}"))
        }
        None => Ok(()),
    }
}

/// The in-memory edit already happened; a failed write is still reported.
fn finish(
    operation: &str,
    message: &str,
    id: String,
    save: Option<SaveOutcome>,
) -> ActionResponse {
    match save {
        Some(SaveOutcome::Saved) | None => ActionResponse::success(message, Some(id)),
        Some(failure) => {
            warn!("event=ffi_call module=ffi status=error operation={operation} error_code=not_persisted");
            let mut response = ActionResponse::failure(save_failure_message(operation, &failure));
            response.id = Some(id);
            response
        }
    }
}

fn save_failure_message(operation: &str, outcome: &SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Saved => format!("{operation} succeeded"),
        SaveOutcome::EncodeFailed(reason) => format!("{operation} failed: invalid JSON: {reason}"),
        SaveOutcome::StoreFailed(reason) => format!("{operation} failed: {reason}"),
    }
}

fn non_empty_or(value: String, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn to_event_item(event: &CalendarEvent) -> CalendarEventItem {
    CalendarEventItem {
        id: event.id.clone(),
        date: event.date.clone(),
        title: event.title.clone(),
        description: event.description.clone(),
        time: event.time.clone(),
    }
}
