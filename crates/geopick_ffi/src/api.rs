//! FFI use-case API for the Flutter picker screen.
//!
//! # Responsibility
//! - Expose picker use-cases to Dart via FRB.
//! - Flatten core view state into plain strings the shell can render.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported in envelopes for diagnostics; the shell keeps
//!   rendering its previous state.

use geopick_core::{
    classify as classify_inner, core_version as core_version_inner,
    init_logging as init_logging_inner, ping as ping_inner, AppConfig, Coordinate,
    DirectoryClient, DirectoryResult, HttpDirectoryClient, KeyValueStore, LocationPanel,
    PickerService, PickerView, SelectOutcome, SqliteKeyValueStore, SELECT_PROMPT_TEXT,
};
use log::{error, info};
use once_cell::sync::OnceCell;

type AppService = PickerService<HttpDirectoryClient, SqliteKeyValueStore>;

static PICKER: OnceCell<AppService> = OnceCell::new();

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
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOptionItem {
    pub id: i64,
    pub name: String,
}

/// Location panel rendering data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationBox {
    /// Panel text; empty for on-axis coordinates.
    pub text: String,
    /// Background utility class, `None` when the panel is uncolored.
    pub color_class: Option<String>,
}

/// Full screen state for the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerViewResponse {
    /// Placeholder entry shown before the options.
    pub prompt: String,
    pub options: Vec<UserOptionItem>,
    /// `"{name} (id: {id})"` or `"User not selected"`.
    pub header: String,
    pub location: LocationBox,
    /// Diagnostics only; empty when the view was built normally.
    pub message: String,
}

/// Result of a directory refresh or a user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerActionResponse {
    pub ok: bool,
    /// `false` when a newer selection superseded this one.
    pub applied: bool,
    pub message: String,
    pub view: PickerViewResponse,
}

/// Classifies a coordinate pair given as decimal strings.
///
/// # FFI contract
/// - Sync call, pure.
/// - Non-numeric or on-axis input yields an empty uncolored box.
#[flutter_rust_bridge::frb(sync)]
pub fn classify_location(lat: String, lng: String) -> LocationBox {
    let quadrant = match (
        Coordinate::Text(lat).as_f64(),
        Coordinate::Text(lng).as_f64(),
    ) {
        (Some(lat), Some(lng)) => classify_inner(lat, lng),
        _ => None,
    };
    let panel = match quadrant {
        Some(quadrant) => LocationPanel::Classified(quadrant),
        None => LocationPanel::Unclassified,
    };
    to_location_box(panel)
}

/// Opens the selection store and builds the picker service.
///
/// # FFI contract
/// - Async call (FRB worker thread); opens SQLite on first use.
/// - Returns empty string on success and error message on failure.
/// - Idempotent; later calls reuse the service built by the first success.
pub fn picker_init() -> String {
    match picker() {
        Ok(_) => String::new(),
        Err(message) => message,
    }
}

/// Reloads the directory listing from upstream.
///
/// # FFI contract
/// - Async call (FRB worker thread); performs one network round trip.
/// - On failure the previous listing stays in the returned view.
pub fn directory_refresh() -> PickerActionResponse {
    match picker() {
        Ok(service) => refresh_response(service, service.refresh_directory()),
        Err(message) => failure_response(message),
    }
}

/// Fetches one user and makes it the persisted selection.
///
/// # FFI contract
/// - Async call (FRB worker thread); overlapping calls are fenced so only the
///   most recently issued one is applied.
/// - On failure the previous selection stays in the returned view.
pub fn select_user(id: i64) -> PickerActionResponse {
    match picker() {
        Ok(service) => select_response(service, service.select(id)),
        Err(message) => failure_response(message),
    }
}

/// Returns the current screen state without network access.
///
/// # FFI contract
/// - Async call (FRB worker thread); the first call may open SQLite.
/// - Init failures come back in `message` with the placeholder view.
pub fn current_view() -> PickerViewResponse {
    match picker() {
        Ok(service) => to_view_response(&service.view()),
        Err(message) => {
            let mut view = to_view_response(&PickerView::build(&[], None));
            view.message = message;
            view
        }
    }
}

fn picker() -> Result<&'static AppService, String> {
    PICKER.get_or_try_init(|| build_picker(&AppConfig::from_env()))
}

fn build_picker(config: &AppConfig) -> Result<AppService, String> {
    config.validate().map_err(|err| {
        error!("event=picker_init module=ffi status=error error={err}");
        format!("picker config invalid: {err}")
    })?;
    let storage = SqliteKeyValueStore::open(&config.db_path).map_err(|err| {
        error!("event=picker_init module=ffi status=error error={err}");
        format!("picker store open failed: {err}")
    })?;
    info!(
        "event=picker_init module=ffi status=ok db_path={}",
        config.db_path.display()
    );
    Ok(PickerService::new(
        HttpDirectoryClient::new(config.base_url.clone()),
        storage,
    ))
}

fn refresh_response<C: DirectoryClient, S: KeyValueStore>(
    service: &PickerService<C, S>,
    result: DirectoryResult<usize>,
) -> PickerActionResponse {
    let (ok, message) = match result {
        Ok(count) => (true, format!("Loaded {count} user(s).")),
        Err(err) => (false, format!("directory_refresh failed: {err}")),
    };
    PickerActionResponse {
        ok,
        applied: ok,
        message,
        view: to_view_response(&service.view()),
    }
}

fn select_response<C: DirectoryClient, S: KeyValueStore>(
    service: &PickerService<C, S>,
    result: DirectoryResult<SelectOutcome>,
) -> PickerActionResponse {
    let (ok, applied, message) = match result {
        Ok(SelectOutcome::Applied {
            record,
            persisted: true,
        }) => (true, true, format!("Selected user {}.", record.id)),
        Ok(SelectOutcome::Applied {
            record,
            persisted: false,
        }) => (
            true,
            true,
            format!("Selected user {}; it could not be saved.", record.id),
        ),
        Ok(SelectOutcome::Superseded { .. }) => (
            true,
            false,
            "Selection superseded by a newer request.".to_string(),
        ),
        Err(err) => (false, false, format!("select_user failed: {err}")),
    };

    PickerActionResponse {
        ok,
        applied,
        message,
        view: to_view_response(&service.view()),
    }
}

fn failure_response(message: String) -> PickerActionResponse {
    PickerActionResponse {
        ok: false,
        applied: false,
        view: to_view_response(&PickerView::build(&[], None)),
        message,
    }
}

fn to_view_response(view: &PickerView) -> PickerViewResponse {
    PickerViewResponse {
        prompt: SELECT_PROMPT_TEXT.to_string(),
        options: view
            .options
            .iter()
            .map(|option| UserOptionItem {
                id: option.id,
                name: option.name.clone(),
            })
            .collect(),
        header: view.header.clone(),
        location: to_location_box(view.location),
        message: String::new(),
    }
}

fn to_location_box(panel: LocationPanel) -> LocationBox {
    LocationBox {
        text: panel.text().to_string(),
        color_class: panel.css_class().map(str::to_string),
    }
}
