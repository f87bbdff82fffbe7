//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep the UI rendering from the cached store, never from raw network
//!   responses.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Store mutations run on the core's background worker, never on the
//!   UI thread.

use newsrack_core::store::{global as global_store, init_global};
use newsrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    HttpArticleSource, SearchConfig, SyncCoordinator,
};
use std::sync::OnceLock;
use std::time::Duration;

const REFRESH_WAIT: Duration = Duration::from_secs(60);

static COORDINATOR: OnceLock<SyncCoordinator> = OnceLock::new();

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
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for UI command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Article projection returned to the UI list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiArticle {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub byline: Option<String>,
    pub image_url: Option<String>,
}

/// Article list response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListResponse {
    pub ok: bool,
    pub message: String,
    pub articles: Vec<FfiArticle>,
}

/// Opens the process-wide article store at `db_path`.
///
/// # FFI contract
/// - Sync call; performs file-system and migration work on first use.
/// - Idempotent for the same path; a different path is rejected.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String) -> ActionResponse {
    let store = match init_global(&db_path) {
        Ok(store) => store,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };

    if COORDINATOR.get().is_some() {
        return ActionResponse::success("store already initialized");
    }
    match SyncCoordinator::new(store) {
        Ok(coordinator) => {
            // A concurrent initializer may have won the race; that
            // coordinator targets the same global store, so either wins.
            let _ = COORDINATOR.set(coordinator);
            ActionResponse::success("store initialized")
        }
        Err(err) => ActionResponse::failure(format!("failed to start sync worker: {err}")),
    }
}

/// Runs one refresh cycle: fetch from the search API, then atomically
/// replace the cached generation.
///
/// # FFI contract
/// - Not marked sync: FRB dispatches it off the UI thread.
/// - On fetch failure the cache is left untouched; the UI keeps showing
///   the previous generation.
/// - Never panics.
pub fn refresh_articles(api_key: String) -> ActionResponse {
    let Some(coordinator) = COORDINATOR.get() else {
        return ActionResponse::failure("store not initialized; call init_store first");
    };

    let source = match HttpArticleSource::new(SearchConfig::new(api_key)) {
        Ok(source) => source,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };

    match coordinator.refresh(source).wait_timeout(REFRESH_WAIT) {
        Some(Ok(())) => ActionResponse::success("refresh complete"),
        Some(Err(err)) => ActionResponse::failure(err.to_string()),
        None => ActionResponse::failure("refresh timed out"),
    }
}

/// Lists the current cached generation for display.
///
/// # FFI contract
/// - Sync call; one read against the local store.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_articles() -> ArticleListResponse {
    let Some(store) = global_store() else {
        return ArticleListResponse {
            ok: false,
            message: "store not initialized; call init_store first".to_string(),
            articles: Vec::new(),
        };
    };

    match store.list_all() {
        Ok(records) => ArticleListResponse {
            ok: true,
            message: format!("{} cached articles", records.len()),
            articles: records
                .into_iter()
                .map(|record| {
                    let display = record.to_display();
                    FfiArticle {
                        headline: display.headline,
                        summary: display.summary,
                        byline: display.byline,
                        image_url: display.image_url,
                    }
                })
                .collect(),
        },
        Err(err) => ArticleListResponse {
            ok: false,
            message: err.to_string(),
            articles: Vec::new(),
        },
    }
}
