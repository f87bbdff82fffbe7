//! Sync coordinator: remote result in, new cache generation out.
//!
//! # Responsibility
//! - Map remote documents to insertable records.
//! - Replace the full store content transactionally on the background
//!   worker.
//!
//! # Invariants
//! - Remote → record mapping is deterministic and field-by-field optional.
//! - `sync` replaces everything or nothing; no partial application.
//! - Failures are logged and surfaced through the task handle, never
//!   retried.

use crate::fetch::{ArticleSource, FetchError, RemoteArticle};
use crate::model::article::NewArticle;
use crate::repo::article_repo::StorageError;
use crate::store::ArticleStore;
use crate::worker::{TaskHandle, TaskQueue};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type SyncOutcome = Result<(), SyncError>;

/// Failure of one refresh cycle. Terminal for that cycle; the store keeps
/// whatever generation it held.
#[derive(Debug)]
pub enum SyncError {
    Fetch(FetchError),
    Storage(StorageError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<FetchError> for SyncError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<StorageError> for SyncError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Maps one remote document to its insertable record shape.
///
/// Identity mapping of present fields: `headline.main`, `abstract`,
/// `byline.original`, plus the derived media image URL.
pub fn map_remote_article(remote: &RemoteArticle) -> NewArticle {
    NewArticle {
        headline: remote
            .headline
            .as_ref()
            .and_then(|headline| headline.main.clone()),
        summary: remote.abstract_text.clone(),
        byline: remote
            .byline
            .as_ref()
            .and_then(|byline| byline.original.clone()),
        image_url: remote.media_image_url(),
    }
}

/// Coordinates refresh cycles against the shared store.
///
/// Owns the background worker; every mutation it schedules runs there,
/// strictly one cycle at a time.
pub struct SyncCoordinator {
    store: Arc<ArticleStore>,
    worker: TaskQueue,
}

impl SyncCoordinator {
    /// Creates a coordinator with its own background worker thread.
    pub fn new(store: Arc<ArticleStore>) -> std::io::Result<Self> {
        let worker = TaskQueue::spawn("newsrack-sync")?;
        Ok(Self { store, worker })
    }

    /// Replaces the store content with `items` as one new generation, on
    /// the background worker.
    ///
    /// The returned handle reports the outcome; dropping it discards the
    /// result without affecting the replacement itself.
    pub fn sync(&self, items: Vec<RemoteArticle>) -> TaskHandle<SyncOutcome> {
        let store = Arc::clone(&self.store);
        self.worker.submit(move || apply_generation(&store, &items))
    }

    /// Runs one full refresh cycle (fetch, then sync) on the background
    /// worker.
    ///
    /// When the fetch fails the store is left untouched and no snapshot
    /// is published; the failure is logged and reported via the handle.
    pub fn refresh<S>(&self, source: S) -> TaskHandle<SyncOutcome>
    where
        S: ArticleSource + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        self.worker.submit(move || {
            let items = source.fetch_articles().map_err(|err| {
                error!("event=refresh module=sync status=error stage=fetch error={err}");
                SyncError::Fetch(err)
            })?;
            apply_generation(&store, &items)
        })
    }
}

fn apply_generation(store: &ArticleStore, items: &[RemoteArticle]) -> SyncOutcome {
    let mapped: Vec<NewArticle> = items.iter().map(map_remote_article).collect();

    store.replace_all(&mapped).map_err(|err| {
        error!("event=sync module=sync status=error stage=replace error={err}");
        SyncError::Storage(err)
    })?;

    info!(
        "event=sync module=sync status=ok record_count={}",
        mapped.len()
    );
    Ok(())
}
