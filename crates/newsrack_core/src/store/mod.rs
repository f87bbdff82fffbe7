//! Article store: single source of truth for cached articles.
//!
//! # Responsibility
//! - Own the cache connection and serialize every mutation through it.
//! - Publish one fresh full snapshot to observers per committed mutation.
//! - Hold the process-wide store singleton used by UI-facing layers.
//!
//! # Invariants
//! - All reads for snapshots happen under the connection lock, so an
//!   observer never sees a torn or out-of-order state.
//! - A mutation that fails publishes nothing; observers keep the prior
//!   generation.
//! - The global store is initialized at most once per process and shared
//!   by every reader and writer thereafter.

mod observe;

pub use observe::{Snapshot, SnapshotPublisher, Subscription};

use crate::db::{open_db, open_db_in_memory};
use crate::model::article::{ArticleId, ArticleRecord, NewArticle};
use crate::repo::article_repo::{
    ArticleRepository, SqliteArticleRepository, StorageError, StorageResult,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static GLOBAL_STORE: OnceCell<Arc<ArticleStore>> = OnceCell::new();

/// Durable article cache plus its reactive read channel.
pub struct ArticleStore {
    conn: Mutex<Connection>,
    publisher: Arc<SnapshotPublisher>,
    path: Option<PathBuf>,
}

impl ArticleStore {
    /// Opens a file-backed store, applying migrations as needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = open_db(&path)?;
        Ok(Self::from_connection(conn, Some(path)))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::from_connection(conn, None))
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Self {
        Self {
            conn: Mutex::new(conn),
            publisher: Arc::new(SnapshotPublisher::new()),
            path,
        }
    }

    /// Subscribes to the store's content.
    ///
    /// The current full snapshot is queued immediately; afterwards every
    /// committed mutation delivers one fresh full snapshot until the
    /// subscription is cancelled or dropped.
    pub fn observe_all(&self) -> StorageResult<Subscription> {
        let conn = self.lock_conn();
        let snapshot = SqliteArticleRepository::new(&conn).list_all()?;
        Ok(Arc::clone(&self.publisher).subscribe(snapshot))
    }

    /// Persists every item, assigning fresh ids, then publishes.
    ///
    /// Atomic with respect to observers: either the whole batch becomes
    /// visible in one snapshot or the store is left unchanged.
    pub fn insert_all(&self, items: &[NewArticle]) -> StorageResult<Vec<ArticleId>> {
        let conn = self.lock_conn();
        let repo = SqliteArticleRepository::new(&conn);
        let ids = repo.insert_all(items).map_err(|err| {
            error!(
                "event=store_insert module=store status=error count={} error={}",
                items.len(),
                err
            );
            err
        })?;
        info!(
            "event=store_insert module=store status=ok count={}",
            items.len()
        );
        self.publish_current(&repo)?;
        Ok(ids)
    }

    /// Removes every record, then publishes the empty snapshot.
    pub fn delete_all(&self) -> StorageResult<()> {
        let conn = self.lock_conn();
        let repo = SqliteArticleRepository::new(&conn);
        repo.delete_all().map_err(|err| {
            error!("event=store_clear module=store status=error error={err}");
            err
        })?;
        info!("event=store_clear module=store status=ok");
        self.publish_current(&repo)?;
        Ok(())
    }

    /// Replaces the full store content with `items` as one generation.
    ///
    /// Delete and insert commit in a single transaction, so observers see
    /// either the prior generation or the new one, never the cleared
    /// state in between.
    pub fn replace_all(&self, items: &[NewArticle]) -> StorageResult<Vec<ArticleId>> {
        let conn = self.lock_conn();
        let repo = SqliteArticleRepository::new(&conn);
        let ids = repo.replace_all(items).map_err(|err| {
            error!(
                "event=store_replace module=store status=error count={} error={}",
                items.len(),
                err
            );
            err
        })?;
        info!(
            "event=store_replace module=store status=ok count={}",
            items.len()
        );
        self.publish_current(&repo)?;
        Ok(ids)
    }

    /// One-shot read of the current content in insertion order.
    pub fn list_all(&self) -> StorageResult<Vec<ArticleRecord>> {
        let conn = self.lock_conn();
        SqliteArticleRepository::new(&conn).list_all()
    }

    /// Number of live observers, primarily for diagnostics.
    pub fn observer_count(&self) -> usize {
        self.publisher.subscriber_count()
    }

    fn publish_current(&self, repo: &SqliteArticleRepository<'_>) -> StorageResult<()> {
        // Called with the connection lock held: snapshot reads and their
        // publishes stay serialized in commit order.
        let snapshot = repo.list_all()?;
        self.publisher.publish(&snapshot);
        Ok(())
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        // Poisoning only signals that another writer panicked; the
        // connection itself remains usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Initializes the process-wide store, or returns the existing one when
/// already initialized with the same path.
///
/// # Invariants
/// - Initialization runs at most once per process (lazy, thread-safe).
/// - Re-initialization with a different path is rejected.
pub fn init_global(path: impl AsRef<Path>) -> StorageResult<Arc<ArticleStore>> {
    let requested = path.as_ref().to_path_buf();
    let store = GLOBAL_STORE.get_or_try_init(|| ArticleStore::open(&requested).map(Arc::new))?;

    match &store.path {
        Some(active) if *active == requested => Ok(Arc::clone(store)),
        Some(active) => Err(StorageError::AlreadyOpen {
            active: active.clone(),
            requested,
        }),
        // The global store is always file-backed; in-memory stores never
        // register here.
        None => Err(StorageError::AlreadyOpen {
            active: PathBuf::from(":memory:"),
            requested,
        }),
    }
}

/// Returns the shared store, or `None` before [`init_global`] succeeded.
pub fn global() -> Option<Arc<ArticleStore>> {
    GLOBAL_STORE.get().cloned()
}
