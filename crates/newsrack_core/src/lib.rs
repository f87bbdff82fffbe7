//! Core domain logic for Newsrack, a news reader that renders from a
//! local article cache instead of raw network responses.
//! This crate is the single source of truth for business invariants:
//! one generation of cached articles at a time, replaced atomically by
//! each successful sync, observed reactively by the UI layer.

pub mod db;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod sync;
pub mod worker;

pub use fetch::{
    ArticleSource, FetchError, FetchResult, HttpArticleSource, RemoteArticle, SearchConfig,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{ArticleId, ArticleRecord, DisplayArticle, NewArticle};
pub use repo::article_repo::{
    ArticleRepository, SqliteArticleRepository, StorageError, StorageResult,
};
pub use store::{ArticleStore, Snapshot, Subscription};
pub use sync::coordinator::{map_remote_article, SyncCoordinator, SyncError, SyncOutcome};
pub use worker::{TaskHandle, TaskQueue};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
