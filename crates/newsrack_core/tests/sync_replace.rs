use newsrack_core::fetch::{ArticleSource, Byline, FetchError, FetchResult, Headline, RemoteArticle};
use newsrack_core::{ArticleStore, SyncCoordinator, SyncError};
use std::sync::Arc;
use std::time::Duration;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const QUIET_TIMEOUT: Duration = Duration::from_millis(200);

fn remote(headline: &str, summary: &str, byline: &str) -> RemoteArticle {
    RemoteArticle {
        headline: Some(Headline {
            main: Some(headline.to_string()),
        }),
        abstract_text: Some(summary.to_string()),
        byline: Some(Byline {
            original: Some(byline.to_string()),
        }),
        multimedia: Vec::new(),
    }
}

/// Source that always yields the same fixed documents.
struct FixedSource(Vec<RemoteArticle>);

impl ArticleSource for FixedSource {
    fn fetch_articles(&self) -> FetchResult<Vec<RemoteArticle>> {
        Ok(self.0.clone())
    }
}

/// Source that always fails, simulating a network error.
struct FailingSource;

impl ArticleSource for FailingSource {
    fn fetch_articles(&self) -> FetchResult<Vec<RemoteArticle>> {
        Err(FetchError::Http {
            status: 503,
            body: None,
        })
    }
}

fn coordinator() -> (Arc<ArticleStore>, SyncCoordinator) {
    let store = Arc::new(ArticleStore::open_in_memory().unwrap());
    let coordinator = SyncCoordinator::new(Arc::clone(&store)).unwrap();
    (store, coordinator)
}

#[test]
fn sync_replaces_empty_with_non_empty() {
    let (store, coordinator) = coordinator();

    let outcome = coordinator
        .sync(vec![remote("A", "a1", "By B")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap();
    outcome.unwrap();

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headline.as_deref(), Some("A"));
    assert_eq!(records[0].summary.as_deref(), Some("a1"));
    assert_eq!(records[0].byline.as_deref(), Some("By B"));
    assert!(records[0].image_url.is_none());
}

#[test]
fn sync_replaces_non_empty_with_empty() {
    let (store, coordinator) = coordinator();

    coordinator
        .sync(vec![remote("old", "old", "old")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();
    coordinator
        .sync(Vec::new())
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();

    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn sync_replaces_non_empty_with_non_empty_and_keeps_nothing_old() {
    let (store, coordinator) = coordinator();

    coordinator
        .sync(vec![remote("old 1", "s", "b"), remote("old 2", "s", "b")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();
    coordinator
        .sync(vec![remote("new 1", "s", "b")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headline.as_deref(), Some("new 1"));
}

#[test]
fn refresh_success_installs_the_fetched_generation() {
    let (store, coordinator) = coordinator();

    coordinator
        .refresh(FixedSource(vec![
            remote("fetched 1", "s1", "b1"),
            remote("fetched 2", "s2", "b2"),
        ]))
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();

    let headlines: Vec<String> = store
        .list_all()
        .unwrap()
        .into_iter()
        .filter_map(|record| record.headline)
        .collect();
    assert_eq!(headlines, ["fetched 1", "fetched 2"]);
}

#[test]
fn failed_fetch_leaves_store_untouched_and_emits_nothing() {
    let (store, coordinator) = coordinator();

    coordinator
        .sync(vec![remote("cached", "s", "b")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();
    let before = store.list_all().unwrap();

    let subscription = store.observe_all().unwrap();
    // Drain the initial delivery so only refresh-driven emissions remain.
    subscription.recv_timeout(WAIT_TIMEOUT).unwrap();

    let outcome = coordinator
        .refresh(FailingSource)
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap();
    match outcome {
        Err(SyncError::Fetch(FetchError::Http { status, .. })) => assert_eq!(status, 503),
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(store.list_all().unwrap(), before);
    assert!(subscription.recv_timeout(QUIET_TIMEOUT).is_none());
}

#[test]
fn discarded_handle_does_not_affect_the_replacement() {
    let (store, coordinator) = coordinator();

    drop(coordinator.sync(vec![remote("quiet", "s", "b")]));

    // A follow-up cycle on the same worker proves the first completed.
    coordinator
        .sync(vec![remote("second", "s", "b")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headline.as_deref(), Some("second"));
}

#[test]
fn end_to_end_refresh_cycle_matches_observed_snapshots() {
    let (store, coordinator) = coordinator();

    let subscription = store.observe_all().unwrap();
    assert!(subscription.recv_timeout(WAIT_TIMEOUT).unwrap().is_empty());

    coordinator
        .sync(vec![remote("A", "a1", "B")])
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();
    let first_generation = subscription.recv_timeout(WAIT_TIMEOUT).unwrap();
    assert_eq!(first_generation.len(), 1);
    assert_eq!(first_generation[0].id, 1);
    assert_eq!(first_generation[0].headline.as_deref(), Some("A"));
    assert_eq!(first_generation[0].summary.as_deref(), Some("a1"));
    assert_eq!(first_generation[0].byline.as_deref(), Some("B"));
    assert!(first_generation[0].image_url.is_none());

    coordinator
        .sync(Vec::new())
        .wait_timeout(WAIT_TIMEOUT)
        .unwrap()
        .unwrap();
    let second_generation = subscription.recv_timeout(WAIT_TIMEOUT).unwrap();
    assert!(second_generation.is_empty());
}
