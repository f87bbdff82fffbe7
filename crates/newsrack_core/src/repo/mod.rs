//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the article cache.
//! - Isolate SQLite query details from store/sync orchestration.
//!
//! # Invariants
//! - Bulk writes are transactional: they fully apply or fail as a whole.
//! - Repository APIs return semantic errors in addition to DB transport
//!   errors.

pub mod article_repo;
