//! Cache refresh orchestration.
//!
//! # Responsibility
//! - Turn one successful remote fetch into one new stored generation.
//! - Keep fetch and store mutation off the interactive thread.
//!
//! # Invariants
//! - A failed fetch never touches the store; stale cached data wins over
//!   an empty cache.
//! - Replacement is indivisible from an observer's point of view.

pub mod coordinator;
