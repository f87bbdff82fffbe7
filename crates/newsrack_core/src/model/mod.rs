//! Domain model for cached news articles.
//!
//! # Responsibility
//! - Define the canonical persisted record and its id-less insert shape.
//! - Keep one storage shape shared by every reader in the process.
//!
//! # Invariants
//! - Record ids are store-assigned and never supplied by callers.
//! - Every field besides `id` is optional; a fully-empty record is valid.

pub mod article;
