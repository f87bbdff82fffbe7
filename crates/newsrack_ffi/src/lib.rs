//! FFI crate exposing Newsrack core use-cases to the Flutter UI.

mod api;

pub use api::*;
