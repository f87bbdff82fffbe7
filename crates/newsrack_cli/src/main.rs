//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `newsrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // A tiny probe validates core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("newsrack_core ping={}", newsrack_core::ping());
    println!("newsrack_core version={}", newsrack_core::core_version());
}
