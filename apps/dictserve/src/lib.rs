//! # dictserve Library
//!
//! This library exposes the dictserve modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;

// Re-export dictserve_core for convenience
pub use dictserve_core;
