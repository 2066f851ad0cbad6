//! Shared types for hudsync
//!
//! Configuration and display formatting used by both the core engine and
//! the binaries built on top of it.

pub mod config;
pub mod formatting;

pub use config::{AlertOrdering, HudConfig};
