//! Storage Layer
//!
//! Handles all data persistence: JSON config and run artifacts on disk.

pub mod artifacts;
pub mod config;

pub use artifacts::*;
pub use config::*;
