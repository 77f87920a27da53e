//! Content Cascade Core
//!
//! Foundational error types and capability traits for the Content Cascade
//! workspace. This crate has zero dependencies on application-level code
//! (HTTP clients, filesystem layout, LLM providers, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `capability` - Provider, persistence and progress traits consumed by the editing loop
//!
//! ## Design Principles
//!
//! 1. **No external dependencies beyond serde_json/async-trait/thiserror** - keeps build times minimal
//! 2. **Trait-based abstractions** - enables mocking, testing, and swapping providers
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod capability;
pub mod error;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Capability Traits ──────────────────────────────────────────────────
pub use capability::{
    ArtifactStore, DraftProvider, ImageProvider, PlanProvider, ProgressRecorder, ResearchProvider,
};
