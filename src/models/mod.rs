//! Data Models
//!
//! Configuration and editing-loop data structures.

pub mod iteration;
pub mod settings;

pub use iteration::{EditorStage, IterationOutcome, IterationRecord, RunOutcome, RunStatus};
pub use settings::{AppConfig, SettingsUpdate};
