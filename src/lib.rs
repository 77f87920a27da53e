//! Content Cascade - Iterative Content Generation
//!
//! Takes a topic through plan -> research -> draft, checking each artifact
//! against a quality gate and folding feedback into the topic until a draft
//! is accepted or the iteration budget is spent.
//! It includes:
//! - The editor loop and its progress tracker
//! - Default plan, research, writer and image providers
//! - Storage layer (JSON config, run artifacts)
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::iteration::{EditorStage, RunOutcome, RunStatus};
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::editor::{Editor, EditorConfig, EditorEvent, EditorProviders};
pub use state::{AppState, Credentials};
pub use utils::error::{AppError, AppResult};
