//! Services
//!
//! The editing loop and the services it is assembled from.

pub mod cache;
pub mod editor;
pub mod progress;
pub mod providers;
pub mod search;

pub use cache::TtlCache;
pub use editor::{Editor, EditorConfig, EditorEvent, EditorProviders};
pub use progress::{ProgressEntry, ProgressStatus, ProgressTracker};
pub use search::{SearchProvider, SearchResult, WebSearchService};
