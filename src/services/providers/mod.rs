//! Concrete Capability Providers
//!
//! Default implementations of the provider traits consumed by the editor:
//!
//! - `plan` - research plan from a chat model
//! - `research` - web search per plan section
//! - `writer` - article from the research artifact
//! - `image` - image search and concurrent download

pub mod image;
pub mod plan;
pub mod research;
pub mod writer;

pub use image::{DuckDuckGoImages, ImageAgent, ImageSource};
pub use plan::LlmPlanProvider;
pub use research::WebResearchProvider;
pub use writer::ArtifactDraftProvider;
