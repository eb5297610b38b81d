//! Seam traits implemented across the workspace.

mod relevance;
mod store;

pub use relevance::IRelevanceScorer;
pub use store::IArtifactStore;
