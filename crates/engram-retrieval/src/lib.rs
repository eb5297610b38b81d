//! Read path for the memory bank.
//!
//! A read is a pure pipeline: gather candidates (index intersection when
//! the query names component/kind/domain/category, state listing
//! otherwise), filter (state, compliance, minimum decayed trust), score
//! (decayed trust, relevance, recency, importance blend), then sort and
//! truncate. Reads never mutate anything.

pub mod engine;
pub mod relevance;

pub use engine::RetrievalEngine;
pub use relevance::LexicalScorer;
