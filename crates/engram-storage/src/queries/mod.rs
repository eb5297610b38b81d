//! SQL query modules, one per concern. All take `&Connection` so the engine
//! can route them to the writer or the read pool.

pub mod aggregation;
pub mod artifact_crud;
pub mod artifact_query;
pub mod event_ops;
pub mod index_ops;
pub mod sweep_ops;
