//! The causal hierarchy of outcome and action nodes.
pub mod dag;

pub use dag::{GraphError, GraphId, OutcomeGraph};
