//! Metric operations layered over manifolds.

pub mod metric;

// Re-export manifold operations
pub use metric::*;
