//! CPU-based batch execution.

pub mod batch_ops;

pub use batch_ops::*;
