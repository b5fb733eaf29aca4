//! Configuration for the geometry kernels and batch execution.

pub mod batch;
pub mod geometry;

pub use batch::{BatchConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use geometry::{validate_positive, GeometryConfig};
