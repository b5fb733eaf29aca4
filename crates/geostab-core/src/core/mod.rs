//! Core traits and types for manifold geometry.

pub mod error;
pub mod manifold;
pub mod matrix_group;
pub mod types;

// Re-export core types
pub use error::*;
pub use manifold::*;
pub use matrix_group::*;
pub use types::*;
