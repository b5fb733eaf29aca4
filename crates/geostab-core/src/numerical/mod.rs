//! Numerical utilities: series evaluation and matrix functions.

pub mod matrix_functions;
pub mod stability;

pub use matrix_functions::{logm, sqrtm};
pub use stability::*;
