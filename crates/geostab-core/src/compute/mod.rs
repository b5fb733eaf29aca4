//! Computational backends and batch utilities.

pub mod backend;
pub mod cpu;

pub use backend::{LinalgBackend, NalgebraBackend};
pub use cpu::*;
