//! Batch execution of per-element kernels.
//!
//! Vector batches use the column layout of nalgebra: a `DMatrix` whose
//! columns are the individual points or tangent vectors. Matrix batches are
//! plain slices. Every batched operation is defined as the per-element
//! kernel applied independently, so these helpers only decide how the
//! elements are scheduled.

use crate::{
    config::BatchConfig,
    error::{ManifoldError, Result},
    types::{DMatrix, DVector, Scalar},
};
use rayon::prelude::*;

/// Applies `f` to every index in `0..count`, in order.
///
/// Runs on the rayon pool when `config` asks for it. The first error
/// encountered is returned and no partial output escapes.
pub fn map_indexed<R, F>(count: usize, config: &BatchConfig, f: F) -> Result<Vec<R>>
where
    R: Send,
    F: Fn(usize) -> Result<R> + Send + Sync,
{
    if config.should_parallelize(count) {
        (0..count).into_par_iter().map(&f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

/// Resolves the number of output columns when pairing two column batches.
///
/// Batches must have the same number of columns, except that a batch with
/// a single column is broadcast against the other.
pub fn broadcast_len(left: usize, right: usize) -> Result<usize> {
    match (left, right) {
        (l, r) if l == r => Ok(l),
        (1, r) => Ok(r),
        (l, 1) => Ok(l),
        (l, r) => Err(ManifoldError::dimension_mismatch(
            format!("{} columns (or a single column)", l),
            format!("{} columns", r),
        )),
    }
}

/// Returns column `index` of `batch`, repeating column 0 when the batch
/// holds a single broadcast column.
#[inline]
pub fn broadcast_column<T: Scalar>(batch: &DMatrix<T>, index: usize) -> DVector<T> {
    if batch.ncols() == 1 {
        batch.column(0).into_owned()
    } else {
        batch.column(index).into_owned()
    }
}

/// Stacks `columns` side by side into an `nrows × columns.len()` matrix.
pub fn stack_columns<T: Scalar>(nrows: usize, columns: &[DVector<T>]) -> DMatrix<T> {
    if columns.is_empty() {
        return DMatrix::zeros(nrows, 0);
    }
    DMatrix::from_columns(columns)
}
