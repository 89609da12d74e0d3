//! Block assignment helpers for owned dense matrices.
//!
//! LP assembly is written in terms of sub-blocks (`Aeq[:N, :M] = G`,
//! `Aeq[:N, 2M:2M+N] = -I`, ...). These helpers keep that code close to the
//! block notation while staying within `nalgebra`'s bounds-checked views.
//!
//! # Panics
//! Every helper panics if the target block does not fit inside `dst`. Callers
//! size the destination from the same dimensions they index with.

use nalgebra::{DMatrix, DVector};

/// Copy `src` into `dst` with its top-left corner at `(row, col)`.
pub fn set_block(dst: &mut DMatrix<f64>, row: usize, col: usize, src: &DMatrix<f64>) {
    dst.view_mut((row, col), (src.nrows(), src.ncols()))
        .copy_from(src);
}

/// Copy `scale * src` into `dst` with its top-left corner at `(row, col)`.
pub fn set_block_scaled(
    dst: &mut DMatrix<f64>,
    row: usize,
    col: usize,
    src: &DMatrix<f64>,
    scale: f64,
) {
    let mut block = dst.view_mut((row, col), (src.nrows(), src.ncols()));
    for j in 0..src.ncols() {
        for i in 0..src.nrows() {
            block[(i, j)] = scale * src[(i, j)];
        }
    }
}

/// Write `scale * I(n)` into `dst` with its top-left corner at `(row, col)`.
///
/// Off-diagonal entries of the block are zeroed.
pub fn set_identity_block(dst: &mut DMatrix<f64>, row: usize, col: usize, n: usize, scale: f64) {
    let mut block = dst.view_mut((row, col), (n, n));
    block.fill(0.0);
    block.fill_diagonal(scale);
}

/// Copy `src` into `dst[start..start + src.len()]`.
pub fn set_segment(dst: &mut DVector<f64>, start: usize, src: &DVector<f64>) {
    dst.rows_mut(start, src.len()).copy_from(src);
}

/// Fill `dst[start..start + len]` with `value`.
pub fn fill_segment(dst: &mut DVector<f64>, start: usize, len: usize, value: f64) {
    dst.rows_mut(start, len).fill(value);
}
