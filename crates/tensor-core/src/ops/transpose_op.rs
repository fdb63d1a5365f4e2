// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Transpose of the two innermost axes.

use crate::{CoordIter, Element, Tensor, TensorError};

/// Swaps the last two axes, materialising a new tensor.
///
/// A rank-2 input is an ordinary matrix transpose. For higher ranks the
/// leading `RANK - 2` axes are a batch: every batch coordinate is visited in
/// row-major order and its matrix is transposed on its own.
///
/// # Errors
/// Returns [`TensorError::RankMismatch`] for tensors of rank 0 or 1.
///
/// # Examples
/// ```
/// use tensor_core::{transpose, Tensor};
/// let m = Tensor::from_vec([3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let t = transpose(&m).unwrap();
/// assert_eq!(t.shape(), &[2, 3]);
/// assert_eq!(t.as_slice(), &[1, 3, 5, 2, 4, 6]);
/// ```
pub fn transpose<T: Element, const RANK: usize>(
    input: &Tensor<T, RANK>,
) -> Result<Tensor<T, RANK>, TensorError> {
    let Some(batch_rank) = RANK.checked_sub(2) else {
        return Err(TensorError::RankMismatch {
            op: "transpose",
            expected: 2,
            actual: RANK,
        });
    };

    let shape = input.shape();
    let rows = shape[batch_rank];
    let cols = shape[batch_rank + 1];

    let mut out_shape = *shape;
    out_shape.swap(batch_rank, batch_rank + 1);
    let mut output = Tensor::zeros(out_shape);

    // Batch strides are identical in input and output: only the last two
    // axes change and their product does not.
    let plane = rows * cols;
    let strides = input.strides();
    let src = input.as_slice();

    for batch in CoordIter::new(&shape[..batch_rank]) {
        let base: usize = batch.iter().zip(strides).map(|(&i, &s)| i * s).sum();
        let src_plane = &src[base..base + plane];
        let dst_plane = &mut output.as_mut_slice()[base..base + plane];
        for i in 0..rows {
            for j in 0..cols {
                dst_plane[j * rows + i] = src_plane[i * cols + j];
            }
        }
    }

    Ok(output)
}

impl<T: Element, const RANK: usize> Tensor<T, RANK> {
    /// Returns a new tensor with the last two axes swapped.
    ///
    /// See [`transpose`].
    pub fn transpose(&self) -> Result<Self, TensorError> {
        transpose(self)
    }
}
