// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Broadcasting binary operation.

use crate::shape::advance_coord;
use crate::tensor::fixed_shape;
use crate::{Element, Tensor, TensorError};

/// Combines two tensors of compatible but possibly unequal shapes.
///
/// The lower-rank operand is promoted by inserting leading axes of size 1,
/// then every axis must either match or be 1 on one side. The result is
/// filled by visiting each output coordinate once in row-major order; each
/// operand is read at the output coordinate taken modulo its own size on
/// every axis, so a size-1 axis always reads index 0.
///
/// `OUT` must equal `max(LHS, RHS)`.
///
/// # Errors
/// Returns [`TensorError::RankMismatch`] if `OUT` is not the larger of the
/// two input ranks.
/// Returns [`TensorError::ShapeMismatch`] if an axis differs and neither side
/// is 1.
///
/// # Examples
/// ```
/// use tensor_core::{broadcast, Tensor};
/// let a = Tensor::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let b = Tensor::from_vec([3], vec![10, 20, 30]).unwrap();
/// let c: Tensor<i32, 2> = broadcast(&a, &b, "add", |x, y| x + y).unwrap();
/// assert_eq!(c.as_slice(), &[11, 22, 33, 14, 25, 36]);
/// ```
pub fn broadcast<T, const LHS: usize, const RHS: usize, const OUT: usize, F>(
    lhs: &Tensor<T, LHS>,
    rhs: &Tensor<T, RHS>,
    op: &'static str,
    f: F,
) -> Result<Tensor<T, OUT>, TensorError>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let rank = LHS.max(RHS);
    if OUT != rank {
        return Err(TensorError::RankMismatch {
            op,
            expected: rank,
            actual: OUT,
        });
    }

    let out_shape = lhs.dims().broadcast(&rhs.dims(), op)?;
    let lhs_shape = lhs.dims().promote(rank)?;
    let rhs_shape = rhs.dims().promote(rank)?;
    let out_dims: [usize; OUT] = fixed_shape(op, out_shape.dims())?;

    tracing::debug!(
        op,
        lhs = %lhs.dims(),
        rhs = %rhs.dims(),
        out = %out_shape,
        "broadcast"
    );

    let a = lhs.as_slice();
    let b = rhs.as_slice();

    // Same layout after promotion: plain pairwise pass.
    if lhs_shape == rhs_shape {
        let data = a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect();
        return Ok(Tensor::with_data(out_dims, data));
    }

    let lhs_strides = lhs_shape.strides();
    let rhs_strides = rhs_shape.strides();
    let total = out_shape.num_elements();
    let mut data = Vec::with_capacity(total);

    if total > 0 {
        let mut coord = vec![0usize; rank];
        loop {
            let i = source_offset(&coord, lhs_shape.dims(), &lhs_strides);
            let j = source_offset(&coord, rhs_shape.dims(), &rhs_strides);
            data.push(f(a[i], b[j]));
            if !advance_coord(&mut coord, out_shape.dims()) {
                break;
            }
        }
    }

    Ok(Tensor::with_data(out_dims, data))
}

/// Flat offset of `coord` reduced modulo each axis of the operand.
fn source_offset(coord: &[usize], dims: &[usize], strides: &[usize]) -> usize {
    coord
        .iter()
        .zip(dims)
        .zip(strides)
        .map(|((&c, &d), &s)| (c % d) * s)
        .sum()
}

impl<T: Element, const RANK: usize> Tensor<T, RANK> {
    /// Broadcasts `self` against a tensor of any rank, producing a tensor of
    /// rank `OUT = max(RANK, OTHER)`.
    ///
    /// ```
    /// use tensor_core::Tensor;
    /// let row = Tensor::from_vec([3], vec![1.0, 2.0, 3.0]).unwrap();
    /// let col = Tensor::from_vec([2, 1], vec![10.0, 20.0]).unwrap();
    /// let grid: Tensor<f64, 2> = row.broadcast_with(&col, |a, b| a * b).unwrap();
    /// assert_eq!(grid.shape(), &[2, 3]);
    /// ```
    pub fn broadcast_with<const OTHER: usize, const OUT: usize, F>(
        &self,
        rhs: &Tensor<T, OTHER>,
        f: F,
    ) -> Result<Tensor<T, OUT>, TensorError>
    where
        F: Fn(T, T) -> T,
    {
        broadcast(self, rhs, "broadcast", f)
    }
}
