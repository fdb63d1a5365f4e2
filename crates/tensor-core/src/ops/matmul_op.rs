// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication operation.

use crate::{CoordIter, Element, Tensor, TensorError};

/// Performs matrix multiplication: `output = lhs @ rhs`.
///
/// For rank 2, `lhs` is `[M, K]`, `rhs` is `[K, N]` and the result is
/// `[M, N]`. For higher ranks the leading `RANK - 2` axes are batch axes that
/// must match exactly; each batch slice is multiplied independently and the
/// result is `[..batch, M, N]`.
///
/// # Errors
/// Returns [`TensorError::RankMismatch`] for tensors of rank 0 or 1.
/// Returns [`TensorError::ShapeMismatch`] if the batch axes differ or the
/// inner dimensions are incompatible.
///
/// # Examples
/// ```
/// use tensor_core::{matmul, Tensor};
/// let a = Tensor::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let b = Tensor::from_vec([3, 2], vec![7, 8, 9, 10, 11, 12]).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[58, 64, 139, 154]);
/// ```
pub fn matmul<T: Element, const RANK: usize>(
    lhs: &Tensor<T, RANK>,
    rhs: &Tensor<T, RANK>,
) -> Result<Tensor<T, RANK>, TensorError> {
    let Some(batch_rank) = RANK.checked_sub(2) else {
        return Err(TensorError::RankMismatch {
            op: "matmul",
            expected: 2,
            actual: RANK,
        });
    };

    let lhs_dims = lhs.shape();
    let rhs_dims = rhs.shape();

    if lhs_dims[..batch_rank] != rhs_dims[..batch_rank] {
        return Err(TensorError::ShapeMismatch {
            op: "matmul (batch)",
            lhs: lhs.dims(),
            rhs: rhs.dims(),
        });
    }

    let m = lhs_dims[batch_rank];
    let k = lhs_dims[batch_rank + 1];
    let n = rhs_dims[batch_rank + 1];
    if rhs_dims[batch_rank] != k {
        return Err(TensorError::ShapeMismatch {
            op: "matmul",
            lhs: lhs.dims(),
            rhs: rhs.dims(),
        });
    }

    tracing::debug!(lhs = %lhs.dims(), rhs = %rhs.dims(), "matmul");

    let mut out_shape = *lhs_dims;
    out_shape[batch_rank + 1] = n;
    let mut output = Tensor::zeros(out_shape);

    let a = lhs.as_slice();
    let b = rhs.as_slice();
    let (a_strides, b_strides) = (*lhs.strides(), *rhs.strides());
    let c_strides = *output.strides();

    for batch in CoordIter::new(&lhs_dims[..batch_rank]) {
        let a_base = base_offset(&batch, &a_strides);
        let b_base = base_offset(&batch, &b_strides);
        let c_base = base_offset(&batch, &c_strides);
        matmul_generic(
            &a[a_base..a_base + m * k],
            &b[b_base..b_base + k * n],
            &mut output.as_mut_slice()[c_base..c_base + m * n],
            m,
            k,
            n,
        );
    }

    Ok(output)
}

impl<T: Element, const RANK: usize> Tensor<T, RANK> {
    /// Matrix product of `self` and `rhs`. See [`matmul`].
    pub fn matmul(&self, rhs: &Self) -> Result<Self, TensorError> {
        matmul(self, rhs)
    }
}

fn base_offset(batch: &[usize], strides: &[usize]) -> usize {
    batch.iter().zip(strides).map(|(&i, &s)| i * s).sum()
}

/// Generic (portable) matrix multiplication into a zeroed `c`.
///
/// Uses a simple ikj loop order for better cache locality on the `b` matrix.
fn matmul_generic<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
    // ikj loop order: iterate over rows of A, then columns of A (= rows of B),
    // then columns of B. This makes the inner loop a saxpy on a row of C,
    // which is sequential in memory.
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij = *c_ij + a_ip * b_pj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_2x3_times_3x2() {
        // A = [[1, 2, 3], [4, 5, 6]]
        // B = [[7, 8], [9, 10], [11, 12]]
        // C = [[58, 64], [139, 154]]
        let a = Tensor::from_vec([2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Tensor::from_vec([3, 2], vec![7.0f32, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();

        let c = matmul(&a, &b).unwrap();

        assert_eq!(c.shape(), &[2, 2]);
        let result = c.as_slice();
        assert!((result[0] - 58.0).abs() < 1e-5);
        assert!((result[1] - 64.0).abs() < 1e-5);
        assert!((result[2] - 139.0).abs() < 1e-5);
        assert!((result[3] - 154.0).abs() < 1e-5);
    }

    #[test]
    fn test_matmul_identity() {
        // A * I = A
        let a = Tensor::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let eye = Tensor::from_vec([2, 2], vec![1, 0, 0, 1]).unwrap();
        assert_eq!(a.matmul(&eye).unwrap(), a);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = Tensor::<f32, 2>::zeros([2, 3]);
        let b = Tensor::<f32, 2>::zeros([4, 2]); // 4 != 3

        assert!(matches!(
            matmul(&a, &b),
            Err(TensorError::ShapeMismatch { op: "matmul", .. })
        ));
    }

    #[test]
    fn test_matmul_1x1() {
        let a = Tensor::from_vec([1, 1], vec![3.0f64]).unwrap();
        let b = Tensor::from_vec([1, 1], vec![4.0f64]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert!((c.as_slice()[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_matmul_column_vector() {
        // [2, 3] x [3, 1]
        let w = Tensor::from_vec([2, 3], vec![1, 0, 2, -1, 3, 1]).unwrap();
        let x = Tensor::from_vec([3, 1], vec![3, 2, 1]).unwrap();
        let y = w.matmul(&x).unwrap();
        assert_eq!(y.shape(), &[2, 1]);
        assert_eq!(y.as_slice(), &[5, 4]);
    }

    #[test]
    fn test_matmul_batched() {
        // Batch 0: identity times B0; batch 1: 2*identity times B1.
        let a = Tensor::from_vec([2, 2, 2], vec![1, 0, 0, 1, 2, 0, 0, 2]).unwrap();
        let b = Tensor::from_vec([2, 2, 3], (1..=12).collect()).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 2, 3]);
        assert_eq!(&c.as_slice()[..6], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&c.as_slice()[6..], &[14, 16, 18, 20, 22, 24]);
    }

    #[test]
    fn test_matmul_batched_matches_per_slice() {
        let a = Tensor::from_vec([3, 2, 4], (0..24).collect()).unwrap();
        let b = Tensor::from_vec([3, 4, 2], (0..24).rev().collect()).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape(), &[3, 2, 2]);

        for batch in 0..3 {
            let a2 = Tensor::from_vec([2, 4], a.as_slice()[batch * 8..(batch + 1) * 8].to_vec())
                .unwrap();
            let b2 = Tensor::from_vec([4, 2], b.as_slice()[batch * 8..(batch + 1) * 8].to_vec())
                .unwrap();
            let c2 = matmul(&a2, &b2).unwrap();
            assert_eq!(&c.as_slice()[batch * 4..(batch + 1) * 4], c2.as_slice());
        }
    }

    #[test]
    fn test_matmul_batch_mismatch() {
        let a = Tensor::<i32, 3>::zeros([2, 2, 3]);
        let b = Tensor::<i32, 3>::zeros([3, 3, 2]);
        assert!(matches!(
            matmul(&a, &b),
            Err(TensorError::ShapeMismatch {
                op: "matmul (batch)",
                ..
            })
        ));
    }

    #[test]
    fn test_matmul_rank1_rejected() {
        let a = Tensor::from_vec([3], vec![1, 2, 3]).unwrap();
        assert!(matches!(
            a.matmul(&a),
            Err(TensorError::RankMismatch { op: "matmul", .. })
        ));
    }
}
