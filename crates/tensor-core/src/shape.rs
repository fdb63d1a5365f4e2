// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape descriptors, stride arithmetic, and odometer enumeration.
//!
//! [`crate::Tensor`] carries its shape as a fixed-size array; [`Shape`] is the
//! rank-erased form used wherever two tensors of possibly different rank meet
//! (broadcasting, error reporting, display).

use crate::TensorError;
use std::fmt;

/// Rank-erased dimensionality of a [`crate::Tensor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates a scalar shape (rank 0).
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    ///
    /// For a scalar shape (rank 0), returns 1.
    pub fn num_elements(&self) -> usize {
        num_elements(&self.dims)
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Computes row-major (C-order) strides for this shape.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![0usize; self.dims.len()];
        fill_row_major_strides(&self.dims, &mut strides);
        strides
    }

    /// Extends this shape to `rank` axes by inserting leading axes of size 1.
    ///
    /// Returns a [`TensorError::RankMismatch`] if the shape already has more
    /// than `rank` axes.
    ///
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::new(vec![3, 4]).promote(4).unwrap();
    /// assert_eq!(s.dims(), &[1, 1, 3, 4]);
    /// ```
    pub fn promote(&self, rank: usize) -> Result<Shape, TensorError> {
        if self.rank() > rank {
            return Err(TensorError::RankMismatch {
                op: "promote",
                expected: rank,
                actual: self.rank(),
            });
        }
        let mut dims = vec![1usize; rank - self.rank()];
        dims.extend_from_slice(&self.dims);
        Ok(Shape { dims })
    }

    /// Reconciles two shapes under the broadcasting rule.
    ///
    /// The lower-rank shape is leading-padded with ones, then each axis must
    /// either match or have size 1 on one side.
    pub fn broadcast(&self, other: &Shape, op: &'static str) -> Result<Shape, TensorError> {
        let rank = self.rank().max(other.rank());
        let lhs = self.promote(rank)?;
        let rhs = other.promote(rank)?;

        let mut dims = Vec::with_capacity(rank);
        for (&a, &b) in lhs.dims.iter().zip(&rhs.dims) {
            if a == b {
                dims.push(a);
            } else if a == 1 {
                dims.push(b);
            } else if b == 1 {
                dims.push(a);
            } else {
                return Err(TensorError::ShapeMismatch {
                    op,
                    lhs: self.clone(),
                    rhs: other.clone(),
                });
            }
        }
        Ok(Shape { dims })
    }

    /// Returns `true` if two shapes are broadcast-compatible.
    pub fn is_broadcast_compatible(&self, other: &Shape) -> bool {
        self.broadcast(other, "broadcast").is_ok()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Convenience: `Shape::from(vec![2, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

/// Convenience: `Shape::from(&[2, 3][..])`.
impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl<const RANK: usize> From<[usize; RANK]> for Shape {
    fn from(dims: [usize; RANK]) -> Self {
        Self::new(dims.to_vec())
    }
}

// ── Free helpers shared by the tensor and the ops ──────────────

/// Product of all dimensions; 1 for an empty slice.
pub(crate) fn num_elements(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Writes the row-major strides of `dims` into `strides`.
pub(crate) fn fill_row_major_strides(dims: &[usize], strides: &mut [usize]) {
    let mut step = 1usize;
    for (stride, &dim) in strides.iter_mut().zip(dims).rev() {
        *stride = step;
        step *= dim;
    }
}

/// Row-major strides for a fixed-rank shape.
pub(crate) fn row_major_strides<const RANK: usize>(dims: &[usize; RANK]) -> [usize; RANK] {
    let mut strides = [0usize; RANK];
    fill_row_major_strides(dims, &mut strides);
    strides
}

/// Maps a coordinate to its flat offset, checking every axis against its bound
/// before the offset is used.
pub(crate) fn checked_offset(
    dims: &[usize],
    strides: &[usize],
    index: &[usize],
) -> Result<usize, TensorError> {
    let mut offset = 0usize;
    for (axis, ((&i, &bound), &stride)) in index.iter().zip(dims).zip(strides).enumerate() {
        if i >= bound {
            return Err(TensorError::IndexOutOfRange {
                axis,
                index: i as i64,
                bound,
            });
        }
        offset += i * stride;
    }
    Ok(offset)
}

/// Advances `coord` to the next row-major coordinate within `dims`.
///
/// The last axis moves fastest and overflow carries into the next slower
/// axis. Returns `false` once the outermost axis overflows, leaving `coord`
/// reset to all zeros.
pub fn advance_coord(coord: &mut [usize], dims: &[usize]) -> bool {
    for axis in (0..coord.len()).rev() {
        coord[axis] += 1;
        if coord[axis] < dims[axis] {
            return true;
        }
        coord[axis] = 0;
    }
    false
}

/// Odometer enumeration of every coordinate of a shape, in row-major order.
///
/// A rank-0 shape yields exactly one (empty) coordinate; a shape with any
/// zero-sized axis yields nothing.
///
/// ```
/// use tensor_core::CoordIter;
/// let coords: Vec<_> = CoordIter::new(&[2, 2]).collect();
/// assert_eq!(coords, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct CoordIter {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl CoordIter {
    /// Starts an enumeration over `dims`.
    pub fn new(dims: &[usize]) -> Self {
        let remaining = num_elements(dims);
        let next = (remaining > 0).then(|| vec![0usize; dims.len()]);
        Self {
            dims: dims.to_vec(),
            next,
            remaining,
        }
    }
}

impl Iterator for CoordIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if advance_coord(&mut successor, &self.dims) {
            self.next = Some(successor);
        }
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CoordIter {}
