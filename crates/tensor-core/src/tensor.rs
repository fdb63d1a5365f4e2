// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type.

use crate::shape::{checked_offset, num_elements, row_major_strides};
use crate::{Element, Shape, TensorError};
use std::fmt;

/// An owned, fixed-rank tensor stored in contiguous memory.
///
/// `RANK` is the number of axes and is part of the type. The shape is an
/// array of `RANK` sizes, axis 0 outermost, and the strides are always the
/// row-major derivation of the current shape.
///
/// # Memory Layout
/// Elements live in a single `Vec<T>` in row-major (C) order whose length is
/// always the product of the shape. Every operation that produces a tensor
/// allocates a fresh buffer; no two tensors ever share storage.
#[derive(Debug, Clone)]
pub struct Tensor<T, const RANK: usize> {
    shape: [usize; RANK],
    strides: [usize; RANK],
    data: Vec<T>,
}

impl<T: Element, const RANK: usize> Tensor<T, RANK> {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Tensor;
    /// let t = Tensor::<f32, 2>::zeros([2, 3]);
    /// assert_eq!(t.size(), 6);
    /// assert_eq!(t.strides(), &[3, 1]);
    /// ```
    pub fn zeros(shape: [usize; RANK]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Creates a new tensor with every element set to `value`.
    pub fn full(shape: [usize; RANK], value: T) -> Self {
        Self {
            strides: row_major_strides(&shape),
            data: vec![value; num_elements(&shape)],
            shape,
        }
    }

    /// Creates a zero-filled tensor from a runtime shape sequence.
    ///
    /// Returns [`TensorError::RankMismatch`] if `dims` does not have exactly
    /// `RANK` entries.
    pub fn from_dims(dims: &[usize]) -> Result<Self, TensorError> {
        Ok(Self::zeros(fixed_shape("from_dims", dims)?))
    }

    /// Creates a tensor from row-major data.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Tensor;
    /// let t = Tensor::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get([1, 0]).unwrap(), 3);
    /// ```
    pub fn from_vec(shape: [usize; RANK], data: Vec<T>) -> Result<Self, TensorError> {
        let expected = num_elements(&shape);
        if data.len() != expected {
            return Err(TensorError::DataLengthMismatch {
                shape: Shape::from(shape),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            strides: row_major_strides(&shape),
            shape,
            data,
        })
    }

    /// Creates a tensor from a runtime shape sequence and row-major data.
    pub fn from_dims_vec(dims: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        Self::from_vec(fixed_shape("from_dims_vec", dims)?, data)
    }

    /// Returns the per-axis sizes.
    pub fn shape(&self) -> &[usize; RANK] {
        &self.shape
    }

    /// Returns the row-major strides of the current shape.
    pub fn strides(&self) -> &[usize; RANK] {
        &self.strides
    }

    /// Returns the shape in rank-erased form.
    pub fn dims(&self) -> Shape {
        Shape::from(self.shape)
    }

    /// Returns the number of axes.
    pub const fn rank(&self) -> usize {
        RANK
    }

    /// Returns the number of elements in the buffer.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the flat buffer in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the flat buffer mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the tensor, returning its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterates mutably over the elements in row-major order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    // ── Multi-axis access ──────────────────────────────────────

    /// Computes the flat offset of a coordinate, validating every axis.
    pub fn offset(&self, index: &[usize; RANK]) -> Result<usize, TensorError> {
        checked_offset(&self.shape, &self.strides, index)
    }

    /// Reads the element at a coordinate.
    pub fn get(&self, index: [usize; RANK]) -> Result<T, TensorError> {
        let offset = self.offset(&index)?;
        Ok(self.data[offset])
    }

    /// Returns a mutable reference to the element at a coordinate.
    pub fn get_mut(&mut self, index: [usize; RANK]) -> Result<&mut T, TensorError> {
        let offset = self.offset(&index)?;
        Ok(&mut self.data[offset])
    }

    /// Writes the element at a coordinate.
    pub fn set(&mut self, index: [usize; RANK], value: T) -> Result<(), TensorError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Reads the element at a signed coordinate.
    ///
    /// Negative components are rejected with [`TensorError::IndexOutOfRange`]
    /// on the axis where they occur; they never wrap.
    pub fn get_signed(&self, index: [isize; RANK]) -> Result<T, TensorError> {
        self.get(self.unsigned_index(index)?)
    }

    /// Writes the element at a signed coordinate.
    pub fn set_signed(&mut self, index: [isize; RANK], value: T) -> Result<(), TensorError> {
        let index = self.unsigned_index(index)?;
        self.set(index, value)
    }

    fn unsigned_index(&self, index: [isize; RANK]) -> Result<[usize; RANK], TensorError> {
        let mut unsigned = [0usize; RANK];
        for (axis, (&i, slot)) in index.iter().zip(unsigned.iter_mut()).enumerate() {
            *slot = usize::try_from(i).map_err(|_| TensorError::IndexOutOfRange {
                axis,
                index: i as i64,
                bound: self.shape[axis],
            })?;
        }
        Ok(unsigned)
    }

    // ── Flat access ────────────────────────────────────────────

    /// Reads the element at a flat row-major position.
    pub fn at(&self, position: usize) -> Result<T, TensorError> {
        self.data
            .get(position)
            .copied()
            .ok_or(TensorError::PositionOutOfRange {
                position,
                len: self.data.len(),
            })
    }

    /// Returns a mutable reference to the element at a flat position.
    pub fn at_mut(&mut self, position: usize) -> Result<&mut T, TensorError> {
        let len = self.data.len();
        self.data
            .get_mut(position)
            .ok_or(TensorError::PositionOutOfRange { position, len })
    }

    /// Writes the element at a flat position.
    pub fn set_at(&mut self, position: usize, value: T) -> Result<(), TensorError> {
        *self.at_mut(position)? = value;
        Ok(())
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Replaces every element with the row-major contents of `values`.
    pub fn assign(&mut self, values: &[T]) -> Result<(), TensorError> {
        if values.len() != self.data.len() {
            return Err(TensorError::DataLengthMismatch {
                shape: self.dims(),
                expected: self.data.len(),
                actual: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    // ── Shape changes ──────────────────────────────────────────

    /// Relabels the buffer with a new shape of the same rank.
    ///
    /// The element at flat position `p` stays at flat position `p`. If the
    /// new shape does not hold exactly as many elements as the current one,
    /// returns [`TensorError::ReshapeSizeMismatch`] and leaves the tensor
    /// untouched.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Tensor;
    /// let mut t = Tensor::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// t.reshape([3, 2]).unwrap();
    /// assert_eq!(t.get([1, 0]).unwrap(), 3);
    /// assert!(t.reshape([2, 4]).is_err());
    /// ```
    pub fn reshape(&mut self, shape: [usize; RANK]) -> Result<(), TensorError> {
        let to_len = num_elements(&shape);
        if to_len != self.data.len() {
            return Err(TensorError::ReshapeSizeMismatch {
                from: self.dims(),
                from_len: self.data.len(),
                to: Shape::from(shape),
                to_len,
            });
        }
        self.shape = shape;
        self.strides = row_major_strides(&shape);
        Ok(())
    }

    /// Applies `f` to every element, producing a new tensor of the same shape.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self {
            shape: self.shape,
            strides: self.strides,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Builds a tensor of this shape from already computed row-major data.
    pub(crate) fn with_data(shape: [usize; RANK], data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), num_elements(&shape));
        Self {
            strides: row_major_strides(&shape),
            shape,
            data,
        }
    }
}

impl<T: Element> Tensor<T, 0> {
    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Self::full([], value)
    }
}

/// Converts a runtime shape sequence into a fixed-rank shape array.
pub(crate) fn fixed_shape<const RANK: usize>(
    op: &'static str,
    dims: &[usize],
) -> Result<[usize; RANK], TensorError> {
    <[usize; RANK]>::try_from(dims).map_err(|_| TensorError::RankMismatch {
        op,
        expected: RANK,
        actual: dims.len(),
    })
}

impl<T: Element, const RANK: usize> Default for Tensor<T, RANK> {
    fn default() -> Self {
        Self::zeros([0; RANK])
    }
}

/// Shapes are compared first, then the element sequence.
impl<T: Element, const RANK: usize> PartialEq for Tensor<T, RANK> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

impl<'a, T: Element, const RANK: usize> IntoIterator for &'a Tensor<T, RANK> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Renders rank-1 rows nested `RANK - 1` levels deep, each level slicing the
/// outermost axis.
impl<T: Element, const RANK: usize> fmt::Display for Tensor<T, RANK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, &self.shape, &self.data)
    }
}

fn write_nested<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    dims: &[usize],
    data: &[T],
) -> fmt::Result {
    match dims {
        [] => match data.first() {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        },
        [_] => {
            for (i, value) in data.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
            Ok(())
        }
        [outer, inner @ ..] => {
            writeln!(f, "{{")?;
            let step = num_elements(inner);
            for i in 0..*outer {
                write_nested(f, inner, &data[i * step..(i + 1) * step])?;
                writeln!(f)?;
            }
            write!(f, "}}")
        }
    }
}
