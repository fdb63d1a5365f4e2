// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::Shape;

/// Coarse classification of a [`TensorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An access addressed a position outside the tensor.
    OutOfRange,
    /// A shape-level contract was violated.
    InvalidArgument,
}

/// Errors that can occur during tensor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// A coordinate exceeded (or fell below) the bound of one axis.
    #[error("index {index} out of range for axis {axis} of size {bound}")]
    IndexOutOfRange { axis: usize, index: i64, bound: usize },

    /// A flat position exceeded the buffer length.
    #[error("position {position} out of range for buffer of {len} elements")]
    PositionOutOfRange { position: usize, len: usize },

    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// A reshape would change the total number of elements.
    #[error("cannot reshape {from} ({from_len} elements) into {to} ({to_len} elements)")]
    ReshapeSizeMismatch {
        from: Shape,
        from_len: usize,
        to: Shape,
        to_len: usize,
    },

    /// The operation does not support a tensor of this rank.
    #[error("{op} expects rank {expected}, got {actual}")]
    RankMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The supplied data does not fill the requested shape exactly.
    #[error("shape {shape} needs {expected} elements, got {actual}")]
    DataLengthMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },
}

impl TensorError {
    /// Returns whether this is a range error or an argument error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TensorError::IndexOutOfRange { .. } | TensorError::PositionOutOfRange { .. } => {
                ErrorKind::OutOfRange
            }
            TensorError::ShapeMismatch { .. }
            | TensorError::ReshapeSizeMismatch { .. }
            | TensorError::RankMismatch { .. }
            | TensorError::DataLengthMismatch { .. } => ErrorKind::InvalidArgument,
        }
    }
}
