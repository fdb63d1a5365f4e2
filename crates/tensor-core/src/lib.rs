// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Fixed-rank, strided, dense tensors with shape-aware arithmetic.
//!
//! This crate provides:
//! - [`Tensor`] — an owned tensor whose rank is a const generic parameter.
//! - [`Shape`] — a rank-erased shape descriptor used for broadcasting and
//!   error reporting, plus [`CoordIter`] for row-major odometer enumeration.
//! - [`Element`] / [`DType`] — the supported element types.
//! - Operations: elementwise arithmetic with numpy-style broadcasting,
//!   transpose of the two innermost axes, and (batched) matrix product.
//!
//! # Design Goals
//! - Every access is bounds-checked before it touches the buffer.
//! - Operations materialise new tensors; nothing aliases.
//! - Clean error types via `thiserror`.
//!
//! # Example
//! ```
//! use tensor_core::Tensor;
//!
//! let a = Tensor::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
//! let b = Tensor::from_vec([2, 1], vec![10, 100]).unwrap();
//! let scaled = (&a * &b).unwrap();
//! assert_eq!(scaled.as_slice(), &[10, 20, 30, 400, 500, 600]);
//! ```

mod dtype;
mod error;
mod ops;
mod shape;
mod tensor;

pub use dtype::{DType, Element};
pub use error::{ErrorKind, TensorError};
pub use ops::{broadcast, matmul, transpose, zip_with};
pub use shape::{advance_coord, CoordIter, Shape};
pub use tensor::Tensor;
