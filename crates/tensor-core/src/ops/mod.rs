// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic operations.
//!
//! Every operation allocates and returns a new tensor; operands are only
//! read. Shape contracts are validated before any output is built.

mod broadcast_op;
mod elementwise_op;
mod matmul_op;
mod transpose_op;

pub use broadcast_op::broadcast;
pub use elementwise_op::zip_with;
pub use matmul_op::matmul;
pub use transpose_op::transpose;
