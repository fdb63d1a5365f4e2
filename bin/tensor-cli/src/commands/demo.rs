// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-rt demo` command: a tour of the tensor operations.

use tensor_core::Tensor;

pub fn execute() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              tensor-rt · Tensor Tour                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Reshape ────────────────────────────────────────────────
    let mut t = Tensor::<i64, 2>::from_vec([2, 3], (1..=6).collect())?;
    println!("  a = {}", t.dims());
    println!("{t}");
    t.reshape([3, 2])?;
    println!("  a.reshape({})", t.dims());
    println!("{t}");
    if let Err(e) = t.reshape([4, 2]) {
        println!("  a.reshape([4, 2]) -> {e}");
    }
    println!();

    // ── Broadcasting ───────────────────────────────────────────
    let a = Tensor::<f32, 2>::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
    let scale = Tensor::<f32, 2>::from_vec([2, 1], vec![10.0, -1.0])?;
    println!("  {} * {}", a.dims(), scale.dims());
    println!("{}", (&a * &scale)?);

    let bias = Tensor::<f32, 1>::from_vec([3], vec![0.5, 0.25, 0.125])?;
    let shifted: Tensor<f32, 2> = a.broadcast_with(&bias, |x, y| x + y)?;
    println!("  {} + {}", a.dims(), bias.dims());
    println!("{shifted}");
    if let Err(e) = &a + &Tensor::<f32, 2>::zeros([3, 3]) {
        println!("  {} + [3, 3] -> {e}", a.dims());
    }
    println!();

    // ── Transpose & matmul ─────────────────────────────────────
    let at = a.transpose()?;
    println!("  transpose {} -> {}", a.dims(), at.dims());
    println!("{at}");
    let product = a.matmul(&at)?;
    println!("  {} @ {} -> {}", a.dims(), at.dims(), product.dims());
    println!("{product}");

    let batch = Tensor::<f32, 3>::from_vec([2, 2, 2], vec![1.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 2.0])?;
    let rhs = Tensor::<f32, 3>::from_vec([2, 2, 3], (1..=12).map(|v| v as f32).collect())?;
    println!("  batched {} @ {}", batch.dims(), rhs.dims());
    println!("{}", batch.matmul(&rhs)?);

    Ok(())
}
