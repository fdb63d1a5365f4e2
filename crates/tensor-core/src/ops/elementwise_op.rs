// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise arithmetic and the `std::ops` operator surface.
//!
//! Tensor–tensor operators return `Result` because the shapes may not
//! broadcast. Tensor–scalar operators cannot fail and return the tensor
//! directly.
//!
//! # Panics
//! Division follows the element type: dividing an integer tensor by zero,
//! either elementwise or by a scalar, panics just like `i32 / 0`. Float
//! division produces `inf` or `NaN`.

use super::broadcast;
use crate::{Element, Tensor, TensorError};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Applies `f` to two tensors of the same rank.
///
/// Identical shapes take a single pairwise pass over both buffers; any other
/// shapes go through [`broadcast`].
pub fn zip_with<T, const RANK: usize, F>(
    lhs: &Tensor<T, RANK>,
    rhs: &Tensor<T, RANK>,
    op: &'static str,
    f: F,
) -> Result<Tensor<T, RANK>, TensorError>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    if lhs.shape() != rhs.shape() {
        return broadcast(lhs, rhs, op, f);
    }
    let data = lhs
        .iter()
        .zip(rhs.iter())
        .map(|(&a, &b)| f(a, b))
        .collect();
    Ok(Tensor::with_data(*lhs.shape(), data))
}

impl<T: Element, const RANK: usize> Tensor<T, RANK> {
    /// Combines two tensors of the same rank elementwise, broadcasting size-1
    /// axes where the shapes differ.
    pub fn zip_with<F>(&self, rhs: &Self, f: F) -> Result<Self, TensorError>
    where
        F: Fn(T, T) -> T,
    {
        zip_with(self, rhs, "zip_with", f)
    }
}

// ── Tensor ∘ Tensor ────────────────────────────────────────────

macro_rules! impl_tensor_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<'a, 'b, T: Element, const RANK: usize> $trait<&'b Tensor<T, RANK>>
            for &'a Tensor<T, RANK>
        {
            type Output = Result<Tensor<T, RANK>, TensorError>;

            fn $method(self, rhs: &'b Tensor<T, RANK>) -> Self::Output {
                zip_with(self, rhs, stringify!($method), |a, b| a $op b)
            }
        }

        impl<'b, T: Element, const RANK: usize> $trait<&'b Tensor<T, RANK>> for Tensor<T, RANK> {
            type Output = Result<Tensor<T, RANK>, TensorError>;

            fn $method(self, rhs: &'b Tensor<T, RANK>) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<'a, T: Element, const RANK: usize> $trait<Tensor<T, RANK>> for &'a Tensor<T, RANK> {
            type Output = Result<Tensor<T, RANK>, TensorError>;

            fn $method(self, rhs: Tensor<T, RANK>) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<T: Element, const RANK: usize> $trait<Tensor<T, RANK>> for Tensor<T, RANK> {
            type Output = Result<Tensor<T, RANK>, TensorError>;

            fn $method(self, rhs: Tensor<T, RANK>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_tensor_op!(Add, add, +);
impl_tensor_op!(Sub, sub, -);
impl_tensor_op!(Mul, mul, *);
// Integer division by zero panics, as for the element type itself.
impl_tensor_op!(Div, div, /);

// ── Tensor ∘ scalar and scalar ∘ Tensor ────────────────────────

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $op:tt, $($ty:ty),*) => {
        $(
            impl<'a, const RANK: usize> $trait<$ty> for &'a Tensor<$ty, RANK> {
                type Output = Tensor<$ty, RANK>;

                fn $method(self, rhs: $ty) -> Tensor<$ty, RANK> {
                    self.map(|a| a $op rhs)
                }
            }

            impl<const RANK: usize> $trait<$ty> for Tensor<$ty, RANK> {
                type Output = Tensor<$ty, RANK>;

                fn $method(self, rhs: $ty) -> Tensor<$ty, RANK> {
                    (&self).$method(rhs)
                }
            }

            // The scalar stands for a same-shaped tensor filled with it.
            impl<'a, const RANK: usize> $trait<&'a Tensor<$ty, RANK>> for $ty {
                type Output = Tensor<$ty, RANK>;

                fn $method(self, rhs: &'a Tensor<$ty, RANK>) -> Tensor<$ty, RANK> {
                    rhs.map(|b| self $op b)
                }
            }

            impl<const RANK: usize> $trait<Tensor<$ty, RANK>> for $ty {
                type Output = Tensor<$ty, RANK>;

                fn $method(self, rhs: Tensor<$ty, RANK>) -> Tensor<$ty, RANK> {
                    self.$method(&rhs)
                }
            }
        )*
    };
}

impl_scalar_op!(Add, add, +, f32, f64, i32, i64);
impl_scalar_op!(Sub, sub, -, f32, f64, i32, i64);
impl_scalar_op!(Mul, mul, *, f32, f64, i32, i64);
// Integer division by zero panics, as for the element type itself.
impl_scalar_op!(Div, div, /, f32, f64, i32, i64);

// ── Unary negation ─────────────────────────────────────────────

impl<'a, T, const RANK: usize> Neg for &'a Tensor<T, RANK>
where
    T: Element + Neg<Output = T>,
{
    type Output = Tensor<T, RANK>;

    fn neg(self) -> Tensor<T, RANK> {
        self.map(|a| -a)
    }
}

impl<T, const RANK: usize> Neg for Tensor<T, RANK>
where
    T: Element + Neg<Output = T>,
{
    type Output = Tensor<T, RANK>;

    fn neg(self) -> Tensor<T, RANK> {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Tensor<i32, 2>, Tensor<i32, 2>) {
        let a = Tensor::from_vec([2, 3], vec![7, 17, 31, 0, 63, 102]).unwrap();
        let b = Tensor::from_vec([2, 3], vec![3, 5, -2, 5, 6, 42]).unwrap();
        (a, b)
    }

    #[test]
    fn test_addition() {
        let (a, b) = pair();
        let sum = (&a + &b).unwrap();
        assert_eq!(sum.as_slice(), &[10, 22, 29, 5, 69, 144]);
    }

    #[test]
    fn test_subtraction() {
        let (a, b) = pair();
        let diff = (a - b).unwrap();
        assert_eq!(diff.as_slice(), &[4, 12, 33, -5, 57, 60]);
    }

    #[test]
    fn test_multiplication_and_division() {
        let a = Tensor::from_vec([2], vec![6.0, 8.0]).unwrap();
        let b = Tensor::from_vec([2], vec![2.0, 4.0]).unwrap();
        assert_eq!((&a * &b).unwrap().as_slice(), &[12.0, 32.0]);
        assert_eq!((&a / &b).unwrap().as_slice(), &[3.0, 2.0]);
    }

    #[test]
    fn test_operator_broadcasts() {
        let a = Tensor::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = Tensor::from_vec([2, 1], vec![2, 3]).unwrap();
        let ab = (&a * &b).unwrap();
        let ba = (&b * &a).unwrap();
        assert_eq!(ab.as_slice(), &[2, 4, 6, 12, 15, 18]);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_operator_incompatible() {
        let a = Tensor::<f32, 2>::zeros([2, 3]);
        let b = Tensor::<f32, 2>::zeros([3, 2]);
        assert!(matches!(
            &a + &b,
            Err(TensorError::ShapeMismatch { op: "add", .. })
        ));
    }

    #[test]
    fn test_scalar_ops() {
        let t = Tensor::<i32, 2>::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!((&t * 3).as_slice(), &[3, 6, 9, 12, 15, 18]);
        assert_eq!((&t + 1).as_slice(), &[2, 3, 4, 5, 6, 7]);
        assert_eq!((&t - 1).as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!((t / 2).as_slice(), &[0, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_scalar_on_left() {
        let t = Tensor::from_vec([3], vec![1.0f32, 2.0, 4.0]).unwrap();
        assert_eq!((1.0 - &t).as_slice(), &[0.0, -1.0, -3.0]);
        assert_eq!((8.0 / &t).as_slice(), &[8.0, 4.0, 2.0]);
        assert_eq!((2.0 * t).as_slice(), &[2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_negation() {
        let t = Tensor::from_vec([2], vec![1i64, -2]).unwrap();
        assert_eq!((-&t).as_slice(), &[-1, 2]);
        assert_eq!(-(-t.clone()), t);
    }

    #[test]
    fn test_zip_with_method() {
        let a = Tensor::from_vec([2, 2], vec![1, 5, 3, 7]).unwrap();
        let b = Tensor::from_vec([2, 2], vec![4, 2, 6, 0]).unwrap();
        let max = a.zip_with(&b, |x, y| x.max(y)).unwrap();
        assert_eq!(max.as_slice(), &[4, 5, 6, 7]);
    }

    #[test]
    #[should_panic]
    fn test_integer_division_by_zero_tensor_panics() {
        let a = Tensor::<i32, 1>::from_vec([2], vec![4, 6]).unwrap();
        let b = Tensor::<i32, 1>::from_vec([2], vec![2, 0]).unwrap();
        let _ = &a / &b;
    }

    #[test]
    #[should_panic]
    fn test_integer_division_by_zero_scalar_panics() {
        let t = Tensor::<i64, 1>::from_vec([2], vec![4, 6]).unwrap();
        let _ = t / 0i64;
    }

    #[test]
    fn test_float_division_by_zero_is_infinite() {
        let a = Tensor::<f64, 1>::from_vec([2], vec![1.0, -1.0]).unwrap();
        let q = (&a / &Tensor::<f64, 1>::zeros([2])).unwrap();
        assert_eq!(q.as_slice(), &[f64::INFINITY, f64::NEG_INFINITY]);
    }
}
