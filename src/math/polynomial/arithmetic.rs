//! Negation, addition, subtraction and multiplication.
//!
//! Addition is a two-pointer merge of the descending term lists, so every
//! result is canonical without a normalisation pass. Multiplication adds one
//! shifted copy of the left operand per right-hand term into an accumulator.
//!
//! Coefficient arithmetic is checked. The `try_*` functions report overflow
//! as `Error::Overflow`; the plain functions and the operators panic on it in
//! every build profile.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{CheckedAdd, CheckedMul, CheckedNeg, CheckedSub};

use super::{Polynomial, Term};
use crate::error::{Error, Result};

/// Returns `-p`, or `Error::Overflow` if a coefficient is `i64::MIN`.
pub fn try_negate(p: &Polynomial) -> Result<Polynomial> {
    let terms = p
        .terms()
        .iter()
        .map(|t| {
            t.coef
                .checked_neg()
                .map(|coef| Term::new(coef, t.exp))
                .ok_or_else(|| Error::overflow(format!("negating {}x^{}", t.coef, t.exp)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Polynomial::from_canonical(terms))
}

/// Merges two descending term lists, combining equal exponents with
/// `combine` and passing right-only terms through `right`.
fn merge(
    a: &Polynomial,
    b: &Polynomial,
    combine: fn(i64, i64) -> Option<i64>,
    right: fn(i64) -> Option<i64>,
) -> Result<Polynomial> {
    let (lhs, rhs) = (a.terms(), b.terms());
    let mut out = Vec::with_capacity(lhs.len() + rhs.len());
    let (mut i, mut j) = (0, 0);

    let overflow = |l: i64, r: i64, exp: u32| {
        Error::overflow(format!("combining {} and {} at x^{}", l, r, exp))
    };
    let map_right = |t: Term| {
        right(t.coef)
            .map(|coef| Term::new(coef, t.exp))
            .ok_or_else(|| overflow(0, t.coef, t.exp))
    };

    while i < lhs.len() && j < rhs.len() {
        match lhs[i].exp.cmp(&rhs[j].exp) {
            Ordering::Greater => {
                out.push(lhs[i]);
                i += 1;
            }
            Ordering::Less => {
                out.push(map_right(rhs[j])?);
                j += 1;
            }
            Ordering::Equal => {
                let (l, r) = (lhs[i], rhs[j]);
                let coef = combine(l.coef, r.coef).ok_or_else(|| overflow(l.coef, r.coef, l.exp))?;
                if coef != 0 {
                    out.push(Term::new(coef, l.exp));
                }
                i += 1;
                j += 1;
            }
        }
    }

    // At most one side has terms left.
    out.extend_from_slice(&lhs[i..]);
    for &t in &rhs[j..] {
        out.push(map_right(t)?);
    }

    Ok(Polynomial::from_canonical(out))
}

/// Returns `a + b`, or `Error::Overflow` if a coefficient sum overflows.
///
/// # Complexity
/// * Time: O(n + m)
/// * Space: O(n + m)
pub fn try_add(a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
    merge(a, b, i64::checked_add, Some)
}

/// Returns `a - b`, or `Error::Overflow` if a coefficient difference overflows.
pub fn try_subtract(a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
    merge(a, b, i64::checked_sub, i64::checked_neg)
}

/// Returns `a * b`, or `Error::Overflow` if a coefficient or exponent overflows.
///
/// # Complexity
/// * Time: O(m * (n * m)) for `n` and `m` terms, from repeated merging
/// * Space: O(n * m)
pub fn try_multiply(a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
    if a.is_zero() || b.is_zero() {
        return Ok(Polynomial::zero());
    }

    let mut product = Polynomial::zero();
    for factor in b.terms() {
        // Shifting every term by the same exponent keeps the order descending.
        let partial = a
            .terms()
            .iter()
            .map(|t| {
                t.checked_times(factor).ok_or_else(|| {
                    Error::overflow(format!(
                        "multiplying {}x^{} by {}x^{}",
                        t.coef, t.exp, factor.coef, factor.exp
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        product = try_add(&product, &Polynomial::from_canonical(partial))?;
    }

    Ok(product)
}

fn or_panic(result: Result<Polynomial>) -> Polynomial {
    result.unwrap_or_else(|e| panic!("{}", e))
}

/// Returns `-p`.
///
/// # Panics
/// Panics on coefficient overflow; see [`try_negate`].
pub fn negate(p: &Polynomial) -> Polynomial {
    or_panic(try_negate(p))
}

/// Returns `a + b`.
///
/// # Panics
/// Panics on coefficient overflow; see [`try_add`].
pub fn add(a: &Polynomial, b: &Polynomial) -> Polynomial {
    or_panic(try_add(a, b))
}

/// Returns `a - b`.
///
/// # Panics
/// Panics on coefficient overflow; see [`try_subtract`].
pub fn subtract(a: &Polynomial, b: &Polynomial) -> Polynomial {
    or_panic(try_subtract(a, b))
}

/// Returns `a * b`.
///
/// # Panics
/// Panics on coefficient or exponent overflow; see [`try_multiply`].
pub fn multiply(a: &Polynomial, b: &Polynomial) -> Polynomial {
    or_panic(try_multiply(a, b))
}

impl CheckedNeg for Polynomial {
    fn checked_neg(&self) -> Option<Self> {
        try_negate(self).ok()
    }
}

impl CheckedAdd for Polynomial {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        try_add(self, v).ok()
    }
}

impl CheckedSub for Polynomial {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        try_subtract(self, v).ok()
    }
}

impl CheckedMul for Polynomial {
    fn checked_mul(&self, v: &Self) -> Option<Self> {
        try_multiply(self, v).ok()
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        negate(&self)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        negate(self)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $func:ident) => {
        impl $trait<&Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Polynomial {
                $func(self, rhs)
            }
        }

        impl $trait<Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                $func(&self, &rhs)
            }
        }

        impl $trait<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Polynomial {
                $func(&self, rhs)
            }
        }

        impl $trait<Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                $func(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add);
forward_binop!(Sub, sub, subtract);
forward_binop!(Mul, mul, multiply);
