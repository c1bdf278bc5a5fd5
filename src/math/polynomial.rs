//! Sparse single-variable polynomials with integer coefficients.
//!
//! A [`Polynomial`] stores only its non-zero terms, ordered by strictly
//! decreasing exponent. The empty term list is the zero polynomial. Every
//! constructor and every arithmetic operation keeps this canonical form, so a
//! polynomial with a zero coefficient or an out-of-order exponent can never be
//! observed.
//!
//! Provided operations:
//! - Negation, addition and subtraction by sorted merge
//! - Multiplication by accumulating shifted partial products
//! - Long division with remainder (truncating or exact)
//! - A fixed-record binary fixture format and a division verifier
//!
//! # Examples
//!
//! ```
//! use polyarith::{Polynomial, Term};
//!
//! // 3x^2 + 2x - 1
//! let a = Polynomial::from_terms(vec![Term::new(3, 2), Term::new(2, 1), Term::new(-1, 0)]).unwrap();
//! // x + 1
//! let b = Polynomial::from_terms(vec![Term::new(1, 1), Term::new(1, 0)]).unwrap();
//!
//! let (q, r) = a.div_rem(&b).unwrap();
//! assert_eq!(q.to_string(), "3x - 1");
//! assert!(r.is_zero());
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::error::{Error, Result};

pub mod arithmetic;
pub mod division;
pub mod fixture;
pub mod verify;


pub use arithmetic::{
    add, multiply, negate, subtract, try_add, try_multiply, try_negate, try_subtract,
};
pub use division::{divide, divide_exact, divide_with, DivisionMode};

/// A single `coef * x^exp` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub coef: i64,
    pub exp: u32,
}

impl Term {
    pub fn new(coef: i64, exp: u32) -> Self {
        Term { coef, exp }
    }

    /// Product of two terms: coefficients multiply, exponents add.
    ///
    /// Returns `None` if either the coefficient or the exponent overflows.
    pub fn checked_times(&self, other: &Term) -> Option<Term> {
        Some(Term {
            coef: self.coef.checked_mul(other.coef)?,
            exp: self.exp.checked_add(other.exp)?,
        })
    }
}

/// Polynomial in canonical sparse form.
///
/// Terms are kept in strictly decreasing exponent order with no zero
/// coefficients. Cloning deep-copies the term list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    /// The zero polynomial (no terms).
    pub fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    /// The constant polynomial `c`. A zero `c` gives the zero polynomial.
    pub fn constant(c: i64) -> Self {
        Self::monomial(c, 0)
    }

    /// The monomial `coef * x^exp`. A zero `coef` gives the zero polynomial.
    pub fn monomial(coef: i64, exp: u32) -> Self {
        if coef == 0 {
            Self::zero()
        } else {
            Polynomial {
                terms: vec![Term::new(coef, exp)],
            }
        }
    }

    /// Builds a polynomial from terms that are already canonical.
    ///
    /// # Errors
    /// Returns `Error::NonCanonical` if any coefficient is zero or the
    /// exponents are not strictly decreasing.
    pub fn from_terms(terms: Vec<Term>) -> Result<Self> {
        if let Some(pos) = terms.iter().position(|t| t.coef == 0) {
            return Err(Error::non_canonical(format!(
                "term {} has a zero coefficient",
                pos
            )));
        }
        if let Some(pos) = terms.windows(2).position(|w| w[0].exp <= w[1].exp) {
            return Err(Error::non_canonical(format!(
                "exponent {} at term {} does not exceed exponent {} at term {}",
                terms[pos].exp,
                pos,
                terms[pos + 1].exp,
                pos + 1
            )));
        }
        Ok(Polynomial { terms })
    }

    /// Builds a polynomial from terms in any order, combining equal exponents
    /// and dropping terms that cancel.
    ///
    /// # Errors
    /// Returns `Error::Overflow` if combining equal exponents overflows `i64`.
    pub fn try_from_unordered<I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = Term>,
    {
        let mut sorted: Vec<Term> = terms.into_iter().collect();
        sorted.sort_by(|a, b| b.exp.cmp(&a.exp));

        let mut merged: Vec<Term> = Vec::with_capacity(sorted.len());
        for term in sorted {
            match merged.last_mut() {
                Some(last) if last.exp == term.exp => {
                    last.coef = last.coef.checked_add(term.coef).ok_or_else(|| {
                        Error::overflow(format!("combining terms of x^{}", term.exp))
                    })?;
                }
                _ => merged.push(term),
            }
        }
        merged.retain(|t| t.coef != 0);

        Ok(Polynomial { terms: merged })
    }

    /// Infallible form of [`Polynomial::try_from_unordered`].
    ///
    /// # Panics
    /// Panics if combining equal exponents overflows `i64`.
    pub fn from_unordered<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        Self::try_from_unordered(terms).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Wraps a term list produced by an operation that maintains canonical
    /// order itself.
    pub(crate) fn from_canonical(terms: Vec<Term>) -> Self {
        debug_assert!(terms.iter().all(|t| t.coef != 0));
        debug_assert!(terms.windows(2).all(|w| w[0].exp > w[1].exp));
        Polynomial { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Same as [`Polynomial::is_zero`]; pairs with [`Polynomial::len`].
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Highest exponent, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.terms.first().map(|t| t.exp)
    }

    pub fn leading_term(&self) -> Option<Term> {
        self.terms.first().copied()
    }

    /// Coefficient of `x^exp`, zero when the term is absent.
    pub fn coefficient(&self, exp: u32) -> i64 {
        self.terms
            .binary_search_by(|t| exp.cmp(&t.exp))
            .map(|i| self.terms[i].coef)
            .unwrap_or(0)
    }

    /// Evaluates the polynomial at `x`, returning `None` on `i64` overflow.
    pub fn evaluate(&self, x: i64) -> Option<i64> {
        self.terms.iter().try_fold(0i64, |acc, t| {
            let power = x.checked_pow(t.exp)?;
            acc.checked_add(t.coef.checked_mul(power)?)
        })
    }

    /// Checks the canonical-form invariant.
    pub fn is_canonical(&self) -> bool {
        self.terms.iter().all(|t| t.coef != 0)
            && self
                .terms
                .windows(2)
                .all(|w| w[0].exp.cmp(&w[1].exp) == Ordering::Greater)
    }
}

impl FromIterator<Term> for Polynomial {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Polynomial::from_unordered(iter)
    }
}

impl Display for Polynomial {
    /// Writes terms highest exponent first, e.g. `3x^2 + 2x - 1`.
    /// Coefficients are always printed, so `x` appears as `1x`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            let magnitude = term.coef.unsigned_abs();
            match (i, term.coef < 0) {
                (0, true) => write!(f, "-{}", magnitude)?,
                (0, false) => write!(f, "{}", magnitude)?,
                (_, true) => write!(f, " - {}", magnitude)?,
                (_, false) => write!(f, " + {}", magnitude)?,
            }

            match term.exp {
                0 => {}
                1 => write!(f, "x")?,
                e => write!(f, "x^{}", e)?,
            }
        }

        Ok(())
    }
}

impl num_traits::Zero for Polynomial {
    fn zero() -> Self {
        Polynomial::zero()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl num_traits::One for Polynomial {
    fn one() -> Self {
        Polynomial::constant(1)
    }
}
