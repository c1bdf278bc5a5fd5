//! Polynomial long division.
//!
//! Each step divides the remainder's leading term by the divisor's leading
//! term, records that quotient term, and subtracts `divisor * (q_coef x^q_exp)`
//! from the remainder. When the leading coefficients divide exactly, the
//! subtraction cancels the remainder's leading term, so its degree strictly
//! drops every step.
//!
//! Coefficients are integers, so the per-step coefficient ratio may not be
//! exact. [`DivisionMode::Truncate`] rounds it toward zero and stops as soon
//! as the truncated ratio is zero; [`DivisionMode::Exact`] reports
//! [`Error::InexactDivision`] instead. Coefficient overflow in any step is
//! reported as [`Error::Overflow`].

use log::debug;
use num_integer::Integer;

use super::arithmetic::{try_multiply, try_subtract};
use super::{Polynomial, Term};
use crate::error::{Error, Result};

/// How non-exact leading coefficient ratios are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionMode {
    /// Round the ratio toward zero. Once the rounded ratio is zero the
    /// division ends and the remainder may keep a degree at or above the
    /// divisor's.
    #[default]
    Truncate,
    /// Fail with `Error::InexactDivision` when a ratio is not exact.
    Exact,
}

/// Divides `dividend` by `divisor`, truncating non-exact coefficient ratios.
///
/// # Arguments
/// * `dividend` - Zero, or of degree at least that of `divisor`
/// * `divisor` - Non-zero polynomial
///
/// # Returns
/// * `Ok((quotient, remainder))` with `divisor * quotient + remainder == dividend`
/// * `Err(Error::DivisionByZero)` - If `divisor` is zero
/// * `Err(Error::InvalidInput)` - If `dividend` is non-zero with a lower degree than `divisor`
/// * `Err(Error::Overflow)` - If an intermediate coefficient overflows `i64`
///
/// # Examples
/// ```
/// use polyarith::{divide, Polynomial, Term};
///
/// // x^2 - 1 = (x - 1)(x + 1)
/// let a = Polynomial::from_terms(vec![Term::new(1, 2), Term::new(-1, 0)]).unwrap();
/// let b = Polynomial::from_terms(vec![Term::new(1, 1), Term::new(-1, 0)]).unwrap();
///
/// let (q, r) = divide(&a, &b).unwrap();
/// assert_eq!(q.to_string(), "1x + 1");
/// assert!(r.is_zero());
/// ```
pub fn divide(dividend: &Polynomial, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
    divide_with(dividend, divisor, DivisionMode::Truncate)
}

/// Divides `dividend` by `divisor`, failing on any non-exact coefficient ratio.
///
/// On success the remainder is zero or has a lower degree than `divisor`.
pub fn divide_exact(
    dividend: &Polynomial,
    divisor: &Polynomial,
) -> Result<(Polynomial, Polynomial)> {
    divide_with(dividend, divisor, DivisionMode::Exact)
}

/// Divides `dividend` by `divisor` using the given [`DivisionMode`].
pub fn divide_with(
    dividend: &Polynomial,
    divisor: &Polynomial,
    mode: DivisionMode,
) -> Result<(Polynomial, Polynomial)> {
    let lead = divisor.leading_term().ok_or(Error::DivisionByZero)?;

    if let Some(degree) = dividend.degree() {
        if degree < lead.exp {
            return Err(Error::invalid_input(format!(
                "dividend degree {} is lower than divisor degree {}",
                degree, lead.exp
            )));
        }
    }

    let mut quotient: Vec<Term> = Vec::new();
    let mut remainder = dividend.clone();

    while let Some(top) = remainder.leading_term() {
        if top.exp < lead.exp {
            break;
        }

        // i64::MIN / -1 is the only ratio of non-zero i64s that overflows.
        if top.coef.checked_div(lead.coef).is_none() {
            return Err(Error::overflow(format!(
                "dividing {} by {}",
                top.coef, lead.coef
            )));
        }
        let (q_coef, rem) = Integer::div_rem(&top.coef, &lead.coef);
        let exact = rem == 0;
        if !exact && mode == DivisionMode::Exact {
            return Err(Error::InexactDivision {
                coefficient: top.coef,
                divisor: lead.coef,
            });
        }
        if q_coef == 0 {
            debug!(
                "division stopped: leading coefficient {} smaller than divisor's {}",
                top.coef, lead.coef
            );
            break;
        }

        let q_exp = top.exp - lead.exp;
        debug!("quotient term {}x^{}", q_coef, q_exp);
        quotient.push(Term::new(q_coef, q_exp));

        let step = try_multiply(divisor, &Polynomial::monomial(q_coef, q_exp))?;
        remainder = try_subtract(&remainder, &step)?;

        // An exact step cancels the leading term; a truncated one leaves a
        // term at the same exponent whose ratio then truncates to zero.
        debug_assert!(!exact || remainder.degree().map_or(true, |d| d < top.exp));
    }

    Ok((Polynomial::from_canonical(quotient), remainder))
}

impl Polynomial {
    /// See [`divide`].
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        divide(self, divisor)
    }

    /// See [`divide_exact`].
    pub fn div_rem_exact(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        divide_exact(self, divisor)
    }
}
