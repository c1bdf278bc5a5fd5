//! Division verifier for fixture files.
//!
//! For every `(dividend, divisor)` pair the verifier divides, rebuilds
//! `divisor * quotient + remainder` and compares it term by term with the
//! dividend. A mismatch, a division error, coefficient overflow or a record
//! that does not decode counts as a failed case; only I/O problems and
//! truncated input abort a run.

use std::io::Read;

use log::{debug, info, warn};

use super::arithmetic::{try_add, try_multiply};
use super::division::{divide_with, DivisionMode};
use super::fixture::FixtureReader;
use super::Polynomial;
use crate::error::Result;

/// Number of cases in the standard fixture file.
pub const DEFAULT_TEST_CASES: usize = 200;

/// Configuration for a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Maximum number of pairs to read
    pub num_test_cases: usize,
    /// Division mode used for every case
    pub mode: DivisionMode,
    /// Stop reading after the first failed case
    pub stop_on_first_failure: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            num_test_cases: DEFAULT_TEST_CASES,
            mode: DivisionMode::Truncate,
            stop_on_first_failure: false,
        }
    }
}

impl VerifyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_test_cases(mut self, num_test_cases: usize) -> Self {
        self.num_test_cases = num_test_cases;
        self
    }

    pub fn with_mode(mut self, mode: DivisionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }
}

/// Outcome of verifying a single pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// `divisor * quotient + remainder` equals the dividend.
    Passed {
        quotient: Polynomial,
        remainder: Polynomial,
    },
    /// The rebuilt polynomial differs from the dividend.
    Mismatch {
        quotient: Polynomial,
        remainder: Polynomial,
        rebuilt: Polynomial,
    },
    /// Division or the rebuild failed, e.g. a precondition was violated or
    /// a coefficient overflowed.
    DivisionFailed(String),
    /// The dividend or divisor record could not be decoded.
    InvalidRecord(String),
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Passed { .. })
    }

    pub fn quotient(&self) -> Option<&Polynomial> {
        match self {
            CaseOutcome::Passed { quotient, .. } | CaseOutcome::Mismatch { quotient, .. } => {
                Some(quotient)
            }
            CaseOutcome::DivisionFailed(_) | CaseOutcome::InvalidRecord(_) => None,
        }
    }
}

/// One verified pair and its outcome.
///
/// `dividend` and `divisor` are `None` when their record did not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub index: usize,
    pub dividend: Option<Polynomial>,
    pub divisor: Option<Polynomial>,
    pub outcome: CaseOutcome,
}

/// Tally of a verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub cases_run: usize,
    pub errors: usize,
    pub cases: Vec<CaseResult>,
}

impl VerifyReport {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.outcome.is_pass())
    }
}

/// Divides `dividend` by `divisor` and checks the result against the dividend.
pub fn verify_case(dividend: &Polynomial, divisor: &Polynomial) -> CaseOutcome {
    verify_case_with(dividend, divisor, DivisionMode::Truncate)
}

/// [`verify_case`] with an explicit division mode.
pub fn verify_case_with(
    dividend: &Polynomial,
    divisor: &Polynomial,
    mode: DivisionMode,
) -> CaseOutcome {
    let (quotient, remainder) = match divide_with(dividend, divisor, mode) {
        Ok(qr) => qr,
        Err(e) => return CaseOutcome::DivisionFailed(e.to_string()),
    };

    let rebuilt = match try_multiply(divisor, &quotient).and_then(|p| try_add(&p, &remainder)) {
        Ok(p) => p,
        Err(e) => return CaseOutcome::DivisionFailed(e.to_string()),
    };
    if rebuilt == *dividend {
        CaseOutcome::Passed {
            quotient,
            remainder,
        }
    } else {
        CaseOutcome::Mismatch {
            quotient,
            remainder,
            rebuilt,
        }
    }
}

/// Verifies up to `config.num_test_cases` pairs read from `reader`.
///
/// # Errors
/// Returns an error if the fixture cannot be read or ends inside a record.
/// Failed cases, including records that do not decode, are counted in the
/// report instead.
pub fn run<R: Read>(reader: R, config: &VerifyConfig) -> Result<VerifyReport> {
    let mut fixture = FixtureReader::new(reader);
    let mut report = VerifyReport::default();

    for index in 0..config.num_test_cases {
        let (dividend, divisor) = match fixture.next_records()? {
            Some(pair) => pair,
            None => {
                warn!(
                    "fixture ended after {} of {} test cases",
                    index, config.num_test_cases
                );
                break;
            }
        };

        let (dividend, divisor, outcome) = match (dividend.decode(), divisor.decode()) {
            (Ok(a), Ok(b)) => {
                let outcome = verify_case_with(&a, &b, config.mode);
                (Some(a), Some(b), outcome)
            }
            (Err(e), b) => (
                None,
                b.ok(),
                CaseOutcome::InvalidRecord(format!("dividend: {}", e)),
            ),
            (a, Err(e)) => (
                a.ok(),
                None,
                CaseOutcome::InvalidRecord(format!("divisor: {}", e)),
            ),
        };
        report.cases_run += 1;

        match &outcome {
            CaseOutcome::Passed { .. } => debug!("case {}: passed", index),
            CaseOutcome::Mismatch { rebuilt, .. } => {
                if let Some(dividend) = &dividend {
                    warn!(
                        "case {}: divisor * quotient + remainder = {} but dividend is {}",
                        index, rebuilt, dividend
                    );
                }
            }
            CaseOutcome::DivisionFailed(reason) => warn!("case {}: {}", index, reason),
            CaseOutcome::InvalidRecord(reason) => warn!("case {}: bad record, {}", index, reason),
        }

        let failed = !outcome.is_pass();
        if failed {
            report.errors += 1;
        }
        report.cases.push(CaseResult {
            index,
            dividend,
            divisor,
            outcome,
        });

        if failed && config.stop_on_first_failure {
            break;
        }
    }

    info!(
        "verified {} cases, {} errors",
        report.cases_run, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::math::polynomial::fixture::{write_polynomial, RECORD_TERMS};
    use crate::math::polynomial::Term;
    use std::io::Cursor;

    fn poly(terms: &[(i64, u32)]) -> Polynomial {
        Polynomial::from_terms(terms.iter().map(|&(c, e)| Term::new(c, e)).collect()).unwrap()
    }

    fn raw_record(coefs: &[i32], exps: &[i32]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for values in [coefs, exps] {
            for i in 0..RECORD_TERMS {
                let v = values.get(i).copied().unwrap_or(0);
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        bytes
    }

    fn fixture(pairs: &[(Polynomial, Polynomial)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (dividend, divisor) in pairs {
            write_polynomial(&mut bytes, dividend).unwrap();
            write_polynomial(&mut bytes, divisor).unwrap();
        }
        bytes
    }

    #[test]
    fn test_default_config() {
        let config = VerifyConfig::default();
        assert_eq!(config.num_test_cases, 200);
        assert_eq!(config.mode, DivisionMode::Truncate);
        assert!(!config.stop_on_first_failure);

        let custom = VerifyConfig::new()
            .with_num_test_cases(3)
            .with_mode(DivisionMode::Exact)
            .with_stop_on_first_failure(true);
        assert_eq!(custom.num_test_cases, 3);
        assert_eq!(custom.mode, DivisionMode::Exact);
        assert!(custom.stop_on_first_failure);
    }

    #[test]
    fn test_verify_case_passes() {
        let outcome = verify_case(&poly(&[(3, 2), (2, 1), (-1, 0)]), &poly(&[(1, 1), (1, 0)]));
        assert!(outcome.is_pass());
        assert_eq!(outcome.quotient(), Some(&poly(&[(3, 1), (-1, 0)])));
    }

    #[test]
    fn test_verify_case_reports_precondition_failure() {
        let outcome = verify_case(&poly(&[(1, 1)]), &poly(&[(1, 2)]));
        assert!(matches!(outcome, CaseOutcome::DivisionFailed(_)));
        assert_eq!(outcome.quotient(), None);
    }

    #[test]
    fn test_verify_case_exact_mode() {
        let outcome = verify_case_with(&poly(&[(3, 1)]), &poly(&[(2, 0)]), DivisionMode::Exact);
        match outcome {
            CaseOutcome::DivisionFailed(reason) => assert!(reason.contains("not divisible")),
            other => panic!("expected division failure, got {:?}", other),
        }
    }

    #[test]
    fn test_run_counts_errors() {
        let bytes = fixture(&[
            (poly(&[(1, 2), (-1, 0)]), poly(&[(1, 1), (-1, 0)])),
            (poly(&[(1, 1)]), poly(&[(1, 3)])),
            (poly(&[(5, 4), (1, 0)]), poly(&[(1, 2), (1, 1)])),
        ]);

        let report = run(Cursor::new(bytes), &VerifyConfig::default()).unwrap();
        assert_eq!(report.cases_run, 3);
        assert_eq!(report.errors, 1);
        assert!(!report.is_success());

        let failed: Vec<usize> = report.failures().map(|c| c.index).collect();
        assert_eq!(failed, vec![1]);
    }

    #[test]
    fn test_run_respects_case_limit() {
        let pair = (poly(&[(1, 2), (-1, 0)]), poly(&[(1, 1), (1, 0)]));
        let bytes = fixture(&[pair.clone(), pair.clone(), pair]);

        let config = VerifyConfig::new().with_num_test_cases(2);
        let report = run(Cursor::new(bytes), &config).unwrap();
        assert_eq!(report.cases_run, 2);
        assert!(report.is_success());
    }

    #[test]
    fn test_run_stops_on_first_failure() {
        let bad = (poly(&[(1, 1)]), poly(&[(1, 3)]));
        let good = (poly(&[(1, 1)]), poly(&[(1, 0)]));
        let bytes = fixture(&[good, bad.clone(), bad]);

        let config = VerifyConfig::new().with_stop_on_first_failure(true);
        let report = run(Cursor::new(bytes), &config).unwrap();
        assert_eq!(report.cases_run, 2);
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn test_run_short_fixture_ends_early() {
        let report = run(Cursor::new(Vec::new()), &VerifyConfig::default()).unwrap();
        assert_eq!(report.cases_run, 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_verify_case_reports_overflow() {
        // x^64 / (x - 2) needs a quotient coefficient of 2^63.
        let outcome = verify_case(&poly(&[(1, 64)]), &poly(&[(1, 1), (-2, 0)]));
        match outcome {
            CaseOutcome::DivisionFailed(reason) => assert!(reason.contains("overflow")),
            other => panic!("expected overflow failure, got {:?}", other),
        }
    }

    #[test]
    fn test_run_counts_undecodable_record() {
        // Interior zero coefficient: not canonical.
        let mut bytes = raw_record(&[1, 0, -1], &[2, 1, 0]);
        bytes.extend(raw_record(&[1, 1], &[1, 0]));
        bytes.extend(fixture(&[(poly(&[(1, 2), (-1, 0)]), poly(&[(1, 1), (-1, 0)]))]));

        let report = run(Cursor::new(bytes), &VerifyConfig::default()).unwrap();
        assert_eq!(report.cases_run, 2);
        assert_eq!(report.errors, 1);

        let first = &report.cases[0];
        assert!(matches!(first.outcome, CaseOutcome::InvalidRecord(_)));
        assert_eq!(first.dividend, None);
        assert_eq!(first.divisor, Some(poly(&[(1, 1), (1, 0)])));
        assert!(report.cases[1].outcome.is_pass());
    }

    #[test]
    fn test_run_counts_negative_exponent_divisor() {
        let mut bytes = raw_record(&[2, 1], &[3, 0]);
        bytes.extend(raw_record(&[1], &[-1]));

        let report = run(Cursor::new(bytes), &VerifyConfig::default()).unwrap();
        assert_eq!(report.errors, 1);
        match &report.cases[0].outcome {
            CaseOutcome::InvalidRecord(reason) => assert!(reason.starts_with("divisor")),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_run_propagates_truncated_input() {
        let mut bytes = fixture(&[(poly(&[(1, 1)]), poly(&[(1, 0)]))]);
        bytes.truncate(bytes.len() - 8);
        assert!(matches!(
            run(Cursor::new(bytes), &VerifyConfig::default()),
            Err(Error::Io(_))
        ));
    }
}
