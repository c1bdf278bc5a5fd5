pub mod polynomial;

pub use polynomial::{
    add, divide, divide_exact, divide_with, multiply, negate, subtract,
    fixture::{read_polynomial, write_polynomial, FixtureReader},
    verify::{verify_case, CaseOutcome, VerifyConfig, VerifyReport},
    DivisionMode, Polynomial, Term,
};
