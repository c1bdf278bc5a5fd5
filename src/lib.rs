pub mod error;
pub mod math;

pub use error::{Error, Result};
pub use math::polynomial::{
    self, add, divide, divide_exact, divide_with, multiply, negate, subtract, DivisionMode,
    Polynomial, Term,
};
