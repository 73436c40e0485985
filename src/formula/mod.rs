//! Rating formula evaluator for the admin configuration tool

mod eval;
mod token;

pub use eval::{evaluate, FormulaError};
pub use token::{Operator, Token};
