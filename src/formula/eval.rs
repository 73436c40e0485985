//! Formula evaluation
//!
//! The admin tool's "test formula" action resolves field tokens against a
//! map of test values, then evaluates the linear token sequence as an
//! arithmetic expression. Evaluation is an explicit interpreter
//! (shunting-yard to postfix, then a numeric stack); user-authored formulas
//! are never executed as code.

use super::token::{Operator, Token};
use std::collections::HashMap;
use thiserror::Error;

/// Why a formula could not be evaluated.
///
/// Callers present these as "cannot compute with current inputs"; a failed
/// evaluation is never shown as 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("formula has no steps")]
    Empty,

    #[error("no test value for field '{0}'")]
    MissingField(String),

    #[error("malformed formula: {0}")]
    Malformed(&'static str),

    #[error("result is not a finite number")]
    NonFinite,
}

/// Resolved numeric term or operator, ready for parsing
enum Term {
    Value(f64),
    Op(Operator),
}

/// Evaluate a formula against a map of test values.
///
/// Field tokens with a missing or empty value fail the whole evaluation.
/// Non-empty values that do not parse as numbers coerce to 0; dropdown
/// choices and the like reach the evaluator as plain strings.
pub fn evaluate(steps: &[Token], values: &HashMap<String, String>) -> Result<f64, FormulaError> {
    if steps.is_empty() {
        return Err(FormulaError::Empty);
    }

    let terms = resolve(steps, values)?;
    let postfix = to_postfix(terms)?;
    let result = eval_postfix(&postfix)?;

    if result.is_finite() {
        Ok(result)
    } else {
        Err(FormulaError::NonFinite)
    }
}

/// Substitute numeric values for field, number, and percentage tokens
fn resolve(steps: &[Token], values: &HashMap<String, String>) -> Result<Vec<Term>, FormulaError> {
    steps
        .iter()
        .map(|step| match step {
            Token::Field(name) => {
                let value = values
                    .get(name)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| FormulaError::MissingField(name.clone()))?;
                // Known precision gap: non-numeric values coerce to 0
                Ok(Term::Value(value.parse().unwrap_or(0.0)))
            }
            Token::Operator(op) => Ok(Term::Op(*op)),
            Token::Number(n) => Ok(Term::Value(*n)),
            Token::Percentage(p) => Ok(Term::Value(p / 100.0)),
        })
        .collect()
}

/// Shunting-yard: infix terms to postfix order
fn to_postfix(terms: Vec<Term>) -> Result<Vec<Term>, FormulaError> {
    let mut output = Vec::with_capacity(terms.len());
    let mut stack: Vec<Operator> = Vec::new();

    for term in terms {
        match term {
            Term::Value(v) => output.push(Term::Value(v)),
            Term::Op(Operator::OpenParen) => stack.push(Operator::OpenParen),
            Term::Op(Operator::CloseParen) => loop {
                match stack.pop() {
                    Some(Operator::OpenParen) => break,
                    Some(op) => output.push(Term::Op(op)),
                    None => return Err(FormulaError::Malformed("unbalanced parenthesis")),
                }
            },
            Term::Op(op) => {
                while let Some(&top) = stack.last() {
                    if top == Operator::OpenParen || top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Term::Op(stack.pop().unwrap()));
                }
                stack.push(op);
            }
        }
    }

    while let Some(op) = stack.pop() {
        if op == Operator::OpenParen {
            return Err(FormulaError::Malformed("unbalanced parenthesis"));
        }
        output.push(Term::Op(op));
    }

    Ok(output)
}

/// Evaluate postfix terms over a numeric stack
fn eval_postfix(terms: &[Term]) -> Result<f64, FormulaError> {
    let mut stack: Vec<f64> = Vec::new();

    for term in terms {
        match term {
            Term::Value(v) => stack.push(*v),
            Term::Op(op) => {
                let rhs = stack
                    .pop()
                    .ok_or(FormulaError::Malformed("dangling operator"))?;
                let lhs = stack
                    .pop()
                    .ok_or(FormulaError::Malformed("dangling operator"))?;
                let value = match op {
                    Operator::Add => lhs + rhs,
                    Operator::Subtract => lhs - rhs,
                    Operator::Multiply => lhs * rhs,
                    Operator::Divide => lhs / rhs,
                    // Parentheses never reach postfix
                    Operator::OpenParen | Operator::CloseParen => {
                        return Err(FormulaError::Malformed("unbalanced parenthesis"))
                    }
                };
                stack.push(value);
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(result), true) => Ok(result),
        // Adjacent values with no operator between them
        _ => Err(FormulaError::Malformed("incomplete expression")),
    }
}
