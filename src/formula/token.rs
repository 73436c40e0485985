//! Formula token model
//!
//! A rating formula is authored in the admin tool as a flat sequence of
//! tokens: field references, arithmetic operators, literal numbers, and
//! percentage literals. The sequence is linear; grouping comes from explicit
//! parenthesis tokens.

use serde::{Deserialize, Serialize};

/// Arithmetic operators and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    OpenParen,
    CloseParen,
}

impl Operator {
    /// Parse the operator symbol as authored in the admin tool
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol.trim() {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "(" => Some(Operator::OpenParen),
            ")" => Some(Operator::CloseParen),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::OpenParen => "(",
            Operator::CloseParen => ")",
        }
    }

    /// Binding strength; parentheses carry none
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::OpenParen | Operator::CloseParen => 0,
        }
    }
}

/// One step of an authored formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Reference to a proposal form field, resolved through the test-value map
    Field(String),

    Operator(Operator),

    /// Literal number
    Number(f64),

    /// Percentage literal; divided by 100 before use
    Percentage(f64),
}

impl Token {
    pub fn field(name: &str) -> Token {
        Token::Field(name.to_string())
    }

    pub fn op(symbol: &str) -> Token {
        // The authoring UI only produces known symbols; anything else is
        // treated as a field reference and fails evaluation as unresolvable
        Operator::from_symbol(symbol)
            .map(Token::Operator)
            .unwrap_or_else(|| Token::Field(symbol.to_string()))
    }

    pub fn number(value: f64) -> Token {
        Token::Number(value)
    }

    pub fn percent(value: f64) -> Token {
        Token::Percentage(value)
    }
}
