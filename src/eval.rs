// Postfix expression evaluator
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of XUCL.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Evaluation of postfix (reverse Polish) expressions.
//!
//! An expression is a whitespace-separated sequence of tokens processed
//!   left to right against an operand stack:
//!
//!   - An integer literal (`-?[0-9]+`) is pushed;
//!   - The name of a known constant pushes its [resolved](resolve) value;
//!   - An operator ([`Op`]) pops its operands and pushes its result;
//!   - Anything else is an [`EvalError::InvalidToken`].
//!
//! Exactly one integer must remain on the stack once all tokens have been
//!   consumed;
//!     that integer is the result.
//!
//! ```
//! use xucl::{eval::evaluate, symtab::ConstTable};
//!
//! let mut consts = ConstTable::new();
//! consts.define("TEN", "10");
//!
//! assert_eq!(Ok(12.into()), evaluate("TEN 2 +", &consts));
//! assert_eq!(Ok(5.into()), evaluate("-5 abs", &consts));
//! ```
//!
//! The instruction set is minimal.
//! There is no subtraction, multiplication, or comparison.
//! Integers are unbounded ([`BigInt`]),
//!   so arithmetic never overflows.

use crate::symtab::ConstTable;
use crate::value::{parse_int, resolve, Value};
use log::trace;
use num_bigint::BigInt;
use std::fmt::{self, Display};

/// Operators of the instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Binary addition (`+`).
    Add,
    /// Unary absolute value (`abs`).
    Abs,
}

impl Op {
    /// Recognize an operator token.
    pub fn from_token(tok: &str) -> Option<Self> {
        match tok {
            "+" => Some(Self::Add),
            "abs" => Some(Self::Abs),
            _ => None,
        }
    }

    /// Number of operands popped from the stack.
    pub fn arity(&self) -> usize {
        match self {
            Self::Add => 2,
            Self::Abs => 1,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Abs => write!(f, "abs"),
        }
    }
}

/// Error during expression evaluation.
///
/// Errors own their data so that they may outlive the expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Token is neither an integer, a known constant, nor an operator.
    InvalidToken(String),

    /// An operator received an operand that is not an integer.
    ///
    /// All of the operator's operands are retained in stack order
    ///   for the diagnostic.
    NonIntegerOperand(Op, Vec<Value>),

    /// An operator required more operands than were on the stack.
    StackUnderflow(Op),

    /// No value remained after evaluation
    ///   (e.g. the expression was empty).
    EmptyResult,

    /// More than one value remained after evaluation.
    UnconsumedOperands(usize),

    /// The single remaining value is not an integer.
    NonIntegerResult(Value),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EvalError::*;

        match self {
            InvalidToken(tok) => write!(f, "invalid token `{tok}`"),

            NonIntegerOperand(op, operands) => {
                write!(f, "non-integer operand for `{op}`: ")?;
                write_operands(f, *op, operands)
            }

            StackUnderflow(op) => write!(
                f,
                "stack underflow: `{op}` requires {} operand(s)",
                op.arity()
            ),

            EmptyResult => write!(f, "expression produced no value"),

            UnconsumedOperands(n) => {
                write!(f, "expression left {n} values on the stack")
            }

            NonIntegerResult(value) => {
                write!(f, "expression result `{value}` is not an integer")
            }
        }
    }
}

/// Write operands in source notation (`a + b`, `abs a`).
fn write_operands(
    f: &mut fmt::Formatter<'_>,
    op: Op,
    operands: &[Value],
) -> fmt::Result {
    match (op, operands) {
        (Op::Add, [a, b]) => write!(f, "{a} + {b}"),
        (Op::Abs, [a]) => write!(f, "abs {a}"),
        (_, rest) => rest.iter().try_for_each(|x| write!(f, "{x} ")),
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluate the postfix expression `expr` against `constants`.
///
/// See the [module-level documentation](self) for details.
pub fn evaluate(expr: &str, constants: &ConstTable) -> EvalResult<BigInt> {
    let mut stack = Stack::default();

    for tok in expr.split_whitespace() {
        stack.step(tok, constants)?;
        trace!("`{tok}` => {stack}");
    }

    stack.into_result()
}

/// Operand stack of an evaluation in progress.
#[derive(Debug, Default, PartialEq, Eq)]
struct Stack(Vec<Value>);

impl Stack {
    /// Process a single token.
    fn step(&mut self, tok: &str, constants: &ConstTable) -> EvalResult<()> {
        if let Some(n) = parse_int(tok) {
            self.0.push(Value::Int(n));
        } else if constants.contains(tok) {
            self.0.push(resolve(tok, constants));
        } else if let Some(op) = Op::from_token(tok) {
            let result = self.apply(op)?;
            self.0.push(Value::Int(result));
        } else {
            return Err(EvalError::InvalidToken(tok.to_string()));
        }

        Ok(())
    }

    /// Pop the operands of `op` and compute its result.
    fn apply(&mut self, op: Op) -> EvalResult<BigInt> {
        match op {
            Op::Add => {
                let [a, b] = self.pop_ints::<2>(op)?;
                Ok(a + b)
            }

            Op::Abs => {
                let [a] = self.pop_ints::<1>(op)?;
                Ok(BigInt::from(a.magnitude().clone()))
            }
        }
    }

    /// Pop `N` integer operands for `op`,
    ///   returned in the order in which they were pushed.
    fn pop_ints<const N: usize>(
        &mut self,
        op: Op,
    ) -> EvalResult<[BigInt; N]> {
        let len = self.0.len();

        if len < N {
            return Err(EvalError::StackUnderflow(op));
        }

        let operands = self.0.split_off(len - N);

        let ints = operands
            .iter()
            .map(|value| value.as_int().cloned())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                EvalError::NonIntegerOperand(op, operands.clone())
            })?;

        ints.try_into()
            .map_err(|_: Vec<BigInt>| EvalError::StackUnderflow(op))
    }

    fn into_result(mut self) -> EvalResult<BigInt> {
        match self.0.len() {
            0 => Err(EvalError::EmptyResult),
            1 => match self.0.pop() {
                Some(Value::Int(n)) => Ok(n),
                Some(value) => Err(EvalError::NonIntegerResult(value)),
                None => Err(EvalError::EmptyResult),
            },
            n => Err(EvalError::UnconsumedOperands(n)),
        }
    }
}

impl Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }

            match value {
                Value::Int(n) => write!(f, "{n}")?,
                Value::Str(s) => write!(f, "{s:?}")?,
            }
        }

        write!(f, "]")
    }
}
