use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        lexer::Token,
        value::core::{EvalResult, Value},
    },
};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// Maps an operator token to its operator, if it is one.
    #[must_use]
    pub const fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Plus => Some(Self::Add),
            Token::Minus => Some(Self::Subtract),
            Token::Star => Some(Self::Multiply),
            Token::Slash => Some(Self::Divide),
            Token::Percent => Some(Self::Modulo),
            _ => None,
        }
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Applies the operator to two numbers with IEEE semantics.
    #[must_use]
    pub fn native(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Modulo => a % b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Applies a binary operator to two values.
///
/// Two numbers use native arithmetic. Otherwise the left operand decides:
/// - a number scales a matrix or function on its right with `*`;
/// - a matrix adds and subtracts matrices of its shape, multiplies by
///   numbers and matrices and divides by numbers;
/// - a function adds and subtracts functions and numbers, multiplies by
///   numbers and functions and divides by numbers.
///
/// Any other combination is a `TypeError`.
///
/// # Parameters
/// - `op`: The operator.
/// - `lhs`: Left operand.
/// - `rhs`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use minimatica::interpreter::{
///     builtin::arithmetic::{Operator, apply},
///     value::core::Value,
/// };
///
/// let r = apply(Operator::Modulo, &Value::Number(7.0), &Value::Number(4.0), 1).unwrap();
/// assert_eq!(r, Value::Number(3.0));
/// ```
pub fn apply(op: Operator, lhs: &Value, rhs: &Value, line: usize) -> EvalResult<Value> {
    use Operator::{Add, Divide, Multiply, Subtract};

    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(op.native(*a, *b))),

        (Value::Number(a), Value::Matrix(m)) if op == Multiply => Ok(m.scale(*a).into()),
        (Value::Number(a), Value::Function(f)) if op == Multiply => Ok(f.scale(*a).into()),

        (Value::Matrix(a), Value::Matrix(b)) => match op {
            Add => Ok(a.add(b, line)?.into()),
            Subtract => Ok(a.subtract(b, line)?.into()),
            Multiply => Ok(a.multiply(b, line)?.into()),
            _ => Err(unsupported(op, lhs, rhs, line)),
        },
        (Value::Matrix(m), Value::Number(n)) => match op {
            Multiply => Ok(m.scale(*n).into()),
            Divide => Ok(m.map(|c| c / n).into()),
            _ => Err(unsupported(op, lhs, rhs, line)),
        },

        (Value::Function(f), Value::Function(g)) => match op {
            Add => Ok(f.add(g).into()),
            Subtract => Ok(f.subtract(g).into()),
            Multiply => Ok(f.multiply(g, line)?.into()),
            _ => Err(unsupported(op, lhs, rhs, line)),
        },
        (Value::Function(f), Value::Number(n)) => match op {
            Add => Ok(f.add_constant(*n).into()),
            Subtract => Ok(f.add_constant(-n).into()),
            Multiply => Ok(f.scale(*n).into()),
            Divide => Ok(f.scale(1.0 / n).into()),
            _ => Err(unsupported(op, lhs, rhs, line)),
        },

        _ => Err(unsupported(op, lhs, rhs, line)),
    }
}

fn unsupported(op: Operator, lhs: &Value, rhs: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("operator \"{op}\" is not defined between a {} and a {}",
                                               lhs.type_name(),
                                               rhs.type_name()),
                              line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::{function::Function, matrix::Matrix};

    fn mat(rows: usize, columns: usize, cells: &[f64]) -> Value {
        Matrix::from_row_major(rows, columns, cells.to_vec(), 1).unwrap().into()
    }

    #[test]
    fn numbers_use_ieee_semantics() {
        let two = Value::Number(2.0);
        let zero = Value::Number(0.0);
        assert_eq!(apply(Operator::Subtract, &two, &Value::Number(5.0), 1).unwrap(),
                   Value::Number(-3.0));
        assert_eq!(apply(Operator::Divide, &two, &zero, 1).unwrap(),
                   Value::Number(f64::INFINITY));
    }

    #[test]
    fn scalar_multiplication_commutes() {
        let m = mat(1, 2, &[1.0, -1.0]);
        let three = Value::Number(3.0);
        let left = apply(Operator::Multiply, &three, &m, 1).unwrap();
        let right = apply(Operator::Multiply, &m, &three, 1).unwrap();
        assert_eq!(left, right);
        assert_eq!(left, mat(1, 2, &[3.0, -3.0]));
    }

    #[test]
    fn matrix_identity_law() {
        let identity = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let m = mat(2, 2, &[3.0, -2.0, 5.0, 1.0]);
        assert_eq!(apply(Operator::Multiply, &identity, &m, 1).unwrap(), m);
    }

    #[test]
    fn functions_combine_with_numbers() {
        let f: Value = Function::new(vec![1.0, 2.0]).into();
        let sum = apply(Operator::Add, &f, &Value::Number(4.0), 1).unwrap();
        assert_eq!(sum.to_string(), "f(x)=+2x+5");
        let halved = apply(Operator::Divide, &f, &Value::Number(2.0), 1).unwrap();
        assert_eq!(halved.to_string(), "f(x)=+x+0.5");
    }

    #[test]
    fn unsupported_combinations_are_type_errors() {
        let m = mat(1, 1, &[1.0]);
        let f: Value = Function::new(vec![1.0]).into();
        for (op, lhs, rhs) in [(Operator::Modulo, &m, &m),
                               (Operator::Add, &Value::Number(1.0), &m),
                               (Operator::Multiply, &m, &f),
                               (Operator::Modulo, &f, &Value::Number(2.0))]
        {
            let err = apply(op, lhs, rhs, 5).unwrap_err();
            assert!(matches!(err, RuntimeError::TypeError { line: 5, .. }), "{op}: {err}");
        }
    }
}
