use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::value::{callable::Callable, function::Function, matrix::Matrix},
};

/// Result type used by value operations and builtins.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Represents a runtime value in the interpreter.
///
/// Values are immutable once built; operations return new values. Matrices
/// and functions are reference counted so that copying a value between
/// scopes stays cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double precision number.
    Number(f64),
    /// A dense matrix; vectors are single-column matrices.
    Matrix(Rc<Matrix>),
    /// A polynomial produced by a lambda or by `derive`/`integrate`.
    Function(Rc<Function>),
    /// A builtin operation or a matrix constructor.
    Callable(Callable),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Self::Matrix(Rc::new(m))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Self::Callable(c)
    }
}

impl Value {
    /// The name of the value's type as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Matrix(_) => "matrix",
            Self::Function(_) => "function",
            Self::Callable(_) => "callable",
        }
    }

    /// Converts the value to an `f64`, or returns an error if it is not a
    /// number.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is a number.
    /// - `Err(RuntimeError::TypeError)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).as_number(1).unwrap(), 2.5);
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::TypeError { details: format!("expected a number, found a {}",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// Views the value as something that can be called.
    ///
    /// Functions become [`Callable::Polynomial`]; numbers and matrices are
    /// not callable.
    #[must_use]
    pub fn as_callable(&self) -> Option<Callable> {
        match self {
            Self::Callable(c) => Some(c.clone()),
            Self::Function(f) => Some(Callable::Polynomial(Rc::clone(f))),
            Self::Number(_) | Self::Matrix(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Matrix(m) => write!(f, "{m}"),
            Self::Function(func) => write!(f, "{func}"),
            Self::Callable(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::callable::{Constructor, Family};

    #[test]
    fn numbers_print_like_the_host() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(-120.0).to_string(), "-120");
    }

    #[test]
    fn functions_are_callable() {
        let f: Value = Function::new(vec![0.0, 2.0]).into();
        assert!(matches!(f.as_callable(), Some(Callable::Polynomial(_))));
        assert!(Value::Number(1.0).as_callable().is_none());
    }

    #[test]
    fn non_numbers_are_type_errors() {
        let c: Value = Callable::Constructor(Constructor::unbound(Family::Matrix)).into();
        assert_eq!(c.to_string(), "<mat>");
        let err = c.as_number(7).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError { line: 7, .. }));
    }
}
