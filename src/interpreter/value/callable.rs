use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        sink::Sink,
        value::{
            core::{EvalResult, Value},
            function::Function,
            matrix::Matrix,
        },
    },
    util::num::f64_to_usize_checked,
};

/// Signature shared by every native operation.
///
/// A native receives the evaluated arguments, the sink for output and the
/// line of the call for error reporting.
pub type NativeFn = fn(&[Value], &mut dyn Sink, usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a native operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// `n` or more arguments.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub const fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::AtLeast(m) => n >= *m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A named operation implemented by the interpreter.
#[derive(Clone, Copy)]
pub struct NativeOperation {
    /// The name the operation is registered under.
    pub name:  &'static str,
    /// The accepted argument counts.
    pub arity: Arity,
    /// The implementation.
    pub func:  NativeFn,
}

impl fmt::Debug for NativeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeOperation")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl PartialEq for NativeOperation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity
    }
}

/// The shape a dimensioned constructor builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `mat<R,C>`: takes two dimensions.
    Matrix,
    /// `vec<R>`: takes one dimension, the column count is 1.
    Vector,
}

impl Family {
    /// The name the constructor is registered under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Matrix => "mat",
            Self::Vector => "vec",
        }
    }

    const fn dimension_count(self) -> usize {
        match self {
            Self::Matrix => 2,
            Self::Vector => 1,
        }
    }
}

/// A two-stage matrix constructor.
///
/// The first stage binds the dimensions through generic arguments, the
/// second fills the cells row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constructor {
    family:     Family,
    dimensions: Option<(usize, usize)>,
}

impl Constructor {
    /// Creates a constructor that has not been given dimensions yet.
    #[must_use]
    pub const fn unbound(family: Family) -> Self {
        Self { family,
               dimensions: None }
    }

    /// The bound `(rows, columns)`, if any.
    #[must_use]
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn bind(&self, generics: &[f64], line: usize) -> EvalResult<Self> {
        let name = self.family.name();
        if self.dimensions.is_some() {
            return Err(RuntimeError::InvalidDimensions { details: format!("\"{name}\" already has dimensions"),
                                                         line });
        }
        if generics.len() != self.family.dimension_count() {
            return Err(RuntimeError::InvalidDimensions { details: format!("\"{name}\" takes {} dimension(s), found {}",
                                                                          self.family.dimension_count(),
                                                                          generics.len()),
                                                         line });
        }

        let size = |d: f64| -> EvalResult<usize> {
            let invalid = RuntimeError::InvalidDimensions { details: format!("\"{d}\" is not a positive whole number"),
                                                            line };
            match f64_to_usize_checked(d, invalid.clone())? {
                0 => Err(invalid),
                n => Ok(n),
            }
        };
        let rows = size(generics[0])?;
        let columns = match self.family {
            Family::Matrix => size(generics[1])?,
            Family::Vector => 1,
        };
        if rows.checked_mul(columns).is_none() {
            return Err(RuntimeError::InvalidDimensions { details: format!("a {rows}x{columns} matrix is too large"),
                                                         line });
        }

        Ok(Self { family:     self.family,
                  dimensions: Some((rows, columns)), })
    }

    fn construct(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        let Some((rows, columns)) = self.dimensions else {
            return Err(RuntimeError::InvalidDimensions { details: format!("\"{}\" needs dimensions, e.g. {}",
                                                                          self.family.name(),
                                                                          match self.family {
                                                                              Family::Matrix => "mat<2,2>(...)",
                                                                              Family::Vector => "vec<3>(...)",
                                                                          }),
                                                         line });
        };

        let size = rows.saturating_mul(columns);
        if args.len() != size {
            return Err(RuntimeError::ArgumentCountMismatch { name: self.to_string(),
                                                             expected: size.to_string(),
                                                             found: args.len(),
                                                             line });
        }

        let cells = args.iter()
                        .map(|v| v.as_number(line))
                        .collect::<EvalResult<Vec<_>>>()?;

        Ok(Matrix::from_row_major(rows, columns, cells, line)?.into())
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.family, self.dimensions) {
            (family, None) => f.write_str(family.name()),
            (Family::Matrix, Some((r, c))) => write!(f, "mat<{r},{c}>"),
            (Family::Vector, Some((r, _))) => write!(f, "vec<{r}>"),
        }
    }
}

/// Anything that can be invoked with positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    /// An operation from the builtin registry.
    Native(NativeOperation),
    /// A polynomial applied to one number.
    Polynomial(Rc<Function>),
    /// A dimensioned matrix or vector constructor.
    Constructor(Constructor),
}

impl Callable {
    /// A short name used in error messages.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Native(op) => op.name.to_string(),
            Self::Polynomial(_) => "function".to_string(),
            Self::Constructor(c) => c.to_string(),
        }
    }

    /// Applies generic arguments, e.g. the `<2,3>` in `mat<2,3>(...)`.
    ///
    /// Only constructors without dimensions accept generic arguments.
    ///
    /// # Errors
    /// `InvalidDimensions` if the callable takes no generic arguments, or if
    /// the count or the values do not describe a valid shape.
    pub fn specialize(&self, generics: &[f64], line: usize) -> EvalResult<Self> {
        match self {
            Self::Constructor(c) => Ok(Self::Constructor(c.bind(generics, line)?)),
            _ => Err(RuntimeError::InvalidDimensions { details: format!("\"{}\" takes no generic arguments",
                                                                        self.name()),
                                                       line }),
        }
    }

    /// Invokes the callable.
    ///
    /// # Parameters
    /// - `args`: Evaluated positional arguments.
    /// - `sink`: Receives any output the call produces.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The resulting value, or the error raised by the callable.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::{
    ///     sink::Console,
    ///     value::{
    ///         callable::{Callable, Constructor, Family},
    ///         core::Value,
    ///     },
    /// };
    ///
    /// let mut console = Console::new();
    /// let vec3 = Callable::Constructor(Constructor::unbound(Family::Vector)).specialize(&[3.0], 1)
    ///                                                                        .unwrap();
    /// let v = vec3.invoke(&[Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)], &mut console, 1)
    ///             .unwrap();
    /// assert_eq!(v.to_string(), "| 1.00|\n| 2.00|\n| 3.00|");
    /// ```
    pub fn invoke(&self, args: &[Value], sink: &mut dyn Sink, line: usize) -> EvalResult<Value> {
        match self {
            Self::Native(op) => {
                if !op.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch { name: op.name.to_string(),
                                                                     expected: op.arity.to_string(),
                                                                     found: args.len(),
                                                                     line });
                }
                (op.func)(args, sink, line)
            },
            Self::Polynomial(f) => {
                if args.len() != 1 {
                    return Err(RuntimeError::ArgumentCountMismatch { name: self.name(),
                                                                     expected: "1".to_string(),
                                                                     found: args.len(),
                                                                     line });
                }
                Ok(Value::Number(f.apply(args[0].as_number(line)?)))
            },
            Self::Constructor(c) => c.construct(args, line),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(op) => write!(f, "<builtin {}>", op.name),
            Self::Polynomial(function) => write!(f, "{function}"),
            Self::Constructor(c) => write!(f, "<{c}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::sink::Console;

    fn mat() -> Callable {
        Callable::Constructor(Constructor::unbound(Family::Matrix))
    }

    #[test]
    fn constructor_binds_then_fills() {
        let mut console = Console::new();
        let mat23 = mat().specialize(&[2.0, 3.0], 1).unwrap();
        assert_eq!(mat23.to_string(), "<mat<2,3>>");

        let args: Vec<Value> = (1..=6).map(|n| Value::Number(f64::from(n))).collect();
        let Value::Matrix(m) = mat23.invoke(&args, &mut console, 1).unwrap() else {
            panic!("expected a matrix");
        };
        assert_eq!((m.rows(), m.columns()), (2, 3));
        assert_eq!(m.get(1, 0), Some(4.0));
    }

    #[test]
    fn constructor_rejects_wrong_cell_count() {
        let mut console = Console::new();
        let mat22 = mat().specialize(&[2.0, 2.0], 3).unwrap();
        let err = mat22.invoke(&[Value::Number(1.0)], &mut console, 3).unwrap_err();
        assert!(matches!(err, RuntimeError::ArgumentCountMismatch { found: 1, line: 3, .. }));
    }

    #[test]
    fn constructor_rejects_bad_dimensions() {
        assert!(mat().specialize(&[2.0], 1).is_err());
        assert!(mat().specialize(&[0.0, 2.0], 1).is_err());
        assert!(mat().specialize(&[1.5, 2.0], 1).is_err());
        assert!(mat().specialize(&[-1.0, 2.0], 1).is_err());
        assert!(matches!(mat().specialize(&[4_294_967_296.0, 4_294_967_297.0], 1),
                         Err(RuntimeError::InvalidDimensions { .. })));

        let mut console = Console::new();
        assert!(matches!(mat().invoke(&[], &mut console, 1),
                         Err(RuntimeError::InvalidDimensions { .. })));
    }

    #[test]
    fn polynomial_takes_one_number() {
        let mut console = Console::new();
        let f = Callable::Polynomial(Rc::new(Function::new(vec![1.0, 1.0])));
        assert_eq!(f.invoke(&[Value::Number(2.0)], &mut console, 1).unwrap(), Value::Number(3.0));
        assert!(f.invoke(&[], &mut console, 1).is_err());
        assert!(f.specialize(&[1.0], 1).is_err());
    }

    #[test]
    fn arity_checks() {
        assert!(Arity::Exact(2).check(2));
        assert!(!Arity::Exact(2).check(1));
        assert!(Arity::AtLeast(1).check(4));
        assert!(!Arity::AtLeast(1).check(0));
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1");
    }
}
