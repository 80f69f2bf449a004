use thiserror::Error;

use crate::{error::ErrorKind, util::num::MAX_DEGREE};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Tried to use a name that is not bound in the environment.
    #[error("\"{name}\" is not defined. [Line {line}]")]
    UndefinedIdentifier {
        /// The name that was looked up.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to read a name that is declared but holds no value yet.
    #[error("\"{name}\" is declared but has no value. [Line {line}]")]
    UnboundIdentifier {
        /// The declared name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `var` statement named an identifier that already exists.
    #[error("Redefinition of variable \"{name}\". [Line {line}]")]
    Redefinition {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Call syntax was applied to a value that cannot be invoked.
    #[error("\"{name}\" is not callable. [Line {line}]")]
    NotCallable {
        /// The name of the value.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A lambda body used a name outside its capture list as its variable.
    #[error("Variable \"{name}\" is not captured. [Line {line}]")]
    NotCaptured {
        /// The uncaptured name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A lambda body used two different captured names as its variable.
    #[error("Polynomial in \"{expected}\" cannot use \"{found}\" as a variable. [Line {line}]")]
    MixedVariables {
        /// The variable the polynomial was started with.
        expected: String,
        /// The other captured name.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A polynomial term had a negative or fractional exponent.
    #[error("The minimum degree for polynomials is 0 and degrees must be whole, found {exponent}. [Line {line}]")]
    InvalidExponent {
        /// The evaluated exponent.
        exponent: f64,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A polynomial would grow past the supported degree.
    #[error("Polynomials are limited to degree {}, found {degree}. [Line {line}]", MAX_DEGREE)]
    DegreeLimit {
        /// The degree the operation would have produced.
        degree: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Matrix operands had incompatible shapes.
    #[error("Dimension mismatch: {details}. [Line {line}]")]
    DimensionMismatch {
        /// Details about the shapes involved.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Dimensions passed to a constructor were missing or invalid.
    #[error("Invalid dimensions: {details}. [Line {line}]")]
    InvalidDimensions {
        /// Details about the rejected dimensions.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a callable.
    #[error("\"{name}\" expects {expected} argument(s) but received {found}. [Line {line}]")]
    ArgumentCountMismatch {
        /// The callable that was invoked.
        name:     String,
        /// A description of the accepted count.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operation was applied to a value type that does not offer it.
    #[error("Type error: {details}. [Line {line}]")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An argument had the right type but an unusable value.
    #[error("Invalid argument: {details}. [Line {line}]")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns the category this error is reported under.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedIdentifier { .. }
            | Self::UnboundIdentifier { .. }
            | Self::Redefinition { .. }
            | Self::NotCallable { .. } => ErrorKind::Name,
            Self::NotCaptured { .. } | Self::MixedVariables { .. } => ErrorKind::Capture,
            Self::InvalidExponent { .. }
            | Self::DegreeLimit { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidDimensions { .. }
            | Self::ArgumentCountMismatch { .. }
            | Self::TypeError { .. }
            | Self::InvalidArgument { .. } => ErrorKind::Domain,
        }
    }

    /// Returns the source line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedIdentifier { line, .. }
            | Self::UnboundIdentifier { line, .. }
            | Self::Redefinition { line, .. }
            | Self::NotCallable { line, .. }
            | Self::NotCaptured { line, .. }
            | Self::MixedVariables { line, .. }
            | Self::InvalidExponent { line, .. }
            | Self::DegreeLimit { line, .. }
            | Self::DimensionMismatch { line, .. }
            | Self::InvalidDimensions { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::TypeError { line, .. }
            | Self::InvalidArgument { line, .. } => *line,
        }
    }
}
