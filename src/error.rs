/// Lexing and parsing errors.
///
/// Defines the errors raised while reading tokens and matching them against
/// the grammar: bad characters, unexpected tokens and the internal fault of a
/// number literal that cannot be converted.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while evaluating statements: unknown or
/// redefined names, lambda capture violations and domain errors such as
/// mismatched matrix dimensions or operations a value type does not support.
pub mod runtime_error;

use std::fmt;

use thiserror::Error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The user-facing category of a failure.
///
/// Every error reported to a [`Sink`](crate::interpreter::sink::Sink) belongs
/// to exactly one category. `Internal` marks implementation faults that no
/// program should be able to trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character that does not start any token, or a malformed `:=`.
    Lexical,
    /// A token that does not fit the grammar at its position.
    Syntax,
    /// An undefined, unbound, uncallable or redefined identifier.
    Name,
    /// A lambda body referencing a name that is not captured.
    Capture,
    /// A value outside the domain of an operation.
    Domain,
    /// An invariant of the interpreter itself was violated.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexical => "LexicalError",
            Self::Syntax => "SyntaxError",
            Self::Name => "NameError",
            Self::Capture => "CaptureError",
            Self::Domain => "DomainError",
            Self::Internal => "InternalError",
        };
        f.write_str(name)
    }
}

/// Any failure that aborts a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source could not be tokenized or did not match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A statement was well formed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the category this error is reported under.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }

    /// Returns the source line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }
}
