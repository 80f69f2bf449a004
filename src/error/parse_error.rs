use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no token, including a `:` without `=`.
    #[error("Unexpected character '{found}' at column {column} [Line {line}]")]
    UnexpectedCharacter {
        /// The offending character.
        found:  char,
        /// The source line where the character was read.
        line:   usize,
        /// The column where the character was read.
        column: usize,
    },
    /// Found a token the grammar does not allow at this point.
    #[error("Unexpected token \"{found}\", expected {expected} [Line {line}]")]
    UnexpectedToken {
        /// The token encountered.
        found:    String,
        /// What the grammar required instead.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The scanner accepted a number literal that does not convert to `f64`.
    #[error("Scanned value \"{literal}\" is not a number [Line {line}]")]
    MalformedNumber {
        /// The literal buffer contents.
        literal: String,
        /// The source line where the literal was read.
        line:    usize,
    },
}

impl ParseError {
    /// Returns the category this error is reported under.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedCharacter { .. } => ErrorKind::Lexical,
            Self::UnexpectedToken { .. } => ErrorKind::Syntax,
            Self::MalformedNumber { .. } => ErrorKind::Internal,
        }
    }

    /// Returns the source line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::MalformedNumber { line, .. } => *line,
        }
    }
}
