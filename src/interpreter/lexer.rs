use std::fmt;

use log::{debug, trace};
use logos::Logos;

use crate::error::ParseError;

/// The character reported once the scanner has moved past the end of the
/// source text.
pub const END_OF_FILE: char = '\0';

/// Lexemes recognised by the generated automaton.
///
/// Whitespace and comments never reach the automaton: the [`Scanner`] skips
/// them character by character so that its [`Position`] stays exact. Each
/// call classifies exactly one lexeme at the start of the remaining text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[token("var")]
    Var,
    #[token(":=")]
    Assign,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,
    #[token("[")]
    CaptureBegin,
    #[token("]")]
    CaptureEnd,
    #[token("<")]
    GenericBegin,
    #[token(">")]
    GenericEnd,
    #[token(";")]
    Terminator,
    #[token("->")]
    Arrow,
    #[token("^")]
    Caret,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
}

/// Represents a lexical token in the source input.
///
/// Identifiers and numbers carry their source text; numbers are converted to
/// `f64` only when the parser asks for them through [`Scanner::number`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `var`
    Var,
    /// `:=`
    Assign,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `[`
    CaptureBegin,
    /// `]`
    CaptureEnd,
    /// `<`
    GenericBegin,
    /// `>`
    GenericEnd,
    /// `;`
    Terminator,
    /// `->`
    Arrow,
    /// `^`
    Caret,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// Names such as `x`, `pi` or `mat`.
    Identifier(String),
    /// Numeric literals such as `42` or `3.14`.
    Number(String),
    /// No more input.
    EndOfFile,
    /// A character that starts no token.
    Error(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Var => "var",
            Self::Assign => ":=",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::CaptureBegin => "[",
            Self::CaptureEnd => "]",
            Self::GenericBegin => "<",
            Self::GenericEnd => ">",
            Self::Terminator => ";",
            Self::Arrow => "->",
            Self::Caret => "^",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Identifier(name) => name,
            Self::Number(literal) => literal,
            Self::EndOfFile => "end of file",
            Self::Error(c) => return write!(f, "{c}"),
        };
        f.write_str(text)
    }
}

/// A location in the source text.
///
/// `offset` is a byte index into the source; `line` and `column` are
/// 1-based and count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column within the line, starting at 1.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { offset: 0,
               line:   1,
               column: 1, }
    }
}

/// Everything [`Scanner::look_ahead`] has to restore.
#[derive(Debug, Clone)]
struct ScannerState {
    current:     char,
    position:    Position,
    token:       Token,
    token_start: Position,
    literal:     String,
}

type ErrorHandler<'src> = Box<dyn FnMut(char, Position) + 'src>;

/// Reads tokens from source text on demand.
///
/// The scanner keeps the character under its caret, the [`Position`] of that
/// character, the most recently read [`Token`] and the text of the last
/// identifier or number. Tokens are produced one at a time by
/// [`read_token`](Self::read_token); [`look_ahead`](Self::look_ahead) peeks
/// at the following token without moving.
pub struct Scanner<'src> {
    source:   &'src str,
    state:    ScannerState,
    on_error: Option<ErrorHandler<'src>>,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner positioned on the first character of `source`.
    ///
    /// No token has been read yet; the current token is
    /// [`Token::EndOfFile`] until the first call to
    /// [`read_token`](Self::read_token).
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let current = source.chars().next().unwrap_or(END_OF_FILE);
        Self { source,
               state: ScannerState { current,
                                     position: Position::default(),
                                     token: Token::EndOfFile,
                                     token_start: Position::default(),
                                     literal: String::new() },
               on_error: None }
    }

    /// Installs a callback invoked with the offending character and its
    /// position whenever an [`Token::Error`] is classified.
    ///
    /// The callback also fires for errors met while looking ahead.
    #[must_use]
    pub fn on_error(mut self, handler: impl FnMut(char, Position) + 'src) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Returns `true` once every character has been consumed.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.state.position.offset >= self.source.len()
    }

    /// Consumes exactly one character and returns the new current character.
    ///
    /// Consuming a newline moves to column 1 of the next line. Past the end of
    /// the input the position stays put and [`END_OF_FILE`] is returned.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::lexer::Scanner;
    ///
    /// let mut scanner = Scanner::new("a\nb");
    /// scanner.advance();
    /// assert_eq!(scanner.advance(), 'b');
    /// assert_eq!(scanner.position().line, 2);
    /// assert_eq!(scanner.position().column, 1);
    /// ```
    pub fn advance(&mut self) -> char {
        if self.at_end() {
            self.state.current = END_OF_FILE;
            return END_OF_FILE;
        }

        let consumed = self.state.current;
        let position = &mut self.state.position;
        position.offset += consumed.len_utf8();
        if consumed == '\n' {
            position.line += 1;
            position.column = 1;
        } else {
            position.column += 1;
        }

        let offset = position.offset;
        self.state.current = self.source[offset..].chars().next().unwrap_or(END_OF_FILE);
        self.state.current
    }

    /// Reads the next token, making it the current one.
    ///
    /// Spaces, tabs and newlines are skipped. `#` starts a comment running to
    /// the end of the line; comments are skipped along with the whitespace,
    /// so no comment token is ever produced.
    pub fn read_token(&mut self) {
        self.skip_trivia();

        self.state.token_start = self.state.position;

        if self.at_end() {
            self.state.token = Token::EndOfFile;
            return;
        }

        let source = self.source;
        let rest = &source[self.state.position.offset..];
        let mut lexer = Lexeme::lexer(rest);

        self.state.token = match lexer.next() {
            Some(Ok(lexeme)) => {
                let slice = lexer.slice();
                for _ in slice.chars() {
                    self.advance();
                }
                self.classify(lexeme, slice)
            },
            _ => {
                let found = self.state.current;
                let at = self.state.token_start;
                self.advance();
                debug!("lexical error: unexpected '{found}' at {}:{}", at.line, at.column);
                if let Some(handler) = self.on_error.as_mut() {
                    handler(found, at);
                }
                Token::Error(found)
            },
        };

        trace!("token {:?} at {}:{}",
               self.state.token,
               self.state.token_start.line,
               self.state.token_start.column);
    }

    /// Moves past any run of whitespace and comments.
    fn skip_trivia(&mut self) {
        while !self.at_end() {
            match self.state.current {
                ' ' | '\t' | '\n' | '\r' => {
                    self.advance();
                },
                '#' => {
                    while !self.at_end() && self.state.current != '\n' {
                        self.advance();
                    }
                },
                _ => return,
            }
        }
    }

    /// Returns the token [`read_token`](Self::read_token) would produce next,
    /// leaving the scanner exactly as it was.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::lexer::{Scanner, Token};
    ///
    /// let mut scanner = Scanner::new("x := 1");
    /// scanner.read_token();
    /// assert_eq!(scanner.look_ahead(), Token::Assign);
    /// assert_eq!(scanner.look_ahead(), Token::Assign);
    /// assert_eq!(scanner.token(), &Token::Identifier("x".to_string()));
    /// ```
    pub fn look_ahead(&mut self) -> Token {
        let saved = self.state.clone();
        self.read_token();
        let next = std::mem::replace(&mut self.state, saved);
        next.token
    }

    /// The most recently read token.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.state.token
    }

    /// Where the most recently read token starts.
    #[must_use]
    pub const fn token_position(&self) -> Position {
        self.state.token_start
    }

    /// The line of the most recently read token.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.state.token_start.line
    }

    /// The position of the character under the caret.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.state.position
    }

    /// The character under the caret.
    #[must_use]
    pub const fn current_char(&self) -> char {
        self.state.current
    }

    /// The text of the most recently read identifier or number.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.state.literal
    }

    /// Converts the literal buffer to a number.
    ///
    /// The scanner only ever fills the buffer with `digits ('.' digits)?`, so
    /// a failure here is a fault in the scanner rather than in the program.
    pub fn number(&self) -> Result<f64, ParseError> {
        self.state
            .literal
            .parse()
            .map_err(|_| ParseError::MalformedNumber { literal: self.state.literal.clone(),
                                                       line:    self.line(), })
    }

    fn classify(&mut self, lexeme: Lexeme, slice: &str) -> Token {
        match lexeme {
            Lexeme::Var => Token::Var,
            Lexeme::Assign => Token::Assign,
            Lexeme::LeftParen => Token::LeftParen,
            Lexeme::RightParen => Token::RightParen,
            Lexeme::Comma => Token::Comma,
            Lexeme::CaptureBegin => Token::CaptureBegin,
            Lexeme::CaptureEnd => Token::CaptureEnd,
            Lexeme::GenericBegin => Token::GenericBegin,
            Lexeme::GenericEnd => Token::GenericEnd,
            Lexeme::Terminator => Token::Terminator,
            Lexeme::Arrow => Token::Arrow,
            Lexeme::Caret => Token::Caret,
            Lexeme::Plus => Token::Plus,
            Lexeme::Minus => Token::Minus,
            Lexeme::Star => Token::Star,
            Lexeme::Slash => Token::Slash,
            Lexeme::Percent => Token::Percent,
            Lexeme::Identifier => {
                self.state.literal = slice.to_string();
                Token::Identifier(slice.to_string())
            },
            Lexeme::Number => {
                self.state.literal = slice.to_string();
                Token::Number(slice.to_string())
            },
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Reads tokens until the end of the input; [`Token::EndOfFile`] is not
    /// yielded.
    fn next(&mut self) -> Option<Token> {
        self.read_token();
        match self.token() {
            Token::EndOfFile => None,
            token => Some(token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Scanner::new(source).collect()
    }

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    fn num(text: &str) -> Token {
        Token::Number(text.to_string())
    }

    #[test]
    fn classifies_declaration() {
        assert_eq!(tokens("var x := 1.5;"),
                   vec![Token::Var, ident("x"), Token::Assign, num("1.5"), Token::Terminator]);
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        assert_eq!(tokens("variable var_1 var"),
                   vec![ident("variable"), ident("var_1"), Token::Var]);
    }

    #[test]
    fn arrow_and_minus_are_distinguished() {
        assert_eq!(tokens("[x] -> -x"),
                   vec![Token::CaptureBegin,
                        ident("x"),
                        Token::CaptureEnd,
                        Token::Arrow,
                        Token::Minus,
                        ident("x")]);
    }

    #[test]
    fn operators_and_generics() {
        assert_eq!(tokens("mat<2,1>(a^b+c*d/e%f)"),
                   vec![ident("mat"),
                        Token::GenericBegin,
                        num("2"),
                        Token::Comma,
                        num("1"),
                        Token::GenericEnd,
                        Token::LeftParen,
                        ident("a"),
                        Token::Caret,
                        ident("b"),
                        Token::Plus,
                        ident("c"),
                        Token::Star,
                        ident("d"),
                        Token::Slash,
                        ident("e"),
                        Token::Percent,
                        ident("f"),
                        Token::RightParen]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(tokens("# header\n1; # trailing\n# last line"),
                   vec![num("1"), Token::Terminator]);
    }

    #[test]
    fn lone_colon_is_an_error() {
        assert_eq!(tokens(": ="), vec![Token::Error(':'), Token::Error('=')]);
    }

    #[test]
    fn error_callback_receives_character_and_position() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut scanner =
            Scanner::new("1;\n  $").on_error(move |c, at| sink.borrow_mut().push((c, at.line, at.column)));

        while !matches!(scanner.token(), Token::Error(_)) {
            scanner.read_token();
        }

        assert_eq!(*seen.borrow(), vec![('$', 2, 3)]);
    }

    #[test]
    fn newline_resets_column_and_increments_line() {
        let mut scanner = Scanner::new("ab\ncd");
        assert_eq!(scanner.position().line, 1);
        scanner.advance();
        scanner.advance();
        assert_eq!(scanner.position().column, 3);
        assert_eq!(scanner.current_char(), '\n');

        assert_eq!(scanner.advance(), 'c');
        assert_eq!(scanner.position().line, 2);
        assert_eq!(scanner.position().column, 1);
    }

    #[test]
    fn advance_past_end_returns_sentinel() {
        let mut scanner = Scanner::new("a");
        assert_eq!(scanner.advance(), END_OF_FILE);
        assert_eq!(scanner.advance(), END_OF_FILE);
        assert_eq!(scanner.position().offset, 1);
    }

    #[test]
    fn look_ahead_has_no_side_effects() {
        let mut scanner = Scanner::new("f(2)");
        scanner.read_token();
        let before = scanner.position();

        assert_eq!(scanner.look_ahead(), Token::LeftParen);
        assert_eq!(scanner.look_ahead(), Token::LeftParen);
        assert_eq!(scanner.position(), before);
        assert_eq!(scanner.literal(), "f");
        assert_eq!(scanner.token(), &ident("f"));

        scanner.read_token();
        assert_eq!(scanner.token(), &Token::LeftParen);
    }

    #[test]
    fn token_position_tracks_lines() {
        let mut scanner = Scanner::new("1;\n\n  x");
        scanner.read_token();
        scanner.read_token();
        scanner.read_token();
        assert_eq!(scanner.token(), &ident("x"));
        assert_eq!(scanner.token_position().line, 3);
        assert_eq!(scanner.token_position().column, 3);
    }

    #[test]
    fn numbers_convert_on_demand() {
        let mut scanner = Scanner::new("12.25");
        scanner.read_token();
        assert_eq!(scanner.number(), Ok(12.25));
    }

    #[test]
    fn long_comment_runs_are_skipped() {
        let source = "# note\n".repeat(10_000) + "x # trailing\n# last";
        let mut scanner = Scanner::new(&source);
        scanner.read_token();
        assert_eq!(scanner.token(), &ident("x"));
        assert_eq!(scanner.line(), 10_001);
        scanner.read_token();
        assert_eq!(scanner.token(), &Token::EndOfFile);
    }
}
