use log::{debug, warn};

use crate::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        environment::Environment,
        lexer::{Scanner, Token},
        sink::Sink,
    },
};

pub type InterpretResult<T> = Result<T, Error>;

/// A single-pass parser that evaluates while it reads.
///
/// Every rule starts on the current token of its scanner and leaves the
/// scanner on the first token after the text it matched. There is no syntax
/// tree: rules return values and mutate the [`Environment`] directly, and the
/// first error ends the run.
pub struct Parser<'src, 'sink> {
    pub(in crate::interpreter::parser) scanner: Scanner<'src>,
    pub(in crate::interpreter::parser) sink:    &'sink mut dyn Sink,
}

impl<'src, 'sink> Parser<'src, 'sink> {
    /// Creates a parser over `source` that writes output to `sink`.
    pub fn new(source: &'src str, sink: &'sink mut dyn Sink) -> Self {
        let scanner = Scanner::new(source).on_error(|found, at| {
                                               warn!("unexpected character '{found}' at {}:{}",
                                                     at.line, at.column);
                                           });
        Self { scanner, sink }
    }

    /// Runs every statement of the program against `env`.
    ///
    /// Grammar: `program := (statement ';')* EOF`
    ///
    /// # Errors
    /// Returns the first lexical, syntax or runtime error. Statements after
    /// the failing one are never evaluated.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::{
    ///     environment::Environment, parser::core::Parser, sink::Console, value::core::Value,
    /// };
    ///
    /// let mut env = Environment::preloaded();
    /// let mut console = Console::new();
    /// Parser::new("var x := 2 * 3;", &mut console).program(&mut env).unwrap();
    ///
    /// assert_eq!(env.value_of("x"), Some(&Value::Number(6.0)));
    /// ```
    pub fn program(&mut self, env: &mut Environment) -> InterpretResult<()> {
        self.scanner.read_token();
        while *self.scanner.token() != Token::EndOfFile {
            debug!("statement at line {}", self.scanner.line());
            self.statement(env)?;
            self.expect(&Token::Terminator, "\";\"")?;
        }
        Ok(())
    }

    /// Grammar: `statement := 'var' IDENT ':=' expression | expression`
    ///
    /// A declaration fails if the name already exists. The value of a bare
    /// expression is discarded.
    fn statement(&mut self, env: &mut Environment) -> InterpretResult<()> {
        if *self.scanner.token() != Token::Var {
            self.expression(env)?;
            return Ok(());
        }

        self.scanner.read_token();
        let line = self.scanner.line();
        let name = self.identifier()?;
        if env.contains(&name) {
            return Err(RuntimeError::Redefinition { name, line }.into());
        }

        self.expect(&Token::Assign, "\":=\"")?;
        let value = self.expression(env)?;
        debug!("var {name} := {value}");
        env.define(name, value);
        Ok(())
    }

    /// Consumes an identifier and returns its name.
    pub(in crate::interpreter::parser) fn identifier(&mut self) -> InterpretResult<String> {
        let Token::Identifier(name) = self.scanner.token() else {
            return Err(self.unexpected("an identifier"));
        };
        let name = name.clone();
        self.scanner.read_token();
        Ok(name)
    }

    /// Consumes `token`, or fails naming what was `expected`.
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 token: &Token,
                                                 expected: &'static str)
                                                 -> InterpretResult<()> {
        if self.scanner.token() != token {
            return Err(self.unexpected(expected));
        }
        self.scanner.read_token();
        Ok(())
    }

    /// Parses `item (',' item)* closing`, or just `closing`.
    ///
    /// The scanner must be positioned after the opening delimiter.
    ///
    /// # Parameters
    /// - `closing`: The token that ends the list.
    /// - `expected`: Description used when neither a comma nor `closing`
    ///   follows an item.
    /// - `item`: Parses one element.
    pub(in crate::interpreter::parser) fn comma_separated<T>(
        &mut self,
        closing: &Token,
        expected: &'static str,
        mut item: impl FnMut(&mut Self) -> InterpretResult<T>)
        -> InterpretResult<Vec<T>> {
        let mut items = Vec::new();
        if self.scanner.token() == closing {
            self.scanner.read_token();
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if *self.scanner.token() == Token::Comma {
                self.scanner.read_token();
                continue;
            }
            self.expect(closing, expected)?;
            return Ok(items);
        }
    }

    /// Builds the error for the current token when the grammar wanted
    /// something else.
    ///
    /// A [`Token::Error`] becomes a lexical error pointing at the character;
    /// anything else is a syntax error.
    pub(in crate::interpreter::parser) fn unexpected(&self, expected: &'static str) -> Error {
        match self.scanner.token() {
            Token::Error(found) => {
                let at = self.scanner.token_position();
                ParseError::UnexpectedCharacter { found:  *found,
                                                  line:   at.line,
                                                  column: at.column, }.into()
            },
            token => ParseError::UnexpectedToken { found: token.to_string(),
                                                   expected,
                                                   line: self.scanner.line() }.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        interpreter::{sink::Console, value::core::Value},
    };

    fn run(source: &str) -> (Environment, InterpretResult<()>, Console) {
        let mut env = Environment::preloaded();
        let mut console = Console::new();
        let result = Parser::new(source, &mut console).program(&mut env);
        (env, result, console)
    }

    #[test]
    fn empty_program_succeeds() {
        let (_, result, console) = run("  # nothing here\n");
        assert!(result.is_ok());
        assert!(console.logs().is_empty());
    }

    #[test]
    fn declarations_bind_values() {
        let (env, result, _) = run("var a := 1;\nvar b := a + 1;");
        result.unwrap();
        assert_eq!(env.value_of("b"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn redefinition_stops_the_run() {
        let (env, result, console) = run("var x := 1; var x := 2; print(x);");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);
        assert!(console.logs().is_empty());
        assert_eq!(env.value_of("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn builtins_cannot_be_redeclared() {
        let (_, result, _) = run("var pi := 3;");
        assert!(matches!(result, Err(Error::Runtime(RuntimeError::Redefinition { .. }))));
    }

    #[test]
    fn missing_terminator_is_a_syntax_error() {
        let (_, result, _) = run("var x := 1");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.to_string(), "Unexpected token \"end of file\", expected \";\" [Line 1]");
    }

    #[test]
    fn stray_colon_is_a_lexical_error() {
        let (_, result, _) = run("var x : = 1;");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err,
                   Error::from(ParseError::UnexpectedCharacter { found:  ':',
                                                                 line:   1,
                                                                 column: 7, }));
    }

    #[test]
    fn errors_report_their_line() {
        let (_, result, _) = run("var a := 1;\n\nvar b := a + c;");
        assert_eq!(result.unwrap_err().line(), 3);
    }
}
