use log::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        builtin::arithmetic::{self, Operator},
        environment::Environment,
        lexer::Token,
        parser::core::{InterpretResult, Parser},
        value::core::Value,
    },
};

/// Resolves a name to its value.
///
/// # Errors
/// - `UnboundIdentifier` if the name is declared without a value, which
///   happens to captured names inside a lambda body.
/// - `UndefinedIdentifier` if the name does not exist.
pub(in crate::interpreter::parser) fn lookup(env: &Environment,
                                             name: &str,
                                             line: usize)
                                             -> Result<Value, RuntimeError> {
    match env.value_of(name) {
        Some(value) => Ok(value.clone()),
        None if env.is_unbound(name) => Err(RuntimeError::UnboundIdentifier { name: name.to_string(),
                                                                               line }),
        None => Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                        line }),
    }
}

impl Parser<'_, '_> {
    /// Evaluates an expression.
    ///
    /// Grammar:
    /// ```text
    /// expression := '[' captures ']' '->' polynomial
    ///             | IDENT ':=' expression
    ///             | term
    /// ```
    /// A reassignment needs the name to exist already and yields the new
    /// value.
    pub(in crate::interpreter::parser) fn expression(&mut self,
                                                     env: &mut Environment)
                                                     -> InterpretResult<Value> {
        if *self.scanner.token() == Token::CaptureBegin {
            return self.lambda(env);
        }
        if matches!(self.scanner.token(), Token::Identifier(_))
           && self.scanner.look_ahead() == Token::Assign
        {
            return self.reassignment(env);
        }
        self.term(env)
    }

    fn reassignment(&mut self, env: &mut Environment) -> InterpretResult<Value> {
        let line = self.scanner.line();
        let name = self.identifier()?;
        if !env.contains(&name) {
            return Err(RuntimeError::UndefinedIdentifier { name, line }.into());
        }

        self.expect(&Token::Assign, "\":=\"")?;
        let value = self.expression(env)?;
        debug!("{name} := {value}");
        env.define(name, value.clone());
        Ok(value)
    }

    /// The operator under the scanner, if it is one of `accepted`.
    pub(in crate::interpreter::parser) fn operator(&self, accepted: &[Operator]) -> Option<Operator> {
        Operator::from_token(self.scanner.token()).filter(|op| accepted.contains(op))
    }

    /// Grammar: `term := additive (('+'|'-') additive)*`
    pub(in crate::interpreter::parser) fn term(&mut self,
                                               env: &mut Environment)
                                               -> InterpretResult<Value> {
        let mut value = self.additive(env)?;
        while let Some(op) = self.operator(&[Operator::Add, Operator::Subtract]) {
            let line = self.scanner.line();
            self.scanner.read_token();
            let rhs = self.additive(env)?;
            value = arithmetic::apply(op, &value, &rhs, line)?;
        }
        Ok(value)
    }

    /// Grammar: `additive := multiplicative (('*'|'/'|'%') multiplicative)*`
    fn additive(&mut self, env: &mut Environment) -> InterpretResult<Value> {
        let mut value = self.multiplicative(env)?;
        while let Some(op) = self.operator(&[Operator::Multiply, Operator::Divide, Operator::Modulo]) {
            let line = self.scanner.line();
            self.scanner.read_token();
            let rhs = self.multiplicative(env)?;
            value = arithmetic::apply(op, &value, &rhs, line)?;
        }
        Ok(value)
    }

    /// Evaluates a single operand.
    ///
    /// Grammar:
    /// ```text
    /// multiplicative := signed-number
    ///                 | IDENT ['<' generics '>'] '(' arguments ')'
    ///                 | IDENT
    ///                 | '(' expression ')'
    /// ```
    pub(in crate::interpreter::parser) fn multiplicative(&mut self,
                                                         env: &mut Environment)
                                                         -> InterpretResult<Value> {
        match self.scanner.token() {
            Token::Number(_) | Token::Minus => Ok(Value::Number(self.signed_number()?)),
            Token::Identifier(name) => {
                let name = name.clone();
                if matches!(self.scanner.look_ahead(), Token::LeftParen | Token::GenericBegin) {
                    return self.call(env);
                }
                let line = self.scanner.line();
                self.scanner.read_token();
                Ok(lookup(env, &name, line)?)
            },
            Token::LeftParen => {
                self.scanner.read_token();
                let value = self.expression(env)?;
                self.expect(&Token::RightParen, "\")\"")?;
                Ok(value)
            },
            _ => Err(self.unexpected("a number, an identifier or \"(\"")),
        }
    }

    /// Grammar: `signed-number := ['-'] NUMBER`
    fn signed_number(&mut self) -> InterpretResult<f64> {
        let negative = *self.scanner.token() == Token::Minus;
        if negative {
            self.scanner.read_token();
        }
        if !matches!(self.scanner.token(), Token::Number(_)) {
            return Err(self.unexpected("a number"));
        }
        let value = self.scanner.number()?;
        self.scanner.read_token();
        Ok(if negative { -value } else { value })
    }

    /// Evaluates a call.
    ///
    /// Generic arguments, if present, specialize the callable before the
    /// positional arguments are evaluated left to right.
    fn call(&mut self, env: &mut Environment) -> InterpretResult<Value> {
        let line = self.scanner.line();
        let name = self.identifier()?;
        let target = lookup(env, &name, line)?;
        let Some(mut callable) = target.as_callable() else {
            return Err(RuntimeError::NotCallable { name, line }.into());
        };

        if *self.scanner.token() == Token::GenericBegin {
            self.scanner.read_token();
            let generics =
                self.comma_separated(&Token::GenericEnd, "\",\" or \">\"", Self::signed_number)?;
            callable = callable.specialize(&generics, line)?;
        }

        self.expect(&Token::LeftParen, "\"(\"")?;
        let args =
            self.comma_separated(&Token::RightParen, "\",\" or \")\"", |p| p.expression(env))?;

        debug!("call {name} with {} argument(s)", args.len());
        Ok(callable.invoke(&args, &mut *self.sink, line)?)
    }
}
