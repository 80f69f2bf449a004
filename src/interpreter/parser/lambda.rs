use log::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        builtin::arithmetic::Operator,
        environment::Environment,
        lexer::Token,
        parser::core::{InterpretResult, Parser},
        value::{core::Value, function::Function},
    },
    util::num::{MAX_DEGREE, f64_to_usize_checked},
};

/// Collects the terms of a lambda body.
#[derive(Debug, Default)]
struct Terms {
    variable:     Option<String>,
    coefficients: Vec<f64>,
}

impl Terms {
    /// Records `name` as the body's variable. Every term must use the same
    /// one.
    fn bind(&mut self, name: &str, line: usize) -> Result<(), RuntimeError> {
        match &self.variable {
            None => {
                self.variable = Some(name.to_string());
                Ok(())
            },
            Some(expected) if expected == name => Ok(()),
            Some(expected) => Err(RuntimeError::MixedVariables { expected: expected.clone(),
                                                                 found: name.to_string(),
                                                                 line }),
        }
    }

    /// Adds `coefficient * x^exponent`; terms with equal exponents sum up.
    fn add(&mut self, coefficient: f64, exponent: usize) {
        if self.coefficients.len() <= exponent {
            self.coefficients.resize(exponent + 1, 0.0);
        }
        self.coefficients[exponent] += coefficient;
    }
}

impl Parser<'_, '_> {
    /// Evaluates a lambda literal into a [`Function`].
    ///
    /// Grammar: `lambda := '[' (IDENT (',' IDENT)*)? ']' '->' polynomial`
    ///
    /// The body is evaluated in a copy of `env` where the captured names are
    /// declared without values. The copy is dropped afterwards.
    pub(in crate::interpreter::parser) fn lambda(&mut self,
                                                 env: &Environment)
                                                 -> InterpretResult<Value> {
        let line = self.scanner.line();
        self.scanner.read_token();
        let captures =
            self.comma_separated(&Token::CaptureEnd, "\",\" or \"]\"", Self::identifier)?;
        self.expect(&Token::Arrow, "\"->\"")?;

        let mut scope = env.clone();
        for name in &captures {
            scope.declare(name.as_str());
        }

        let function = self.polynomial(&mut scope)?;
        debug!("lambda [{}] at line {line} is {function}", captures.join(", "));
        Ok(function.into())
    }

    /// Grammar: `polynomial := ['-'] component (('+'|'-') component)*`
    fn polynomial(&mut self, scope: &mut Environment) -> InterpretResult<Function> {
        let mut terms = Terms::default();

        let mut sign = 1.0;
        if *self.scanner.token() == Token::Minus {
            sign = -1.0;
            self.scanner.read_token();
        }

        loop {
            self.component(scope, &mut terms, sign)?;
            sign = match self.operator(&[Operator::Add, Operator::Subtract]) {
                Some(Operator::Add) => 1.0,
                Some(_) => -1.0,
                None => break,
            };
            self.scanner.read_token();
        }

        Ok(Function::new(terms.coefficients))
    }

    /// Evaluates one signed term.
    ///
    /// Grammar:
    /// ```text
    /// component := variable [exponent]
    ///            | coefficient [['*'] variable [exponent]]
    /// ```
    fn component(&mut self,
                 scope: &mut Environment,
                 terms: &mut Terms,
                 sign: f64)
                 -> InterpretResult<()> {
        let coefficient = if self.variable(scope)?.is_some() {
            1.0
        } else {
            self.coefficient(scope)?
        };

        match self.variable(scope)? {
            Some(name) => {
                let line = self.scanner.line();
                terms.bind(&name, line)?;
                self.scanner.read_token();
                let exponent = self.exponent(scope)?;
                terms.add(sign * coefficient, exponent);
            },
            None => terms.add(sign * coefficient, 0),
        }
        Ok(())
    }

    /// Checks whether the current token is the body's variable.
    ///
    /// Returns the name if the token is a captured identifier that is not
    /// called. Returns `None` for anything else that may be evaluated as a
    /// coefficient.
    ///
    /// # Errors
    /// `NotCaptured` if the identifier is unknown, or is known but raised to
    /// a power as if it were the variable.
    fn variable(&mut self, scope: &Environment) -> InterpretResult<Option<String>> {
        let Token::Identifier(name) = self.scanner.token() else {
            return Ok(None);
        };
        let name = name.clone();

        let next = self.scanner.look_ahead();
        if matches!(next, Token::LeftParen | Token::GenericBegin) {
            return Ok(None);
        }
        if scope.is_unbound(&name) {
            return Ok(Some(name));
        }
        if !scope.contains(&name) || next == Token::Caret {
            return Err(RuntimeError::NotCaptured { name,
                                                   line: self.scanner.line() }.into());
        }
        Ok(None)
    }

    /// Grammar: `coefficient := multiplicative (('*'|'/'|'%') multiplicative)*`
    ///
    /// A `*` followed by the variable ends the coefficient; the variable is
    /// left for the caller.
    fn coefficient(&mut self, scope: &mut Environment) -> InterpretResult<f64> {
        let mut value = self.factor(scope)?;
        while let Some(op) = self.operator(&[Operator::Multiply, Operator::Divide, Operator::Modulo]) {
            self.scanner.read_token();
            if op == Operator::Multiply && self.variable(scope)?.is_some() {
                break;
            }
            let rhs = self.factor(scope)?;
            value = op.native(value, rhs);
        }
        Ok(value)
    }

    fn factor(&mut self, scope: &mut Environment) -> InterpretResult<f64> {
        self.variable(scope)?;
        let line = self.scanner.line();
        Ok(self.multiplicative(scope)?.as_number(line)?)
    }

    /// Grammar: `exponent := '^' '(' term ')'`
    ///
    /// Without a `^` the exponent is 1. The term must be a whole,
    /// non-negative number no larger than [`MAX_DEGREE`].
    fn exponent(&mut self, scope: &mut Environment) -> InterpretResult<usize> {
        if *self.scanner.token() != Token::Caret {
            return Ok(1);
        }
        let line = self.scanner.line();
        self.scanner.read_token();
        self.expect(&Token::LeftParen, "\"(\"")?;
        let exponent = self.term(scope)?.as_number(line)?;
        self.expect(&Token::RightParen, "\")\"")?;

        let degree = f64_to_usize_checked(exponent, RuntimeError::InvalidExponent { exponent, line })?;
        if degree > MAX_DEGREE {
            return Err(RuntimeError::DegreeLimit { degree, line }.into());
        }
        Ok(degree)
    }
}
