//! # minimatica
//!
//! minimatica is an embeddable interpreter for a small language of numbers,
//! polynomial functions and matrices. Programs are evaluated in a single pass
//! while they are parsed; printed values and errors go to a [`Sink`] supplied
//! by the host.
//!
//! ```
//! use minimatica::interpreter::sink::Console;
//!
//! let mut console = Console::new();
//! let ok = minimatica::run("var f := [x] -> 3x^(2) - 2x + 1;\nprint(derive(f), f(2));",
//!                          &mut console);
//!
//! assert!(ok);
//! assert_eq!(console.logs()[0].to_string(), "f(x)=+6x-2");
//! assert_eq!(console.logs()[1].to_string(), "9");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::warn;

use crate::{
    error::Error,
    interpreter::{environment::Environment, parser::core::Parser, sink::Sink},
};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while scanning, parsing
/// or evaluating a program, and the category each one is reported under.
///
/// # Responsibilities
/// - Defines error enums for every failure mode.
/// - Attaches line numbers to every error.
/// - Formats messages the way hosts show them to users.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together scanning, parsing with evaluation, values, the
/// builtin registry and output sinks.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
pub mod util;

/// Runs a program and returns the environment it leaves behind.
///
/// The program starts in a fresh environment holding every builtin. Values
/// passed to `print` go to `sink`; errors are returned, not reported.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error.
///
/// # Examples
/// ```
/// use minimatica::{error::ErrorKind, interpret, interpreter::sink::Console};
///
/// let mut console = Console::new();
/// let env = interpret("var n := fact(5);", &mut console).unwrap();
/// assert_eq!(env.value_of("n").unwrap().to_string(), "120");
///
/// let err = interpret("y + 1;", &mut console).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Name);
/// ```
pub fn interpret(source: &str, sink: &mut dyn Sink) -> Result<Environment, Error> {
    let mut env = Environment::preloaded();
    Parser::new(source, sink).program(&mut env)?;
    Ok(env)
}

/// Runs a program, reporting any error to the sink.
///
/// At most one error is reported, as `"<kind>: <message>"`, after which the
/// rest of the program is skipped. Hosts reusing a sink should clear it
/// before each run.
///
/// # Returns
/// `true` if every statement ran.
///
/// # Examples
/// ```
/// use minimatica::{interpreter::sink::Console, run};
///
/// let mut console = Console::new();
/// assert!(!run("var x := 1; var x := 2; print(x);", &mut console));
/// assert!(console.logs().is_empty());
/// assert_eq!(console.errors(),
///            &["NameError: Redefinition of variable \"x\". [Line 1]".to_string()]);
/// ```
pub fn run(source: &str, sink: &mut dyn Sink) -> bool {
    match interpret(source, sink) {
        Ok(_) => true,
        Err(e) => {
            warn!("run stopped on line {}", e.line());
            sink.error(&format!("{}: {e}", e.kind()));
            false
        },
    }
}
