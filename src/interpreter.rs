/// The builtin registry and operator dispatch.
///
/// Declares the native operations, constructors and constants every program
/// starts with, and implements the arithmetic operators for each pair of
/// value types.
///
/// # Responsibilities
/// - Groups native operations (I/O, algebra) with their arity.
/// - Resolves `+ - * / %` between numbers, matrices and functions.
/// - Loads everything into a fresh environment.
pub mod builtin;
/// Name bindings.
///
/// The environment maps names to values. A name can also be declared without
/// a value, which is how lambda literals mark their captured variable.
pub mod environment;
/// The lexer module tokenizes source code for further parsing.
///
/// The scanner reads the raw source text and produces tokens on demand, one
/// at a time, tracking the line and column of every character. The parser
/// asks for the next token or peeks at the one after it.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Skips whitespace and `#` comments.
/// - Reports characters that start no token.
pub mod lexer;
/// The parser module evaluates programs while reading them.
///
/// There is no separate syntax tree. Each grammar rule computes its value as
/// soon as it has matched, updating the environment and writing output to a
/// sink.
///
/// # Responsibilities
/// - Validates the grammar, reporting errors with line information.
/// - Evaluates declarations, reassignments, arithmetic, calls and lambdas.
/// - Stops at the first error.
pub mod parser;
/// Output of a run.
///
/// Defines the `Sink` trait that receives printed values and error messages,
/// and `Console`, a sink that stores them for the host.
pub mod sink;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, matrices, polynomial functions and callables. This
/// module declares them along with their arithmetic and text forms.
pub mod value;
