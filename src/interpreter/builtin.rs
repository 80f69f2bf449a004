/// Algebra builtins.
///
/// Implements `derive`, `integrate`, `fact`, `binomial`, `pow` and the
/// rounding family. Operations that accept more than numbers dispatch on the
/// type of their first argument.
pub mod algebra;
/// Arithmetic operator dispatch.
///
/// Resolves `+ - * / %` for every pair of operand types. Two numbers use
/// native floating-point arithmetic; otherwise the left operand's type
/// decides which operations exist.
pub mod arithmetic;
/// The builtin registry.
///
/// Declares every native operation with its arity, grouped the way they are
/// presented to users, and loads them into a fresh environment.
pub mod core;
/// The `print` builtin.
pub mod print;
/// Trigonometric builtins working in degrees.
pub mod trigonometry;
