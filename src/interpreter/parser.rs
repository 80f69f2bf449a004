/// Parser state and statement-level rules.
///
/// Holds the `Parser` type, the program loop and the helpers shared by all
/// rules for consuming expected tokens and reporting unexpected ones.
pub mod core;

/// Expression rules.
///
/// Evaluates terms, operators, literals, identifier lookups, reassignments
/// and calls, including the generic arguments of dimensioned constructors.
pub mod expression;

/// Lambda literals.
///
/// Evaluates `[captures] -> polynomial` into a `Function`, enforcing that the
/// body uses exactly one captured name as its variable.
pub mod lambda;
