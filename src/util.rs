/// Numeric conversion helpers.
///
/// This module provides checked conversions from the interpreter's `f64`
/// numbers to the whole numbers used for exponents, dimensions and counts,
/// and the decimal rounding used by the trigonometric builtins.
pub mod num;
