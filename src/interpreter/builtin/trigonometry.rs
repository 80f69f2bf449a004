use crate::{
    interpreter::value::core::{EvalResult, Value},
    util::num::round_to_decimals,
};

/// Number of decimals trigonometric results are rounded to.
///
/// Rounding hides the floating-point noise of degree conversion, so
/// `cos(90)` is exactly `0` and `tan(45)` exactly `1`.
pub const TRIG_DECIMALS: i32 = 10;

/// Generates a builtin that takes an angle in degrees and applies the
/// matching `f64` method to it in radians.
///
/// The generated functions expect exactly one number.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A `Value::Number` rounded to [`TRIG_DECIMALS`] decimals.
///
/// # Example
/// ```
/// use minimatica::interpreter::{builtin::trigonometry::cos, value::core::Value};
///
/// assert_eq!(cos(&[Value::Number(90.0)], 1).unwrap(), Value::Number(0.0));
/// ```
macro_rules! degree_builtin {
    ($fname:ident) => {
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            let degrees = args[0].as_number(line)?;
            Ok(Value::Number(round_to_decimals(degrees.to_radians().$fname(), TRIG_DECIMALS)))
        }
    };
}

degree_builtin!(sin);
degree_builtin!(cos);
degree_builtin!(tan);

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(f: fn(&[Value], usize) -> EvalResult<Value>, degrees: f64) -> f64 {
        f(&[Value::Number(degrees)], 1).unwrap().as_number(1).unwrap()
    }

    #[test]
    fn exact_at_landmark_angles() {
        assert_eq!(eval(cos, 90.0), 0.0);
        assert_eq!(eval(sin, 0.0), 0.0);
        assert_eq!(eval(tan, 45.0), 1.0);
        assert_eq!(eval(sin, 30.0), 0.5);
        assert_eq!(eval(cos, 180.0), -1.0);
    }

    #[test]
    fn rejects_non_numbers() {
        let m = crate::interpreter::value::matrix::Matrix::identity(1);
        assert!(sin(&[Value::from(m)], 1).is_err());
    }
}
