use crate::{
    error::RuntimeError,
    interpreter::value::core::{EvalResult, Value},
    util::num::f64_to_usize_checked,
};

/// Builds the error for an operation that the argument's type does not
/// offer.
fn unsupported(name: &str, value: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("\"{name}\" is not defined for a {}", value.type_name()),
                              line }
}

/// Returns the derivative of a function.
///
/// # Example
/// ```
/// use minimatica::interpreter::{
///     builtin::algebra::derive,
///     value::{core::Value, function::Function},
/// };
///
/// let f: Value = Function::new(vec![1.0, -2.0, 3.0]).into();
/// assert_eq!(derive(&[f], 1).unwrap().to_string(), "f(x)=+6x-2");
/// ```
pub fn derive(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Function(f) => Ok(f.derive().into()),
        other => Err(unsupported("derive", other, line)),
    }
}

/// Returns the antiderivative of a function, with a constant term of 0.
pub fn integrate(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Function(f) => Ok(f.integrate(line)?.into()),
        other => Err(unsupported("integrate", other, line)),
    }
}

/// Iterative factorial: multiplies `n`, `n - 1`, ... while the factor is
/// greater than 1. Anything below 2 yields 1.
///
/// Stops as soon as the product overflows to infinity, which also ends the
/// loop for factors too large for `n - 1` to change them.
fn factorial(mut n: f64) -> f64 {
    let mut result: f64 = 1.0;
    while n > 1.0 && result.is_finite() {
        result *= n;
        n -= 1.0;
    }
    result
}

/// Computes `n!`.
///
/// # Example
/// ```
/// use minimatica::interpreter::{builtin::algebra::fact, value::core::Value};
///
/// assert_eq!(fact(&[Value::Number(5.0)], 1).unwrap(), Value::Number(120.0));
/// assert_eq!(fact(&[Value::Number(0.0)], 1).unwrap(), Value::Number(1.0));
/// ```
pub fn fact(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(factorial(args[0].as_number(line)?)))
}

/// Computes the binomial coefficient `n! / (k! * (n - k)!)`.
pub fn binomial(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = args[0].as_number(line)?;
    let k = args[1].as_number(line)?;
    Ok(Value::Number(factorial(n) / (factorial(k) * factorial(n - k))))
}

/// Raises the first argument to the power of the second.
///
/// - Numbers use `f64::powf`.
/// - Square matrices and functions accept a whole, non-negative exponent.
pub fn pow(args: &[Value], line: usize) -> EvalResult<Value> {
    let exponent = args[1].as_number(line)?;

    let whole = || {
        f64_to_usize_checked(exponent,
                             RuntimeError::InvalidArgument { details: format!("exponent {exponent} is not a whole, non-negative number"),
                                                             line })
    };

    match &args[0] {
        Value::Number(base) => Ok(Value::Number(base.powf(exponent))),
        Value::Matrix(m) => Ok(m.pow(whole()?, line)?.into()),
        Value::Function(f) => Ok(f.pow(whole()?, line)?.into()),
        other @ Value::Callable(_) => Err(unsupported("pow", other, line)),
    }
}

/// Applies a rounding or root operation to a number, or to every cell of a
/// matrix.
///
/// # Parameters
/// - `name`: One of `"sqrt"`, `"floor"`, `"ceiling"` or `"round"`.
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use minimatica::interpreter::{builtin::algebra::unary, value::core::Value};
///
/// assert_eq!(unary("ceiling", &[Value::Number(1.2)], 1).unwrap(), Value::Number(2.0));
/// assert_eq!(unary("sqrt", &[Value::Number(9.0)], 1).unwrap(), Value::Number(3.0));
/// ```
pub fn unary(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let op: fn(f64) -> f64 = match name {
        "sqrt" => f64::sqrt,
        "floor" => f64::floor,
        "ceiling" => f64::ceil,
        "round" => f64::round,
        _ => {
            return Err(RuntimeError::InvalidArgument { details: format!("unknown operation \"{name}\""),
                                                       line });
        },
    };

    match &args[0] {
        Value::Number(n) => Ok(Value::Number(op(*n))),
        Value::Matrix(m) => Ok(m.map(op).into()),
        other => Err(unsupported(name, other, line)),
    }
}
