use crate::{
    error::RuntimeError,
    interpreter::{
        sink::Sink,
        value::core::{EvalResult, Value},
    },
};

/// Logs every argument to the sink and returns the last one.
///
/// Accepts one or more arguments of any type. Each is passed to
/// [`Sink::log`] separately, in order.
///
/// # Parameters
/// - `args`: The values to print.
/// - `sink`: Receives the values.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The last argument, unchanged.
///
/// # Example
/// ```
/// use minimatica::interpreter::{builtin::print::print, sink::Console, value::core::Value};
///
/// let mut console = Console::new();
/// let result = print(&[Value::Number(1.0), Value::Number(42.0)], &mut console, 1).unwrap();
///
/// assert_eq!(result, Value::Number(42.0));
/// assert_eq!(console.logs().len(), 2);
/// ```
pub fn print(args: &[Value], sink: &mut dyn Sink, line: usize) -> EvalResult<Value> {
    let Some(last) = args.last() else {
        return Err(RuntimeError::ArgumentCountMismatch { name: "print".to_string(),
                                                         expected: "at least 1".to_string(),
                                                         found: 0,
                                                         line });
    };

    for arg in args {
        sink.log(arg);
    }
    Ok(last.clone())
}
