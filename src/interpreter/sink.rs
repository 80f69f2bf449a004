use log::{debug, warn};

use crate::interpreter::value::core::Value;

/// Receives the output of a run.
///
/// `log` is called once per printed value in call order; `error` at most once
/// per run, with the message of the error that stopped it.
pub trait Sink {
    /// Records a printed value.
    fn log(&mut self, value: &Value);

    /// Records the message of a fatal error.
    fn error(&mut self, message: &str);
}

/// A sink that keeps everything it receives for the host to render.
///
/// # Example
/// ```
/// use minimatica::interpreter::sink::Console;
///
/// let mut console = Console::new();
/// assert!(minimatica::run("print(fact(5));", &mut console));
/// assert_eq!(console.logs()[0].to_string(), "120");
/// assert!(console.errors().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Console {
    logs:   Vec<Value>,
    errors: Vec<String>,
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values logged so far, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[Value] {
        &self.logs
    }

    /// Error messages reported so far, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Empties both lists. Hosts call this before reusing the console.
    pub fn clear(&mut self) {
        self.logs.clear();
        self.errors.clear();
    }
}

impl Sink for Console {
    fn log(&mut self, value: &Value) {
        debug!("log: {value}");
        self.logs.push(value.clone());
    }

    fn error(&mut self, message: &str) {
        warn!("{message}");
        self.errors.push(message.to_string());
    }
}
