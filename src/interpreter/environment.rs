use std::collections::HashMap;

use crate::interpreter::{builtin, value::core::Value};

/// A name-to-value binding scope.
///
/// A name is either absent, declared without a value, or bound. Lambda
/// literals evaluate their body in a clone of the ambient environment with
/// the captured names declared, so the clone must never share state with
/// its source.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Option<Value>>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the scope a program runs in, holding every builtin and the
    /// constants `e` and `pi`.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::environment::Environment;
    ///
    /// let env = Environment::preloaded();
    /// assert!(env.contains("print"));
    /// assert!(env.contains("pi"));
    /// ```
    #[must_use]
    pub fn preloaded() -> Self {
        let mut env = Self::new();
        builtin::core::preload(&mut env);
        env
    }

    /// Returns `true` if the name is declared or bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Returns the bound value, or `None` if the name is absent or unbound.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).and_then(Option::as_ref)
    }

    /// Returns `true` if the name is declared but holds no value.
    #[must_use]
    pub fn is_unbound(&self, name: &str) -> bool {
        matches!(self.bindings.get(name), Some(None))
    }

    /// Declares a name without a value, replacing any previous binding.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.bindings.insert(name.into(), None);
    }

    /// Binds a value, replacing any previous binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), Some(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_and_define() {
        let mut env = Environment::new();
        assert!(!env.contains("x"));

        env.declare("x");
        assert!(env.contains("x"));
        assert!(env.is_unbound("x"));
        assert_eq!(env.value_of("x"), None);

        env.define("x", Value::Number(2.0));
        assert!(!env.is_unbound("x"));
        assert_eq!(env.value_of("x"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn clones_are_isolated() {
        let mut outer = Environment::new();
        outer.define("a", Value::Number(1.0));

        let mut inner = outer.clone();
        inner.declare("a");
        inner.define("b", Value::Number(2.0));

        assert_eq!(outer.value_of("a"), Some(&Value::Number(1.0)));
        assert!(!outer.contains("b"));
        assert!(inner.is_unbound("a"));
    }

    #[test]
    fn preloaded_holds_constants() {
        let env = Environment::preloaded();
        assert_eq!(env.value_of("pi"), Some(&Value::Number(std::f64::consts::PI)));
        assert_eq!(env.value_of("e"), Some(&Value::Number(std::f64::consts::E)));
        for name in ["print", "derive", "integrate", "fact", "binomial", "mat", "vec"] {
            assert!(env.contains(name), "{name} is missing");
        }
    }
}
