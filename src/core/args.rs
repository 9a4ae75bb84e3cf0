//! core::args
//!
//! The argument bundle handed to executors.
//!
//! A bundle is built once per invocation by the parser and is read-only
//! afterwards. Executors read values through typed accessors that fail with
//! [`ArgumentError`] instead of panicking.

use std::collections::BTreeMap;

use thiserror::Error;

use super::error::ShellError;
use super::params::Value;
use super::tree::{CommandId, DirId};

/// Errors from typed argument access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("no argument named '{0}'")]
    Missing(String),

    #[error("argument '{name}' is a {actual}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl From<ArgumentError> for ShellError {
    fn from(err: ArgumentError) -> Self {
        ShellError::Execution(err.to_string())
    }
}

/// Parsed arguments, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

macro_rules! typed_accessor {
    ($(#[$doc:meta])* $fn:ident, $variant:ident, $ty:ty, $expected:literal) => {
        $(#[$doc])*
        pub fn $fn(&self, name: &str) -> Result<$ty, ArgumentError> {
            match self.lookup(name)? {
                Value::$variant(v) => Ok(*v),
                other => Err(ArgumentError::TypeMismatch {
                    name: name.to_string(),
                    expected: $expected,
                    actual: other.type_name(),
                }),
            }
        }
    };
}

impl Arguments {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn lookup(&self, name: &str) -> Result<&Value, ArgumentError> {
        self.values
            .get(name)
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))
    }

    /// Get a string argument.
    pub fn string(&self, name: &str) -> Result<&str, ArgumentError> {
        match self.lookup(name)? {
            Value::String(s) => Ok(s),
            other => Err(ArgumentError::TypeMismatch {
                name: name.to_string(),
                expected: "string",
                actual: other.type_name(),
            }),
        }
    }

    typed_accessor!(
        /// Get an integer argument.
        integer, Integer, i64, "integer"
    );
    typed_accessor!(
        /// Get a double argument. Integers are not coerced.
        double, Double, f64, "double"
    );
    typed_accessor!(
        /// Get a boolean argument.
        boolean, Boolean, bool, "boolean"
    );
    typed_accessor!(directory, Directory, DirId, "directory");
    typed_accessor!(command, Command, CommandId, "command");
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> Arguments {
        [
            ("text".to_string(), Value::String("hello".into())),
            ("count".to_string(), Value::Integer(3)),
            ("ratio".to_string(), Value::Double(0.5)),
            ("force".to_string(), Value::Boolean(true)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn typed_access() {
        let args = bundle();
        assert_eq!(args.string("text").unwrap(), "hello");
        assert_eq!(args.integer("count").unwrap(), 3);
        assert_eq!(args.double("ratio").unwrap(), 0.5);
        assert!(args.boolean("force").unwrap());
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn missing_is_distinct_from_mismatch() {
        let args = bundle();
        assert_eq!(
            args.integer("nope").unwrap_err(),
            ArgumentError::Missing("nope".into())
        );
        assert_eq!(
            args.double("count").unwrap_err(),
            ArgumentError::TypeMismatch {
                name: "count".into(),
                expected: "double",
                actual: "integer",
            }
        );
        assert!(matches!(
            args.string("force"),
            Err(ArgumentError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn iterates_in_name_order() {
        let names: Vec<_> = bundle().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, vec!["count", "force", "ratio", "text"]);
    }
}
