use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

use thiserror::Error;

/// A converted command line value, with its concrete type erased.
///
/// Values are cheap to clone: a plan's default values are shared by every invocation.
#[derive(Clone)]
pub struct Value {
    inner: Rc<dyn Any>,
    type_name: &'static str,
    repr: String,
}

impl Value {
    /// Wrap a concrete value.
    pub fn new<T: Debug + 'static>(value: T) -> Self {
        let repr = format!("{value:?}");
        Self {
            inner: Rc::new(value),
            type_name: std::any::type_name::<T>(),
            repr,
        }
    }

    /// The name of the concrete type held.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Get a copy of the concrete value, if it is of type `T`.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.inner.downcast_ref::<T>().cloned()
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("no parameter '{name}' was declared.")]
    Unknown { name: String },

    #[error("parameter '{name}' has no value (its default is absent).")]
    Absent { name: String },

    #[error("parameter '{name}' holds a {actual}, not a {expected}.")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The parsed arguments of one invocation, by parameter name.
///
/// This is what a declared handler receives.
/// Every parameter of the plan has an entry; an entry is absent only when its parameter defaults to none
/// (see [`crate::Parameter::none_default`]) and it was not given on the Cli.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::{Function, Parameter};
///
/// let function = Function::new("area", |arguments| {
///     arguments.get::<u32>("width") * arguments.get::<u32>("height")
/// })
/// .parameter(Parameter::new("width").typed::<u32>())
/// .parameter(Parameter::new("height").typed::<u32>().default(2u32));
///
/// assert_eq!(function.call_tokens(&["3"]).unwrap(), 6);
/// assert_eq!(function.call_tokens(&["3", "--height", "4"]).unwrap(), 12);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Arguments {
    values: HashMap<String, Option<Value>>,
}

impl Arguments {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.values.insert(name.into(), value);
    }

    /// Get the value of parameter `name` as a `T`.
    ///
    /// ### Panics
    /// If `name` is not a parameter, has no value, or is not a `T`.
    /// These are all declaration mistakes; use [`Arguments::try_get`] to handle them explicitly.
    pub fn get<T: Clone + 'static>(&self, name: &str) -> T {
        match self.try_get(name) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Get the value of parameter `name` as a `T`, or `None` if its value is absent.
    ///
    /// ### Panics
    /// If `name` is not a parameter or is not a `T`.
    pub fn get_optional<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        match self.try_get(name) {
            Ok(value) => Some(value),
            Err(ArgumentError::Absent { .. }) => None,
            Err(error) => panic!("{error}"),
        }
    }

    /// Get the value of parameter `name` as a `T`.
    pub fn try_get<T: Clone + 'static>(&self, name: &str) -> Result<T, ArgumentError> {
        match self.values.get(name) {
            None => Err(ArgumentError::Unknown {
                name: name.to_string(),
            }),
            Some(None) => Err(ArgumentError::Absent {
                name: name.to_string(),
            }),
            Some(Some(value)) => value
                .downcast::<T>()
                .ok_or_else(|| ArgumentError::TypeMismatch {
                    name: name.to_string(),
                    expected: std::any::type_name::<T>(),
                    actual: value.type_name(),
                }),
        }
    }

    /// Get the raw value of parameter `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` is a parameter of these arguments.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The parameter names of these arguments, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments() -> Arguments {
        let mut arguments = Arguments::default();
        arguments.insert("one", Some(Value::new("yes".to_string())));
        arguments.insert("two", Some(Value::new(2i64)));
        arguments.insert("three", None);
        arguments
    }

    #[test]
    fn value() {
        let value = Value::new(12u32);
        assert_eq!(value.downcast::<u32>(), Some(12));
        assert_eq!(value.downcast::<i32>(), None);
        assert_eq!(value.type_name(), "u32");
        assert_eq!(format!("{value:?}"), "12");

        let cloned = value.clone();
        assert_eq!(cloned.downcast::<u32>(), Some(12));
    }

    #[test]
    fn try_get() {
        let arguments = arguments();
        assert_eq!(arguments.try_get::<String>("one"), Ok("yes".to_string()));
        assert_eq!(arguments.try_get::<i64>("two"), Ok(2));
        assert_matches!(
            arguments.try_get::<i64>("three"),
            Err(ArgumentError::Absent { name }) if name == "three"
        );
        assert_matches!(
            arguments.try_get::<i64>("four"),
            Err(ArgumentError::Unknown { name }) if name == "four"
        );
        assert_matches!(
            arguments.try_get::<u8>("two"),
            Err(ArgumentError::TypeMismatch { expected: "u8", actual: "i64", .. })
        );
    }

    #[test]
    fn get() {
        let arguments = arguments();
        assert_eq!(arguments.get::<i64>("two"), 2);
        assert_eq!(arguments.get_optional::<i64>("two"), Some(2));
        assert_eq!(arguments.get_optional::<i64>("three"), None);
        assert!(arguments.value("three").is_none());
        assert!(arguments.value("two").is_some());
    }

    #[test]
    #[should_panic(expected = "no parameter 'four' was declared.")]
    fn get_unknown() {
        arguments().get::<i64>("four");
    }

    #[test]
    #[should_panic(expected = "has no value")]
    fn get_absent() {
        arguments().get::<i64>("three");
    }

    #[test]
    fn names() {
        let arguments = arguments();
        assert_eq!(arguments.names(), vec!["one", "three", "two"]);
        assert_eq!(arguments.len(), 3);
        assert!(!arguments.is_empty());
        assert!(arguments.contains("three"));
        assert!(!arguments.contains("four"));
        assert!(Arguments::default().is_empty());
    }
}
