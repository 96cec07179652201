use std::fmt::Debug;
use std::str::FromStr;

use crate::api::{Value, ValueType};

/// The default of a parameter.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    /// A concrete default, along with the type it was given as.
    Value(Value, ValueType),
    /// The "no value" default.
    /// It carries no type to infer a conversion from, so the parameter must otherwise be typed.
    None,
}

impl DefaultValue {
    pub(crate) fn value_type(&self) -> Option<ValueType> {
        match self {
            DefaultValue::Value(_, value_type) => Some(*value_type),
            DefaultValue::None => None,
        }
    }

    pub(crate) fn value(&self) -> Option<Value> {
        match self {
            DefaultValue::Value(value, _) => Some(value.clone()),
            DefaultValue::None => None,
        }
    }
}

/// A parameter in the signature of a declared callable.
///
/// Parameters without a default are required and become positional arguments on the Cli.
/// Parameters with a default become `--name VALUE` options (or `--name` flags, for `bool`).
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::Parameter;
///
/// // one: str
/// Parameter::new("one").typed::<String>();
/// // three: int = 12
/// Parameter::new("three").typed::<i64>().default(12i64);
/// // Untyped, its conversion is inferred from the default.
/// Parameter::new("ratio").default(0.5f64);
/// // verbose: Optional[int] = None
/// Parameter::new("verbose").typed::<i64>().none_default();
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    default: Option<DefaultValue>,
    declared_type: Option<ValueType>,
}

impl Parameter {
    /// Create a parameter, without a type or default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            declared_type: None,
        }
    }

    /// Declare the type of this parameter.
    /// A declared type takes precedence over any other way of determining the conversion.
    pub fn typed<T>(mut self) -> Self
    where
        T: FromStr + Debug + 'static,
    {
        self.declared_type = Some(ValueType::of::<T>());
        self
    }

    /// Declare the type of this parameter by its [`ValueType`].
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.declared_type = Some(value_type);
        self
    }

    /// Give this parameter a default.
    /// If repeated, only the final default applies.
    pub fn default<T>(mut self, value: T) -> Self
    where
        T: FromStr + Debug + 'static,
    {
        self.default = Some(DefaultValue::Value(Value::new(value), ValueType::of::<T>()));
        self
    }

    /// Give this parameter the "no value" default.
    /// If repeated, only the final default applies.
    pub fn none_default(mut self) -> Self {
        self.default = Some(DefaultValue::None);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn declared_type(&self) -> Option<ValueType> {
        self.declared_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter() {
        let parameter = Parameter::new("one");
        assert_eq!(parameter.name(), "one");
        assert!(!parameter.has_default());
        assert_eq!(parameter.declared_type(), None);
    }

    #[test]
    fn parameter_typed_default() {
        let parameter = Parameter::new("three").typed::<i64>().default(12i64);
        assert!(parameter.has_default());
        assert_eq!(parameter.declared_type(), Some(ValueType::of::<i64>()));
        let default = parameter.default_value().unwrap();
        assert_eq!(default.value_type(), Some(ValueType::of::<i64>()));
        assert_eq!(default.value().unwrap().downcast::<i64>(), Some(12));
    }

    #[test]
    fn parameter_default_repeated() {
        let parameter = Parameter::new("three").default(1u8).default("x".to_string());
        let default = parameter.default_value().unwrap();
        assert_eq!(default.value_type(), Some(ValueType::of::<String>()));
    }

    #[test]
    fn parameter_none_default() {
        let parameter = Parameter::new("maybe").none_default();
        assert!(parameter.has_default());
        assert_matches!(parameter.default_value(), Some(DefaultValue::None));
        assert_eq!(parameter.default_value().unwrap().value_type(), None);
        assert!(parameter.default_value().unwrap().value().is_none());
    }

    #[test]
    fn parameter_value_type() {
        let parameter = Parameter::new("text").value_type(ValueType::identity());
        assert_eq!(parameter.declared_type(), Some(ValueType::identity()));
    }
}
