use std::any::TypeId;
use std::fmt::Debug;
use std::str::FromStr;

use thiserror::Error;

use crate::api::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_name}.")]
#[doc(hidden)]
pub struct InvalidConversion {
    pub(crate) token: String,
    pub(crate) type_name: &'static str,
}

type Converter = fn(&str) -> Result<Value, InvalidConversion>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeKind {
    Identity,
    Boolean,
    Parsed,
    Receiver,
}

/// The conversion target of a parameter: the type its raw command line text is converted into.
///
/// Any type `T` implementing [`std::str::FromStr`] (and `Debug`, for help/diagnostics) may be a conversion target.
/// `bool` is special: a `bool` parameter becomes a value-less flag on the Cli.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::ValueType;
///
/// let value = ValueType::of::<u32>().convert("12").unwrap();
/// assert_eq!(value.downcast::<u32>(), Some(12));
/// assert!(ValueType::of::<u32>().convert("twelve").is_err());
/// ```
#[derive(Clone, Copy)]
pub struct ValueType {
    type_name: &'static str,
    type_id: TypeId,
    kind: TypeKind,
    converter: Converter,
}

impl ValueType {
    /// The conversion target `T`, parsed via [`std::str::FromStr`].
    pub fn of<T>() -> Self
    where
        T: FromStr + Debug + 'static,
    {
        let kind = if TypeId::of::<T>() == TypeId::of::<bool>() {
            TypeKind::Boolean
        } else {
            TypeKind::Parsed
        };

        Self {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind,
            converter: from_str::<T>,
        }
    }

    /// The pass-through conversion: the raw text is kept as a `String`.
    /// This is the conversion used when nothing else is known about a parameter.
    pub fn identity() -> Self {
        Self {
            type_name: "identity",
            type_id: TypeId::of::<String>(),
            kind: TypeKind::Identity,
            converter: |token| Ok(Value::new(token.to_string())),
        }
    }

    /// Marks the receiver slot at the head of an explicit types list (see [`crate::Function::types`]).
    /// It never converts anything; the receiver is not part of the command line.
    pub fn receiver() -> Self {
        Self {
            type_name: "receiver",
            type_id: TypeId::of::<Receiver>(),
            kind: TypeKind::Receiver,
            converter: |token| {
                Err(InvalidConversion {
                    token: token.to_string(),
                    type_name: "receiver",
                })
            },
        }
    }

    /// The name of the conversion target, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this is the `bool` conversion target.
    pub fn is_bool(&self) -> bool {
        self.kind == TypeKind::Boolean
    }

    pub(crate) fn is_receiver(&self) -> bool {
        self.kind == TypeKind::Receiver
    }

    /// Whether both conversions produce values of the same Rust type.
    pub(crate) fn produces_same(&self, other: &ValueType) -> bool {
        self.type_id == other.type_id
    }

    /// Convert the raw `token` into a [`Value`] of this type.
    pub fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        (self.converter)(token)
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.kind == other.kind
    }
}

impl Eq for ValueType {}

impl Debug for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ValueType[{}]", self.type_name)
    }
}

struct Receiver;

fn from_str<T>(token: &str) -> Result<Value, InvalidConversion>
where
    T: FromStr + Debug + 'static,
{
    T::from_str(token)
        .map(Value::new)
        .map_err(|_| InvalidConversion {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })
}
