use crate::api::Function;
use crate::parser::Error;

/// A type which is parsed from the Cli as a whole.
///
/// Typically implemented via `#[derive(Command)]` (see `argplan::derive`), which declares one parameter per field.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::{Command, Function, Parameter};
///
/// #[derive(Debug, PartialEq)]
/// struct Area {
///     width: u32,
///     height: u32,
/// }
///
/// impl Command for Area {
///     fn function() -> Function<'static, Self> {
///         Function::new("area", |arguments| Area {
///             width: arguments.get("width"),
///             height: arguments.get("height"),
///         })
///         .parameter(Parameter::new("width").typed::<u32>())
///         .parameter(Parameter::new("height").typed::<u32>().default(2u32))
///     }
/// }
///
/// assert_eq!(
///     Area::call_tokens(&["3"]).unwrap(),
///     Area { width: 3, height: 2 }
/// );
/// ```
pub trait Command: Sized {
    /// The declaration which builds `Self` from its parsed arguments.
    fn function() -> Function<'static, Self>;

    /// Parse the `tokens` into `Self`.
    ///
    /// Nothing is printed: help and errors are returned as an [`Error`].
    fn call_tokens(tokens: &[&str]) -> Result<Self, Error> {
        Self::function().call_tokens(tokens)
    }

    /// Parse the `tokens` into `Self`.
    ///
    /// Reports help and errors as described in [`Function::parse_tokens`].
    fn parse_tokens(tokens: &[&str]) -> Result<Self, i32> {
        Self::function().parse_tokens(tokens)
    }

    /// Parse the Cli [`std::env::args`] into `Self`.
    ///
    /// Exits the process on help or errors, as described in [`Function::parse`].
    fn parse() -> Self {
        Self::function().parse()
    }
}
