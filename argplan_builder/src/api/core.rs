use std::cell::OnceCell;

use crate::api::{Arguments, Parameter, ValueType};
use crate::constant::DEFAULT_DELIMITER;
use crate::parser::{
    env_tokens, exit_on_err, parse_command, report, CallablePlan, ConfigError, ConsoleInterface,
    Error, Printer, UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The declared shape of a callable: everything its plan is built from.
#[derive(Debug)]
pub(crate) struct Signature {
    name: String,
    alias: Option<String>,
    program: Option<String>,
    parameters: Vec<Parameter>,
    types: Vec<ValueType>,
    docstring: Option<String>,
    delimiter: String,
    plan: OnceCell<CallablePlan>,
}

impl Signature {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            program: None,
            parameters: Vec::default(),
            types: Vec::default(),
            docstring: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            plan: OnceCell::default(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn program(&self) -> &str {
        self.program.as_deref().unwrap_or(&self.name)
    }

    /// Build the plan on first use; afterwards, always the same plan.
    pub(crate) fn plan(&self) -> Result<&CallablePlan, ConfigError> {
        if let Some(plan) = self.plan.get() {
            return Ok(plan);
        }

        let plan = CallablePlan::build(
            &self.name,
            &self.parameters,
            &self.types,
            self.docstring.as_deref(),
            &self.delimiter,
        )?;

        Ok(self.plan.get_or_init(|| plan))
    }

    /// Parse the `tokens` into the arguments of this callable.
    fn parse(&self, tokens: &[&str]) -> Result<Arguments, Error> {
        let plan = self.plan()?;
        let printer = Printer::terminal(self.program(), plan.description(), Some(plan));
        let parsed = parse_command(&printer, Some(plan), tokens, 0, None)?;
        Ok(parsed.arguments)
    }
}

// The declaration builder methods shared by every kind of callable.
// Once the plan is built, the declaration is frozen: later calls have no effect on the plan.
macro_rules! signature_builder {
    () => {
        /// Declare the next parameter.
        /// The order of parameters is the declaration order: positional arguments are matched in this order.
        pub fn parameter(mut self, parameter: Parameter) -> Self {
            self.signature.parameters.push(parameter);
            self
        }

        /// Document this callable.
        /// If repeated, only the final docstring applies.
        ///
        /// The lines up to the first blank line are the description.
        /// After that, each `NAME: HELP` line documents the parameter `NAME` (see [`Self::delimiter`]).
        pub fn docstring(mut self, docstring: impl Into<String>) -> Self {
            self.signature.docstring.replace(docstring.into());
            self
        }

        /// The delimiter separating a parameter name from its help in the docstring (default `":"`).
        pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
            self.signature.delimiter = delimiter.into();
            self
        }

        /// An explicit list of conversion targets, assigned in order to the parameters without a declared type.
        /// A leading [`ValueType::receiver`] is ignored.
        pub fn types(mut self, types: impl IntoIterator<Item = ValueType>) -> Self {
            self.signature.types = types.into_iter().collect();
            self
        }

        /// The name under which this callable is exposed as a sub-command.
        pub fn name(mut self, alias: impl Into<String>) -> Self {
            self.signature.alias.replace(alias.into());
            self
        }

        /// The program name shown in the usage (defaults to the callable name).
        pub fn program(mut self, program: impl Into<String>) -> Self {
            self.signature.program.replace(program.into());
            self
        }

        /// The name of the declared callable.
        pub fn callable_name(&self) -> &str {
            self.signature.name()
        }

        /// The parse plan of this callable.
        /// It is built on the first call, and the very same plan is returned afterwards.
        pub fn plan(&self) -> Result<&CallablePlan, ConfigError> {
            self.signature.plan()
        }
    };
}

/// A free function, parsed from and called with the Cli.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::{Function, Parameter};
///
/// let parse_me = Function::new("parse_me", |arguments| {
///     let one: String = arguments.get("one");
///     let two: i64 = arguments.get("two");
///     let three: i64 = arguments.get("three");
///     (one.repeat(two as usize), three * three)
/// })
/// .parameter(Parameter::new("one").typed::<String>())
/// .parameter(Parameter::new("two").typed::<i64>())
/// .parameter(Parameter::new("three").typed::<i64>().default(12i64))
/// .docstring(
///     "Could use some parsing.
///
///     Args:
///         one: some stuff shouldn't be written down
///         two: I can turn 2 syllables words into 6 syllables words
///         three: I don't like the number three",
/// );
///
/// assert_eq!(
///     parse_me.call_tokens(&["yes", "2"]).unwrap(),
///     ("yesyes".to_string(), 144)
/// );
/// assert_eq!(
///     parse_me.call_tokens(&["no", "3", "--three", "2"]).unwrap(),
///     ("nonono".to_string(), 4)
/// );
/// ```
pub struct Function<'a, R> {
    signature: Signature,
    handler: Box<dyn Fn(&Arguments) -> R + 'a>,
}

impl<'a, R> Function<'a, R> {
    /// Declare the function `name`, which runs the `handler` with its parsed arguments.
    pub fn new(name: impl Into<String>, handler: impl Fn(&Arguments) -> R + 'a) -> Self {
        Self {
            signature: Signature::new(name),
            handler: Box::new(handler),
        }
    }

    signature_builder!();

    /// Call the function directly with already parsed `arguments`.
    pub fn call_with(&self, arguments: &Arguments) -> R {
        (self.handler)(arguments)
    }

    /// Parse the `tokens`, then call the function.
    ///
    /// Nothing is printed: help and errors are returned as an [`Error`].
    pub fn call_tokens(&self, tokens: &[&str]) -> Result<R, Error> {
        let arguments = self.signature.parse(tokens)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Calling '{}'.", self.signature.name());
        }

        Ok(self.call_with(&arguments))
    }

    /// Parse the Cli [`std::env::args`], then call the function.
    pub fn call(&self) -> Result<R, Error> {
        let tokens = env_tokens();
        self.call_tokens(&as_strs(&tokens))
    }

    /// Parse the `tokens`, then call the function.
    ///
    /// Help is printed to standard output, returning `Err(0)`.
    /// Usage errors are printed to standard error, returning `Err(2)`.
    /// Config errors are printed to standard error, returning `Err(1)`.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<R, i32> {
        self.parse_tokens_with(tokens, &ConsoleInterface::default())
    }

    pub(crate) fn parse_tokens_with(
        &self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<R, i32> {
        report(self.call_tokens(tokens), user_interface)
    }

    /// Parse the Cli [`std::env::args`], then call the function.
    ///
    /// Exits the process (via [`std::process::exit`]) on help or errors, as described in [`Function::parse_tokens`].
    pub fn parse(&self) -> R {
        let tokens = env_tokens();
        exit_on_err(self.parse_tokens(&as_strs(&tokens)))
    }
}

/// An instance method, parsed from and called with the Cli.
///
/// A leading `self` (or `cls`) parameter denotes the receiver and is not part of the Cli.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::{Method, Parameter};
///
/// struct Multiplier {
///     factor: i64,
/// }
///
/// let multiply = Method::new("multiply", |multiplier: &mut Multiplier, arguments| {
///     multiplier.factor * arguments.get::<i64>("num")
/// })
/// .parameter(Parameter::new("self"))
/// .parameter(Parameter::new("num").typed::<i64>());
///
/// let mut multiplier = Multiplier { factor: 12 };
/// assert_eq!(multiply.call_tokens(&mut multiplier, &["2"]).unwrap(), 24);
/// ```
pub struct Method<'a, T, R> {
    signature: Signature,
    handler: Box<dyn Fn(&mut T, &Arguments) -> R + 'a>,
}

impl<'a, T, R> Method<'a, T, R> {
    /// Declare the method `name`, which runs the `handler` on its receiver with its parsed arguments.
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&mut T, &Arguments) -> R + 'a,
    ) -> Self {
        Self {
            signature: Signature::new(name),
            handler: Box::new(handler),
        }
    }

    signature_builder!();

    pub(crate) fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Call the method directly on the `instance` with already parsed `arguments`.
    pub fn call_with(&self, instance: &mut T, arguments: &Arguments) -> R {
        (self.handler)(instance, arguments)
    }

    /// Parse the `tokens`, then call the method on the `instance`.
    ///
    /// Nothing is printed: help and errors are returned as an [`Error`].
    pub fn call_tokens(&self, instance: &mut T, tokens: &[&str]) -> Result<R, Error> {
        let arguments = self.signature.parse(tokens)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Calling method '{}'.", self.signature.name());
        }

        Ok(self.call_with(instance, &arguments))
    }

    /// Parse the Cli [`std::env::args`], then call the method on the `instance`.
    pub fn call(&self, instance: &mut T) -> Result<R, Error> {
        let tokens = env_tokens();
        self.call_tokens(instance, &as_strs(&tokens))
    }

    /// Parse the `tokens`, then call the method on the `instance`.
    ///
    /// Reports help and errors as described in [`Function::parse_tokens`].
    pub fn parse_tokens(&self, instance: &mut T, tokens: &[&str]) -> Result<R, i32> {
        self.parse_tokens_with(instance, tokens, &ConsoleInterface::default())
    }

    pub(crate) fn parse_tokens_with(
        &self,
        instance: &mut T,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<R, i32> {
        report(self.call_tokens(instance, tokens), user_interface)
    }

    /// Parse the Cli [`std::env::args`], then call the method on the `instance`.
    ///
    /// Exits the process on help or errors, as described in [`Function::parse`].
    pub fn parse(&self, instance: &mut T) -> R {
        let tokens = env_tokens();
        exit_on_err(self.parse_tokens(instance, &as_strs(&tokens)))
    }
}

/// The initializer of a class: builds an instance from its parsed arguments.
///
/// An initializer only parses as part of its [`crate::Class`], where it supplies the top level arguments.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::{ConfigError, Error, Initializer, Parameter};
///
/// struct Multiplier {
///     factor: i64,
/// }
///
/// let initializer = Initializer::new("__init__", |arguments| Multiplier {
///     factor: arguments.get("factor"),
/// })
/// .parameter(Parameter::new("self"))
/// .parameter(Parameter::new("factor").typed::<i64>());
///
/// assert!(matches!(
///     initializer.call_tokens(&["12"]),
///     Err(Error::Config(ConfigError::InitializerOutsideClass { .. }))
/// ));
/// ```
pub struct Initializer<'a, T> {
    signature: Signature,
    handler: Box<dyn Fn(&Arguments) -> T + 'a>,
}

impl<'a, T> Initializer<'a, T> {
    /// Declare the initializer `name`, which builds an instance from its parsed arguments.
    pub fn new(name: impl Into<String>, handler: impl Fn(&Arguments) -> T + 'a) -> Self {
        Self {
            signature: Signature::new(name),
            handler: Box::new(handler),
        }
    }

    signature_builder!();

    /// Build an instance directly from already parsed `arguments`.
    pub fn call_with(&self, arguments: &Arguments) -> T {
        (self.handler)(arguments)
    }

    /// Always fails: an initializer can only be parsed as part of its class.
    pub fn call_tokens(&self, _tokens: &[&str]) -> Result<T, Error> {
        Err(Error::Config(ConfigError::InitializerOutsideClass {
            callable: self.signature.name().to_string(),
        }))
    }
}

pub(crate) fn as_strs(tokens: &[String]) -> Vec<&str> {
    tokens.iter().map(AsRef::as_ref).collect()
}
