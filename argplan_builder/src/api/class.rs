use std::collections::HashSet;

use crate::api::core::as_strs;
use crate::api::{Initializer, Method};
use crate::constant::{sub_commands_description, CLASS_HELP_MESSAGE, DEFAULT_DELIMITER};
use crate::parser::{
    env_tokens, exit_on_err, extract_help, parse_command, report, usage_error, CallablePlan,
    ConfigError, ConsoleInterface, Error, Printer, SubCommandListing, UsageErrorKind,
    UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The methods of a class `T`, composed into a sub-command parser.
///
/// The initializer's parameters are the top level arguments.
/// Each method is a sub-command, exposed under its name (or alias): underscores become hyphens, and methods starting with `_` are private.
///
/// ### Example
/// ```
/// # use argplan_builder as argplan;
/// use argplan::{Class, Initializer, Method, Parameter};
///
/// struct NeedParsing {
///     four: i64,
/// }
///
/// let parser = Class::new("NeedParsing")
///     .initializer(
///         Initializer::new("__init__", |arguments| NeedParsing {
///             four: arguments.get("four"),
///         })
///         .parameter(Parameter::new("self"))
///         .parameter(Parameter::new("four").typed::<i64>()),
///     )
///     .method(
///         Method::new("multiply_self_arg", |instance: &mut NeedParsing, arguments| {
///             instance.four * arguments.get::<i64>("num")
///         })
///         .parameter(Parameter::new("self"))
///         .parameter(Parameter::new("num").typed::<i64>()),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     parser.call_tokens(&["12", "multiply-self-arg", "2"], None).unwrap(),
///     24
/// );
/// ```
pub struct Class<'a, T, R> {
    name: String,
    program: Option<String>,
    description: Option<String>,
    docstring: Option<String>,
    parse_private: bool,
    initializer: Option<Initializer<'a, T>>,
    methods: Vec<Method<'a, T, R>>,
}

impl<'a, T, R> Class<'a, T, R> {
    /// Declare the class `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: None,
            description: None,
            docstring: None,
            parse_private: false,
            initializer: None,
            methods: Vec::default(),
        }
    }

    /// The initializer, from which instances are built when none is provided.
    /// If repeated, only the final initializer applies.
    pub fn initializer(mut self, initializer: Initializer<'a, T>) -> Self {
        self.initializer.replace(initializer);
        self
    }

    /// Add a method, exposed as a sub-command.
    /// Sub-commands are listed in the order they are added.
    pub fn method(mut self, method: Method<'a, T, R>) -> Self {
        self.methods.push(method);
        self
    }

    /// The top level description.
    /// Takes precedence over the class docstring.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// The class docstring, used as the top level description when none is given.
    pub fn docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring.replace(docstring.into());
        self
    }

    /// Whether to expose the methods starting with `_` (default `false`).
    /// Exposed private methods are named without their leading and trailing underscores.
    pub fn parse_private(mut self, parse_private: bool) -> Self {
        self.parse_private = parse_private;
        self
    }

    /// The program name shown in the usage (defaults to the class name).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program.replace(program.into());
        self
    }

    /// Compose the class parser, building the plan of the initializer and every exposed method.
    pub fn build(self) -> Result<ClassParser<'a, T, R>, ConfigError> {
        let Class {
            name,
            program,
            description,
            docstring,
            parse_private,
            initializer,
            methods,
        } = self;

        if let Some(initializer) = &initializer {
            initializer.plan()?;
        }

        let mut names = HashSet::new();
        let mut sub_commands = Vec::default();

        for method in methods {
            let exposed = match exposed_name(
                method.signature().alias().unwrap_or(method.signature().name()),
                parse_private,
            ) {
                Some(exposed) => exposed,
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Skipping private method '{}'.", method.callable_name());
                    }

                    continue;
                }
            };

            if !names.insert(exposed.clone()) {
                return Err(ConfigError::DuplicateSubCommand { class: name, name: exposed });
            }

            method.plan()?;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Adding sub-command '{exposed}' to '{name}'.");
            }

            sub_commands.push((exposed, method));
        }

        let description = description
            .or_else(|| {
                docstring
                    .filter(|d| !d.trim().is_empty())
                    .map(|d| extract_help(&name, Some(d.as_str()), &[], DEFAULT_DELIMITER).0)
            })
            .unwrap_or_default();

        Ok(ClassParser {
            program: program.unwrap_or_else(|| name.clone()),
            name,
            description,
            initializer,
            sub_commands,
        })
    }
}

/// The exposed sub-command name of a method, or `None` if it is not exposed.
fn exposed_name(name: &str, parse_private: bool) -> Option<String> {
    let name = if name.starts_with('_') {
        if !parse_private {
            return None;
        }

        name.trim_matches('_')
    } else {
        name
    };

    Some(name.replace('_', "-"))
}

/// The composed sub-command parser of a class.
/// Built via [`Class::build`].
pub struct ClassParser<'a, T, R> {
    name: String,
    program: String,
    description: String,
    initializer: Option<Initializer<'a, T>>,
    sub_commands: Vec<(String, Method<'a, T, R>)>,
}

impl<'a, T, R> ClassParser<'a, T, R> {
    /// The top level description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The exposed sub-command names, in the order they were added.
    pub fn sub_commands(&self) -> Vec<&str> {
        self.sub_commands
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn initializer_plan(&self) -> Option<&CallablePlan> {
        self.initializer.as_ref().map(|initializer| {
            initializer
                .plan()
                .expect("internal error - plan must be built by the class")
        })
    }

    fn method_plan<'m>(method: &'m Method<'a, T, R>) -> &'m CallablePlan {
        method
            .plan()
            .expect("internal error - plan must be built by the class")
    }

    fn top_level_printer(&self) -> Printer<'_> {
        let commands = self
            .sub_commands
            .iter()
            .map(|(name, method)| (name.as_str(), Self::method_plan(method).description()))
            .collect();

        Printer::terminal(
            self.program.as_str(),
            self.description.as_str(),
            self.initializer_plan(),
        )
        .help_message(CLASS_HELP_MESSAGE)
        .sub_commands(SubCommandListing::new(
            sub_commands_description(&self.name),
            commands,
        ))
    }

    fn sub_command_printer<'p>(&'p self, name: &str, method: &'p Method<'a, T, R>) -> Printer<'p> {
        let plan = Self::method_plan(method);
        Printer::terminal(format!("{} {name}", self.program), plan.description(), Some(plan))
    }

    /// The top level help, followed by the help of every sub-command.
    pub fn full_help(&self) -> String {
        let mut help = self.top_level_printer().help();

        for (name, method) in &self.sub_commands {
            let printer = self.sub_command_printer(name, method);
            help.push_str(&format!("\n** Command '{name}' **\n{}\n", printer.help()));
        }

        help
    }

    /// Parse the `tokens`, then call the selected sub-command.
    ///
    /// The sub-command is called on the `instance` when one is provided.
    /// Otherwise, the instance is built by the initializer from the top level arguments.
    ///
    /// Nothing is printed: help and errors are returned as an [`Error`].
    pub fn call_tokens(&self, tokens: &[&str], instance: Option<&mut T>) -> Result<R, Error> {
        let choices = self.sub_commands();
        let top_level = self.top_level_printer();
        let parsed = parse_command(
            &top_level,
            self.initializer_plan(),
            tokens,
            0,
            Some(choices.as_slice()),
        )
        .map_err(|error| match error {
            Error::Help(_) => Error::Help(self.full_help()),
            error => error,
        })?;
        let (offset, variant) = parsed
            .discriminee
            .expect("internal error - discriminating parse must find the sub-command");

        let method = match self.sub_commands.iter().find(|(name, _)| name == &variant) {
            Some((_, method)) => method,
            None => {
                return Err(usage_error(
                    &top_level,
                    UsageErrorKind::UnknownSubCommand {
                        name: variant,
                        choices: choices.iter().map(|c| c.to_string()).collect(),
                    },
                    offset,
                    tokens,
                ))
            }
        };

        let printer = self.sub_command_printer(&variant, method);
        let sub_parsed = parse_command(
            &printer,
            Some(Self::method_plan(method)),
            tokens,
            parsed.remaining,
            None,
        )?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Calling sub-command '{variant}' of '{}'.", self.name);
        }

        match (instance, &self.initializer) {
            (Some(instance), _) => Ok(method.call_with(instance, &sub_parsed.arguments)),
            (None, Some(initializer)) => {
                let mut instance = initializer.call_with(&parsed.arguments);
                Ok(method.call_with(&mut instance, &sub_parsed.arguments))
            }
            (None, None) => Err(Error::Config(ConfigError::MissingInitializer {
                class: self.name.clone(),
            })),
        }
    }

    /// Parse the Cli [`std::env::args`], then call the selected sub-command.
    pub fn call(&self, instance: Option<&mut T>) -> Result<R, Error> {
        let tokens = env_tokens();
        self.call_tokens(&as_strs(&tokens), instance)
    }

    /// Parse the `tokens`, then call the selected sub-command.
    ///
    /// Reports help and errors as described in [`crate::Function::parse_tokens`].
    pub fn parse_tokens(&self, tokens: &[&str], instance: Option<&mut T>) -> Result<R, i32> {
        self.parse_tokens_with(tokens, instance, &ConsoleInterface::default())
    }

    pub(crate) fn parse_tokens_with(
        &self,
        tokens: &[&str],
        instance: Option<&mut T>,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<R, i32> {
        report(self.call_tokens(tokens, instance), user_interface)
    }

    /// Parse the Cli [`std::env::args`], then call the selected sub-command.
    ///
    /// Exits the process on help or errors, as described in [`crate::Function::parse`].
    pub fn parse(&self, instance: Option<&mut T>) -> R {
        let tokens = env_tokens();
        exit_on_err(self.parse_tokens(&as_strs(&tokens), instance))
    }
}
