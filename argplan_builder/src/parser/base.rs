use thiserror::Error;

use crate::api::InvalidConversion;

/// A mistake in how a callable or class was declared.
/// These are found when the plan is built, never because of Cli input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Too many types provided for conversion for '{callable}'.")]
    TooManyTypes { callable: String },

    #[error("Not enough types provided for conversion for '{callable}'.")]
    TooFewTypes { callable: String },

    #[error("To use default value of 'None' you need to specify the type of the argument '{parameter}' for the method '{callable}'.")]
    AmbiguousDefault { callable: String, parameter: String },

    #[error("The default of '{parameter}' for '{callable}' is a {default_type}, but the argument converts to {value_type}.")]
    DefaultTypeMismatch {
        callable: String,
        parameter: String,
        default_type: &'static str,
        value_type: &'static str,
    },

    #[error("Cannot duplicate the parameter '{parameter}' of '{callable}'.")]
    DuplicateParameter { callable: String, parameter: String },

    #[error("The receiver type may only be the first of the types provided for '{callable}'.")]
    MisplacedReceiver { callable: String },

    #[error("The initializer '{callable}' can only be parsed as part of its class.")]
    InitializerOutsideClass { callable: String },

    #[error("'{class}' has no initializer. Please provide an instance to call or declare its initializer.")]
    MissingInitializer { class: String },

    #[error("Cannot duplicate the sub-command '{name}' of '{class}'.")]
    DuplicateSubCommand { class: String, name: String },
}

/// What was wrong with the Cli input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageErrorKind {
    #[error("the following arguments are required: {}.", .names.join(", "))]
    MissingArguments { names: Vec<String> },

    #[error("option '--{option}' expected one value.")]
    MissingValue { option: String },

    #[error("option '--{option}' does not take a value.")]
    UnexpectedValue { option: String },

    #[error("invalid value for '{parameter}': {conversion}")]
    InvalidValue {
        parameter: String,
        conversion: InvalidConversion,
    },

    #[error("unrecognized option '{option}'.")]
    UnknownOption { option: String },

    #[error("unrecognized arguments: {}.", .tokens.join(" "))]
    UnexpectedArguments { tokens: Vec<String> },

    #[error("a sub-command is required, choose from {{{}}}.", .choices.join(", "))]
    MissingSubCommand { choices: Vec<String> },

    #[error("unknown sub-command '{name}', choose from {{{}}}.", .choices.join(", "))]
    UnknownSubCommand { name: String, choices: Vec<String> },
}

/// The Cli input could not be parsed.
///
/// Carries the usage and help messages of the parser that rejected the input, as well as where in the input the problem lies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct UsageError {
    kind: UsageErrorKind,
    context: ErrorContext,
    usage: String,
    help: String,
}

impl UsageError {
    pub(crate) fn new(
        kind: UsageErrorKind,
        context: ErrorContext,
        usage: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            context,
            usage: usage.into(),
            help: help.into(),
        }
    }

    pub fn kind(&self) -> &UsageErrorKind {
        &self.kind
    }

    /// Where in the input the problem lies.
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// The usage line of the rejecting parser.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The full help message of the rejecting parser.
    pub fn help(&self) -> &str {
        &self.help
    }
}

/// The result of a failed (or help interrupted) parse-and-call.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parse error: {0}")]
    Usage(#[from] UsageError),

    /// Help was requested (`-h`/`--help`); holds the help message.
    #[error("{0}")]
    Help(String),
}

/// The input tokens, along with the offset (token index) at which parsing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        let position: usize = self
            .tokens
            .iter()
            .take(self.offset)
            .map(|token| token.chars().count() + 1)
            .sum();

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(position, projection.chars().count())
        )
    }
}
