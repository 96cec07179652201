use std::collections::HashSet;

use crate::api::{DefaultValue, Parameter, Value, ValueType};
use crate::constant::RECEIVER_NAMES;
use crate::model::Mode;
use crate::parser::base::ConfigError;
use crate::parser::docstring::{extract_help, HelpIndex};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// What a parse rule does with its parameter on the Cli.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Convert the parameter's single value token.
    Convert(ValueType),
    /// A value-less flag.
    /// When given, the parameter flips away from its default (`None` flips to `true`).
    Toggle { default: Option<bool> },
}

/// The parsing directive for a single parameter.
#[derive(Debug, Clone)]
pub struct ParseRule {
    parameter: Parameter,
    mode: Mode,
    action: Action,
}

impl ParseRule {
    pub fn name(&self) -> &str {
        self.parameter.name()
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Whether this rule consumes a value token.
    pub(crate) fn takes_value(&self) -> bool {
        matches!(self.action, Action::Convert(_))
    }

    /// The value of this rule's parameter when it is not given on the Cli.
    /// `None` means the value is absent.
    pub(crate) fn fallback(&self) -> Option<Value> {
        match &self.action {
            Action::Toggle { default } => default.map(Value::new),
            Action::Convert(_) => self
                .parameter
                .default_value()
                .and_then(DefaultValue::value),
        }
    }

    /// The value of this rule's flag when it is given on the Cli.
    pub(crate) fn toggled(&self) -> Option<Value> {
        match &self.action {
            Action::Toggle { default } => Some(Value::new(!default.unwrap_or(false))),
            Action::Convert(_) => None,
        }
    }

    /// Whether this rule's flag came from a required `bool` parameter.
    pub(crate) fn is_implicit_flag(&self) -> bool {
        matches!(self.action, Action::Toggle { .. }) && !self.parameter.has_default()
    }
}

/// Everything needed to parse the Cli of a declared callable: its description, parameter help messages, and parse rules.
///
/// A plan is built once per declaration, and never changes afterwards.
#[derive(Debug, Clone)]
pub struct CallablePlan {
    description: String,
    help_index: HelpIndex,
    rules: Vec<ParseRule>,
}

impl CallablePlan {
    pub(crate) fn build(
        callable: &str,
        parameters: &[Parameter],
        type_overrides: &[ValueType],
        docstring: Option<&str>,
        delimiter: &str,
    ) -> Result<Self, ConfigError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Creating parser for '{callable}'.");
        }

        let rules = build_plan(callable, parameters, type_overrides)?;
        let names: Vec<&str> = rules.iter().map(ParseRule::name).collect();
        let (description, help_index) = extract_help(callable, docstring, &names, delimiter);

        Ok(Self {
            description,
            help_index,
            rules,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn help_index(&self) -> &HelpIndex {
        &self.help_index
    }

    pub fn rules(&self) -> &[ParseRule] {
        &self.rules
    }

    pub(crate) fn positionals(&self) -> impl Iterator<Item = &ParseRule> {
        self.rules
            .iter()
            .filter(|rule| rule.mode() == Mode::Positional)
    }

    pub(crate) fn optionals(&self) -> impl Iterator<Item = &ParseRule> {
        self.rules.iter().filter(|rule| rule.mode() == Mode::Optional)
    }

    pub(crate) fn rule(&self, name: &str) -> Option<&ParseRule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// The help message of a rule, as displayed.
    pub(crate) fn help_for(&self, rule: &ParseRule) -> String {
        let help = self
            .help_index
            .get(rule.name())
            .expect("internal error - every rule must have a help message");

        if rule.is_implicit_flag() {
            format!("{help}. Defaults to True if not specified")
        } else {
            help.to_string()
        }
    }
}

/// Derive one parse rule per parameter of `callable`.
///
/// * A leading receiver parameter (`self` or `cls`) is not part of the Cli and is dropped.
/// Likewise for a leading [`ValueType::receiver`] in the `type_overrides`.
/// * The `type_overrides` are assigned, in order, to the parameters without a declared type.
/// * The conversion of a parameter is, by precedence: its declared type, its type override, the type of its default, the identity.
/// * Parameters without a default are positional; the others are optional.
/// * `bool` parameters become flags: a required one defaults to `true`, and otherwise the flag flips its default.
pub(crate) fn build_plan(
    callable: &str,
    parameters: &[Parameter],
    type_overrides: &[ValueType],
) -> Result<Vec<ParseRule>, ConfigError> {
    let parameters = match parameters.first() {
        Some(first) if RECEIVER_NAMES.contains(&first.name()) => &parameters[1..],
        _ => parameters,
    };
    let type_overrides = match type_overrides.first() {
        Some(first) if first.is_receiver() => &type_overrides[1..],
        _ => type_overrides,
    };

    if type_overrides.iter().any(ValueType::is_receiver) {
        return Err(ConfigError::MisplacedReceiver {
            callable: callable.to_string(),
        });
    }

    let mut names = HashSet::new();

    for parameter in parameters {
        if !names.insert(parameter.name()) {
            return Err(ConfigError::DuplicateParameter {
                callable: callable.to_string(),
                parameter: parameter.name().to_string(),
            });
        }
    }

    let declared = parameters
        .iter()
        .filter(|p| p.declared_type().is_some())
        .count();
    let required = parameters.iter().filter(|p| !p.has_default()).count();

    if type_overrides.len() > parameters.len() - declared {
        return Err(ConfigError::TooManyTypes {
            callable: callable.to_string(),
        });
    }

    if declared + type_overrides.len() < required {
        return Err(ConfigError::TooFewTypes {
            callable: callable.to_string(),
        });
    }

    let mut overrides = type_overrides.iter();
    let mut rules = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        let value_type = match parameter.declared_type() {
            Some(declared_type) => Some(declared_type),
            None => overrides.next().copied(),
        };
        rules.push(build_rule(callable, parameter, value_type)?);
    }

    Ok(rules)
}

fn build_rule(
    callable: &str,
    parameter: &Parameter,
    value_type: Option<ValueType>,
) -> Result<ParseRule, ConfigError> {
    let (mode, action) = match parameter.default_value() {
        None => {
            let value_type = value_type.unwrap_or_else(ValueType::identity);

            if value_type.is_bool() {
                (Mode::Optional, Action::Toggle { default: Some(true) })
            } else {
                (Mode::Positional, Action::Convert(value_type))
            }
        }
        Some(default) => {
            let value_type = match (value_type, default.value_type()) {
                (Some(value_type), Some(default_type))
                    if !value_type.produces_same(&default_type) =>
                {
                    return Err(ConfigError::DefaultTypeMismatch {
                        callable: callable.to_string(),
                        parameter: parameter.name().to_string(),
                        default_type: default_type.type_name(),
                        value_type: value_type.type_name(),
                    });
                }
                (Some(value_type), _) | (None, Some(value_type)) => value_type,
                (None, None) => {
                    return Err(ConfigError::AmbiguousDefault {
                        callable: callable.to_string(),
                        parameter: parameter.name().to_string(),
                    })
                }
            };

            if value_type.is_bool() {
                let default = default.value().and_then(|value| value.downcast::<bool>());
                (Mode::Optional, Action::Toggle { default })
            } else {
                (Mode::Optional, Action::Convert(value_type))
            }
        }
    };

    #[cfg(feature = "tracing_debug")]
    {
        let class = match (&mode, &action) {
            (Mode::Positional, _) => "positional argument",
            (Mode::Optional, Action::Toggle { .. }) => "optional flag",
            (Mode::Optional, Action::Convert(_)) => "optional argument",
        };
        debug!("Adding {class} {callable}.{}.", parameter.name());
    }

    Ok(ParseRule {
        parameter: parameter.clone(),
        mode,
        action,
    })
}
