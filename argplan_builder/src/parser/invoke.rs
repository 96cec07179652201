use crate::api::{Arguments, Value};
use crate::model::Mode;
use crate::parser::base::UsageErrorKind;
use crate::parser::matcher::Matches;
use crate::parser::plan::{Action, CallablePlan, ParseRule};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Convert the matched tokens into the [`Arguments`] for a call of the plan's callable.
///
/// Every rule of the plan receives an entry: its converted value, its flag value, or its fallback.
/// Missing positional arguments are reported together, at offset `end` (the end of the input).
pub(crate) fn bind(
    plan: &CallablePlan,
    matches: &Matches,
    end: usize,
) -> Result<Arguments, (usize, UsageErrorKind)> {
    let mut arguments = Arguments::default();
    let mut positionals = matches.positionals.iter();
    let mut missing: Vec<String> = Vec::default();

    for rule in plan.rules() {
        let value = match rule.mode() {
            Mode::Positional => match positionals.next() {
                Some((offset, token)) => Some(convert(rule, *offset, token)?),
                None => {
                    missing.push(rule.name().to_string());
                    continue;
                }
            },
            Mode::Optional => match (matches.options.get(rule.name()), rule.action()) {
                (None, _) => rule.fallback(),
                (Some((_, None)), Action::Toggle { .. }) => rule.toggled(),
                (Some((offset, Some(token))), Action::Convert(_)) => {
                    Some(convert(rule, *offset, token)?)
                }
                (Some(_), _) => {
                    unreachable!("internal error - option matched against the wrong action")
                }
            },
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Bound {}={value:?}.", rule.name());
        }

        arguments.insert(rule.name(), value);
    }

    if missing.is_empty() {
        Ok(arguments)
    } else {
        Err((end, UsageErrorKind::MissingArguments { names: missing }))
    }
}

fn convert(
    rule: &ParseRule,
    offset: usize,
    token: &str,
) -> Result<Value, (usize, UsageErrorKind)> {
    let value_type = match rule.action() {
        Action::Convert(value_type) => value_type,
        Action::Toggle { .. } => unreachable!("internal error - flags do not convert"),
    };

    value_type.convert(token).map_err(|conversion| {
        (
            offset,
            UsageErrorKind::InvalidValue {
                parameter: rule.name().to_string(),
                conversion,
            },
        )
    })
}
