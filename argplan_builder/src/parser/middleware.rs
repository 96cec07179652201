use std::env;

use crate::api::Arguments;
use crate::constant::{CONFIG_EXIT_CODE, USAGE_EXIT_CODE};
use crate::parser::base::{Error, ErrorContext, UsageError, UsageErrorKind};
use crate::parser::interface::UserInterface;
use crate::parser::invoke::bind;
use crate::parser::matcher::{match_tokens, OffsetValue};
use crate::parser::plan::CallablePlan;
use crate::parser::printer::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The outcome of parsing one command's share of the input.
#[derive(Debug)]
pub(crate) struct Parsed {
    pub(crate) arguments: Arguments,
    /// The sub-command token (offset into the full input), when discriminating.
    pub(crate) discriminee: Option<OffsetValue>,
    /// The offset of the first token left for the sub-command.
    pub(crate) remaining: usize,
}

/// Parse `tokens[start..]` against the `plan`, reporting offsets into the full `tokens`.
///
/// Parsing happens in two phases:
/// 1. Token matching aligns the tokens to the plan's rules.
/// 2. Binding converts the matched tokens into the [`Arguments`].
///
/// If the help switch (`-h` or `--help`) is encountered, this returns [`Error::Help`] with the `printer`'s help message.
/// Phase #2 is skipped.
///
/// When sub-command `choices` are given, a sub-command token must follow the plan's positional arguments.
pub(crate) fn parse_command(
    printer: &Printer,
    plan: Option<&CallablePlan>,
    tokens: &[&str],
    start: usize,
    choices: Option<&[&str]>,
) -> Result<Parsed, Error> {
    #[cfg(feature = "tracing_debug")]
    {
        debug!("Parsing tokens {:?}.", &tokens[start..]);
    }

    let matches = match_tokens(plan, &tokens[start..], choices)
        .map_err(|(offset, kind)| usage_error(printer, kind, start + offset, tokens))?;

    if matches.help {
        return Err(Error::Help(printer.help()));
    }

    let arguments = match plan {
        Some(plan) => {
            let end = match &matches.discriminee {
                Some((offset, _)) => *offset,
                None => tokens.len() - start,
            };
            bind(plan, &matches, end)
                .map_err(|(offset, kind)| usage_error(printer, kind, start + offset, tokens))?
        }
        None => Arguments::default(),
    };

    if let (Some(choices), None) = (choices, &matches.discriminee) {
        return Err(usage_error(
            printer,
            UsageErrorKind::MissingSubCommand {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
            tokens.len(),
            tokens,
        ));
    }

    Ok(Parsed {
        arguments,
        discriminee: matches
            .discriminee
            .map(|(offset, value)| (start + offset, value)),
        remaining: start + matches.remaining,
    })
}

/// Describe a problem with the input `tokens` at `offset`, using the `printer` of the rejecting parser.
pub(crate) fn usage_error(
    printer: &Printer,
    kind: UsageErrorKind,
    offset: usize,
    tokens: &[&str],
) -> Error {
    Error::Usage(UsageError::new(
        kind,
        ErrorContext::new(offset, tokens),
        printer.usage(),
        printer.help(),
    ))
}

/// Report the `result` to the user, turning every failure into an exit code.
///
/// * Help is printed to standard output, with exit code `0`.
/// * Usage errors print the usage, error, and error context to standard error, with exit code `2`.
/// * Config errors print the error to standard error, with exit code `1`.
pub(crate) fn report<R>(
    result: Result<R, Error>,
    user_interface: &(impl UserInterface + ?Sized),
) -> Result<R, i32> {
    match result {
        Ok(value) => Ok(value),
        Err(Error::Help(help)) => {
            user_interface.print(help);
            Err(0)
        }
        Err(Error::Usage(error)) => {
            user_interface.print_error(error.usage().to_string());
            user_interface.print_error(format!("error: {error}"));
            user_interface.print_error_context(error.context().clone());
            Err(USAGE_EXIT_CODE)
        }
        Err(error @ Error::Config(_)) => {
            user_interface.print_error(error.to_string());
            Err(CONFIG_EXIT_CODE)
        }
    }
}

/// The Cli input tokens, without the program name.
pub(crate) fn env_tokens() -> Vec<String> {
    env::args().skip(1).collect()
}

/// Exit the process on a failed [`report`].
pub(crate) fn exit_on_err<R>(result: Result<R, i32>) -> R {
    match result {
        Ok(value) => value,
        Err(exit_code) => std::process::exit(exit_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Parameter;
    use crate::parser::base::ConfigError;
    use crate::parser::interface::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn plan() -> CallablePlan {
        CallablePlan::build(
            "parse_me",
            &[
                Parameter::new("one").typed::<String>(),
                Parameter::new("two").typed::<i64>(),
                Parameter::new("three").typed::<i64>().default(12i64),
            ],
            &[],
            None,
            ":",
        )
        .unwrap()
    }

    #[test]
    fn parse_command_complete() {
        // Setup
        let plan = plan();
        let printer = Printer::new("parse_me", plan.description(), Some(&plan), None);

        // Execute
        let parsed =
            parse_command(&printer, Some(&plan), &["no", "3", "--three", "2"], 0, None).unwrap();

        // Verify
        assert_eq!(parsed.arguments.get::<String>("one"), "no");
        assert_eq!(parsed.arguments.get::<i64>("two"), 3);
        assert_eq!(parsed.arguments.get::<i64>("three"), 2);
        assert_eq!(parsed.discriminee, None);
        assert_eq!(parsed.remaining, 4);
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["yes", "x", "--help"])]
    fn parse_command_help(#[case] tokens: Vec<&str>) {
        // Setup
        let plan = plan();
        let printer = Printer::new("parse_me", plan.description(), Some(&plan), None);

        // Execute
        let error = parse_command(&printer, Some(&plan), tokens.as_slice(), 0, None).unwrap_err();

        // Verify
        assert_matches!(error, Error::Help(help) if help == printer.help());
    }

    #[rstest]
    #[case(vec!["yes"], 1)]
    #[case(vec!["yes", "x"], 1)]
    #[case(vec!["yes", "2", "--four"], 2)]
    fn parse_command_usage(#[case] tokens: Vec<&str>, #[case] expected_offset: usize) {
        // Setup
        let plan = plan();
        let printer = Printer::new("parse_me", plan.description(), Some(&plan), None);

        // Execute
        let error = parse_command(&printer, Some(&plan), tokens.as_slice(), 0, None).unwrap_err();

        // Verify
        assert_matches!(error, Error::Usage(error) => {
            assert_eq!(error.context().offset(), expected_offset);
            assert_eq!(error.usage(), "usage: parse_me [-h] [--three THREE] ONE TWO");
            assert_eq!(error.help(), printer.help());
            assert_contains!(error.help(), "Argument parsing for parse_me");
            assert_contains!(error.help(), "Help message for one");
            assert_contains!(error.help(), "Help message for three");
        });
    }

    #[test]
    fn parse_command_offsets() {
        // Setup
        let plan = plan();
        let printer = Printer::new("parse_me", plan.description(), Some(&plan), None);
        let tokens = ["12", "sub", "yes", "x"];

        // Execute
        let error = parse_command(&printer, Some(&plan), &tokens, 2, None).unwrap_err();

        // Verify
        assert_matches!(error, Error::Usage(error) if error.context().offset() == 3);
    }

    #[rstest]
    #[case(vec!["12", "sub", "2"], 0, 1, 2)]
    #[case(vec!["x", "12", "sub", "-h"], 1, 2, 3)]
    fn parse_command_discriminate(
        #[case] tokens: Vec<&str>,
        #[case] start: usize,
        #[case] expected_offset: usize,
        #[case] expected_remaining: usize,
    ) {
        // Setup
        let plan = CallablePlan::build(
            "__init__",
            &[Parameter::new("four").typed::<i64>()],
            &[],
            None,
            ":",
        )
        .unwrap();
        let printer = Printer::new("need_parsing", plan.description(), Some(&plan), None);

        // Execute
        let parsed = parse_command(
            &printer,
            Some(&plan),
            tokens.as_slice(),
            start,
            Some(&["sub"][..]),
        )
        .unwrap();

        // Verify
        assert_eq!(parsed.arguments.get::<i64>("four"), 12);
        assert_eq!(
            parsed.discriminee,
            Some((expected_offset, "sub".to_string()))
        );
        assert_eq!(parsed.remaining, expected_remaining);
    }

    #[test]
    fn parse_command_discriminate_missing() {
        // Setup
        let printer = Printer::new("need_parsing", "", None, None);

        // Execute
        let error =
            parse_command(&printer, None, &[], 0, Some(&["a", "b"][..])).unwrap_err();

        // Verify
        assert_matches!(
            error,
            Error::Usage(error) if error.kind() == &UsageErrorKind::MissingSubCommand {
                choices: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn report_ok() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        let result = report(Ok(1), &interface);

        // Verify
        assert_eq!(result, Ok(1));
        assert_eq!(interface.consume(), (None, None, None));
    }

    #[test]
    fn report_help() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        let result: Result<(), i32> = report(Err(Error::Help("the help".to_string())), &interface);

        // Verify
        assert_eq!(result, Err(0));
        assert_eq!(interface.consume_message(), "the help");
    }

    #[test]
    fn report_usage() {
        // Setup
        let plan = plan();
        let printer = Printer::new("parse_me", plan.description(), Some(&plan), None);
        let tokens = ["yes", "x"];
        let interface = InMemoryInterface::default();

        // Execute
        let result = report(
            parse_command(&printer, Some(&plan), &tokens, 0, None),
            &interface,
        );

        // Verify
        assert_eq!(result.unwrap_err(), 2);
        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        let error = error.unwrap();
        assert_contains!(error, "usage: parse_me [-h] [--three THREE] ONE TWO");
        assert_contains!(error, "error: invalid value for 'two': cannot convert 'x' to i64.");
        assert_eq!(error_context, Some(ErrorContext::new(1, &tokens)));
    }

    #[test]
    fn report_config() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        let result: Result<(), i32> = report(
            Err(Error::Config(ConfigError::TooFewTypes {
                callable: "f".to_string(),
            })),
            &interface,
        );

        // Verify
        assert_eq!(result, Err(1));
        let (message, error, _) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(
            error,
            Some("Config error: Not enough types provided for conversion for 'f'.".to_string())
        );
    }
}
