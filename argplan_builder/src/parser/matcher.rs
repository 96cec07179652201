use std::collections::HashMap;

use crate::constant::{HELP_NAME, HELP_SHORT, OPTION_TERMINATOR};
use crate::parser::base::UsageErrorKind;
use crate::parser::plan::CallablePlan;

/// A token's index in the input, along with its (possibly partial) value.
pub(crate) type OffsetValue = (usize, String);

/// The input tokens aligned to the parse rules of a plan, still as raw strings.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Matches {
    pub(crate) positionals: Vec<OffsetValue>,
    /// The last occurrence of each option, with its value (if the option takes one).
    pub(crate) options: HashMap<String, (usize, Option<String>)>,
    pub(crate) help: bool,
    /// The sub-command token, when discriminating.
    pub(crate) discriminee: Option<OffsetValue>,
    /// The index of the first token after the discriminee.
    pub(crate) remaining: usize,
}

/// Align the `tokens` to the rules of `plan`.
///
/// When sub-command `choices` are given, the first positional token beyond the plan's positional arguments is the discriminee (sub-command), and matching stops there.
/// The tokens following it are left for the sub-command.
/// Otherwise, all tokens must be matched.
pub(crate) fn match_tokens(
    plan: Option<&CallablePlan>,
    tokens: &[&str],
    choices: Option<&[&str]>,
) -> Result<Matches, (usize, UsageErrorKind)> {
    match match_inner(plan, tokens, choices.is_some()) {
        Ok(matches) => Ok(matches),
        // Help takes precedence over whatever is wrong with the input.
        Err(_) if requests_help(tokens, choices.unwrap_or_default()) => Ok(Matches {
            help: true,
            remaining: tokens.len(),
            ..Matches::default()
        }),
        Err(error) => Err(error),
    }
}

fn match_inner(
    plan: Option<&CallablePlan>,
    tokens: &[&str],
    discriminate: bool,
) -> Result<Matches, (usize, UsageErrorKind)> {
    // Option name to whether it takes a value.
    let options: HashMap<&str, bool> = plan
        .map(|p| {
            p.optionals()
                .map(|rule| (rule.name(), rule.takes_value()))
                .collect()
        })
        .unwrap_or_default();
    let positional_count = plan.map(|p| p.positionals().count()).unwrap_or(0);
    let mut matches = Matches {
        remaining: tokens.len(),
        ..Matches::default()
    };
    let mut only_positional = false;
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index];
        let offset = index;
        index += 1;

        if !only_positional && token == OPTION_TERMINATOR {
            only_positional = true;
        } else if !only_positional && is_help(token) {
            matches.help = true;
        } else if !only_positional && is_long_option(token) {
            let (name, inline) = match token[2..].split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (&token[2..], None),
            };

            match options.get(name) {
                None => {
                    return Err((
                        offset,
                        UsageErrorKind::UnknownOption {
                            option: token.to_string(),
                        },
                    ))
                }
                Some(false) => {
                    if inline.is_some() {
                        return Err((
                            offset,
                            UsageErrorKind::UnexpectedValue {
                                option: name.to_string(),
                            },
                        ));
                    }

                    matches.options.insert(name.to_string(), (offset, None));
                }
                Some(true) => {
                    let value = match inline {
                        Some(value) => value,
                        None => match tokens.get(index) {
                            Some(next) if !is_option_like(next) => {
                                index += 1;
                                next.to_string()
                            }
                            _ => {
                                return Err((
                                    offset,
                                    UsageErrorKind::MissingValue {
                                        option: name.to_string(),
                                    },
                                ))
                            }
                        },
                    };

                    matches
                        .options
                        .insert(name.to_string(), (offset, Some(value)));
                }
            }
        } else if !only_positional && is_option_like(token) {
            return Err((
                offset,
                UsageErrorKind::UnknownOption {
                    option: token.to_string(),
                },
            ));
        } else if matches.positionals.len() < positional_count {
            matches.positionals.push((offset, token.to_string()));
        } else if discriminate {
            matches.discriminee = Some((offset, token.to_string()));
            matches.remaining = index;
            break;
        } else {
            return Err((
                offset,
                UsageErrorKind::UnexpectedArguments {
                    tokens: tokens[offset..].iter().map(|t| t.to_string()).collect(),
                },
            ));
        }
    }

    Ok(matches)
}

/// Whether a help switch appears before the option terminator and before any sub-command name.
/// Tokens from a sub-command name onwards belong to that sub-command.
fn requests_help(tokens: &[&str], choices: &[&str]) -> bool {
    tokens
        .iter()
        .take_while(|token| **token != OPTION_TERMINATOR && !choices.contains(*token))
        .any(|token| is_help(token))
}

fn is_help(token: &str) -> bool {
    match token.strip_prefix("--") {
        Some(name) => name == HELP_NAME,
        None => {
            let mut chars = token.chars();
            chars.next() == Some('-') && chars.next() == Some(HELP_SHORT) && chars.next().is_none()
        }
    }
}

fn is_long_option(token: &str) -> bool {
    token.len() > 2 && token.starts_with("--")
}

/// Whether the token looks like an option, rather than a value.
/// Negative numbers are values.
fn is_option_like(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && token[1..].parse::<f64>().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Parameter;
    use rstest::rstest;

    fn plan() -> CallablePlan {
        CallablePlan::build(
            "parse_me",
            &[
                Parameter::new("one").typed::<String>(),
                Parameter::new("two").typed::<i64>(),
                Parameter::new("three").typed::<i64>().default(12i64),
                Parameter::new("flag").typed::<bool>().default(false),
            ],
            &[],
            None,
            ":",
        )
        .unwrap()
    }

    fn positionals(values: Vec<(usize, &str)>) -> Vec<OffsetValue> {
        values
            .into_iter()
            .map(|(offset, value)| (offset, value.to_string()))
            .collect()
    }

    #[rstest]
    #[case(vec!["yes", "2"], vec![(0, "yes"), (1, "2")], vec![])]
    #[case(vec!["no", "3", "--three", "2"], vec![(0, "no"), (1, "3")], vec![("three", 2, Some("2"))])]
    #[case(vec!["--three", "2", "no", "3"], vec![(2, "no"), (3, "3")], vec![("three", 0, Some("2"))])]
    #[case(vec!["no", "--three=2", "3"], vec![(0, "no"), (2, "3")], vec![("three", 1, Some("2"))])]
    #[case(vec!["no", "--three", "1", "--three", "2", "3"], vec![(0, "no"), (5, "3")], vec![("three", 3, Some("2"))])]
    #[case(vec!["no", "3", "--flag"], vec![(0, "no"), (1, "3")], vec![("flag", 2, None)])]
    #[case(vec!["no", "-3"], vec![(0, "no"), (1, "-3")], vec![])]
    #[case(vec!["no", "--three", "-3", "4"], vec![(0, "no"), (3, "4")], vec![("three", 1, Some("-3"))])]
    #[case(vec!["--", "--flag", "-x"], vec![(1, "--flag"), (2, "-x")], vec![])]
    #[case(vec![], vec![], vec![])]
    fn match_tokens_function(
        #[case] tokens: Vec<&str>,
        #[case] expected_positionals: Vec<(usize, &str)>,
        #[case] expected_options: Vec<(&str, usize, Option<&str>)>,
    ) {
        // Setup
        let plan = plan();

        // Execute
        let matches = match_tokens(Some(&plan), tokens.as_slice(), None).unwrap();

        // Verify
        assert!(!matches.help);
        assert_eq!(matches.positionals, positionals(expected_positionals));
        assert_eq!(
            matches.options,
            expected_options
                .into_iter()
                .map(|(name, offset, value)| (
                    name.to_string(),
                    (offset, value.map(|v| v.to_string()))
                ))
                .collect::<HashMap<_, _>>()
        );
        assert_eq!(matches.discriminee, None);
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["--help"])]
    #[case(vec!["yes", "--help"])]
    #[case(vec!["--three", "--help"])]
    #[case(vec!["--unknown", "-h"])]
    #[case(vec!["a", "b", "c", "-h"])]
    fn match_tokens_help(#[case] tokens: Vec<&str>) {
        // Setup
        let plan = plan();

        // Execute
        let matches = match_tokens(Some(&plan), tokens.as_slice(), None).unwrap();

        // Verify
        assert!(matches.help);
    }

    #[test]
    fn match_tokens_help_after_terminator() {
        // Setup
        let plan = plan();

        // Execute
        let matches = match_tokens(Some(&plan), &["--", "-h"], None).unwrap();

        // Verify
        assert!(!matches.help);
        assert_eq!(matches.positionals, positionals(vec![(1, "-h")]));
    }

    #[rstest]
    #[case(vec!["--four", "1"], 0, UsageErrorKind::UnknownOption { option: "--four".to_string() })]
    #[case(vec!["yes", "-x"], 1, UsageErrorKind::UnknownOption { option: "-x".to_string() })]
    #[case(vec!["yes", "--three"], 1, UsageErrorKind::MissingValue { option: "three".to_string() })]
    #[case(vec!["--three", "--flag"], 0, UsageErrorKind::MissingValue { option: "three".to_string() })]
    #[case(vec!["--flag=true"], 0, UsageErrorKind::UnexpectedValue { option: "flag".to_string() })]
    #[case(vec!["a", "1", "b", "c"], 2, UsageErrorKind::UnexpectedArguments { tokens: vec!["b".to_string(), "c".to_string()] })]
    fn match_tokens_error(
        #[case] tokens: Vec<&str>,
        #[case] expected_offset: usize,
        #[case] expected: UsageErrorKind,
    ) {
        // Setup
        let plan = plan();

        // Execute
        let error = match_tokens(Some(&plan), tokens.as_slice(), None).unwrap_err();

        // Verify
        assert_eq!(error, (expected_offset, expected));
    }

    #[rstest]
    #[case(vec!["12", "multiply", "2"], vec![(0, "12"), (1, "multiply")], 2)]
    #[case(vec!["12", "multiply", "-h"], vec![(0, "12"), (1, "multiply")], 2)]
    #[case(vec!["12", "multiply", "--num", "x"], vec![(0, "12"), (1, "multiply")], 2)]
    #[case(vec!["12", "multiply"], vec![(0, "12"), (1, "multiply")], 2)]
    fn match_tokens_discriminate(
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<(usize, &str)>,
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

        // Execute
        let matches =
            match_tokens(Some(&plan), tokens.as_slice(), Some(&["multiply"][..])).unwrap();

        // Verify
        assert!(!matches.help);
        assert_eq!(matches.positionals, positionals(vec![expected[0]]));
        assert_eq!(
            matches.discriminee,
            Some((expected[1].0, expected[1].1.to_string()))
        );
        assert_eq!(matches.remaining, expected_remaining);
    }

    #[test]
    fn match_tokens_discriminate_without_plan() {
        // Execute
        let matches = match_tokens(None, &["do-stuff", "12"], Some(&["do-stuff"][..])).unwrap();

        // Verify
        assert!(matches.positionals.is_empty());
        assert_eq!(matches.discriminee, Some((0, "do-stuff".to_string())));
        assert_eq!(matches.remaining, 1);
    }

    #[test]
    fn match_tokens_discriminate_missing() {
        // Execute
        let matches = match_tokens(None, &[], Some(&["do-stuff"][..])).unwrap();

        // Verify
        assert_eq!(matches.discriminee, None);
        assert_eq!(matches.remaining, 0);
    }

    #[rstest]
    #[case(vec!["--bogus", "add", "-h"], 0, UsageErrorKind::UnknownOption { option: "--bogus".to_string() })]
    #[case(vec!["--bogus", "add", "--help"], 0, UsageErrorKind::UnknownOption { option: "--bogus".to_string() })]
    #[case(vec!["-x", "12", "add", "-h"], 0, UsageErrorKind::UnknownOption { option: "-x".to_string() })]
    fn match_tokens_discriminate_sub_command_help(
        #[case] tokens: Vec<&str>,
        #[case] expected_offset: usize,
        #[case] expected: UsageErrorKind,
    ) {
        // Setup
        let plan = CallablePlan::build(
            "__init__",
            &[Parameter::new("start").typed::<i64>()],
            &[],
            None,
            ":",
        )
        .unwrap();

        // Execute
        let error =
            match_tokens(Some(&plan), tokens.as_slice(), Some(&["add"][..])).unwrap_err();

        // Verify
        assert_eq!(error, (expected_offset, expected));
    }

    #[test]
    fn match_tokens_discriminate_help() {
        // Setup
        let plan = CallablePlan::build(
            "__init__",
            &[Parameter::new("start").typed::<i64>()],
            &[],
            None,
            ":",
        )
        .unwrap();

        // Execute
        let matches =
            match_tokens(Some(&plan), &["--bogus", "-h", "add"], Some(&["add"][..])).unwrap();

        // Verify
        assert!(matches.help);
    }

    #[rstest]
    #[case("-h", true)]
    #[case("--help", true)]
    #[case("--h", false)]
    #[case("-help", false)]
    #[case("help", false)]
    fn help_token(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_help(token), expected);
    }

    #[rstest]
    #[case("-x", true)]
    #[case("--x", true)]
    #[case("-", false)]
    #[case("-3", false)]
    #[case("-3.5", false)]
    #[case("x", false)]
    fn option_like(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_option_like(token), expected);
    }
}
