use std::collections::HashMap;

use crate::constant::{default_description, default_help};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The help message of each parameter, by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HelpIndex(HashMap<String, String>);

impl HelpIndex {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The documented parameter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl<const N: usize> From<[(&str, &str); N]> for HelpIndex {
    fn from(value: [(&str, &str); N]) -> Self {
        HelpIndex(
            value
                .into_iter()
                .map(|(name, help)| (name.to_string(), help.to_string()))
                .collect(),
        )
    }
}

/// Extract the description and parameter help messages from the `docstring` of `callable`.
///
/// * The lines up to the first blank line form the description.
/// * After that, a line `NAME <delimiter> HELP` documents the parameter `NAME`.
/// The lines following it (up to the next documented parameter) continue its help message.
/// * The first blank line after a parameter has been documented ends the extraction.
/// This skips trailing sections (ex: `Returns:`), but also the parameters documented after a blank line *within* the parameter block.
///
/// Every parameter in `parameter_names` is given a help message, defaulting to `"Help message for NAME"`.
pub(crate) fn extract_help(
    callable: &str,
    docstring: Option<&str>,
    parameter_names: &[&str],
    delimiter: &str,
) -> (String, HelpIndex) {
    #[cfg(feature = "tracing_debug")]
    {
        debug!("Preparing doc for '{callable}'.");
    }

    let docstring = match docstring {
        Some(d) if !d.is_empty() => d,
        _ => {
            return (
                default_description(callable),
                with_defaults(parameter_names, HashMap::default()),
            )
        }
    };

    let mut description: Vec<&str> = Vec::default();
    let mut helps: HashMap<String, String> = HashMap::default();
    let mut fill_description = true;
    let mut active: Option<String> = None;

    for line in docstring.lines() {
        let line = line.trim();

        if line.is_empty() {
            if !fill_description && !helps.is_empty() {
                break;
            }

            fill_description = false;
        } else if fill_description {
            description.push(line);
        } else {
            match split_parameter(line, delimiter) {
                Some((name, help)) => {
                    helps.insert(name.to_string(), help.to_string());
                    active.replace(name.to_string());
                }
                None => {
                    if let Some(name) = &active {
                        let help = helps
                            .get_mut(name)
                            .expect("internal error - the active parameter must have a help");
                        help.push(' ');
                        help.push_str(line);
                    }
                }
            }
        }
    }

    (description.join(" "), with_defaults(parameter_names, helps))
}

fn with_defaults(parameter_names: &[&str], mut helps: HashMap<String, String>) -> HelpIndex {
    helps.retain(|name, _| parameter_names.contains(&name.as_str()));

    for name in parameter_names {
        helps
            .entry(name.to_string())
            .or_insert_with(|| default_help(name));
    }

    HelpIndex(helps)
}

/// Match `NAME <delimiter> HELP`, where `NAME` is a word and `HELP` is non-empty.
fn split_parameter<'a>(line: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let name_end = line
        .char_indices()
        .find(|(_, c)| !is_word(*c))
        .map(|(i, _)| i)
        .unwrap_or(line.len());

    if name_end == 0 || delimiter.is_empty() {
        return None;
    }

    let (name, rest) = line.split_at(name_end);
    let help = rest.trim_start().strip_prefix(delimiter)?.trim();

    if help.is_empty() {
        None
    } else {
        Some((name, help))
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
