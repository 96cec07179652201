pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const CLASS_HELP_MESSAGE: &str = "Display this help message";

/// The delimiter separating a parameter name from its help message in a docstring.
pub(crate) const DEFAULT_DELIMITER: &str = ":";

/// Parameter names which denote the receiver of a method.
pub(crate) const RECEIVER_NAMES: [&str; 2] = ["self", "cls"];

pub(crate) const OPTION_TERMINATOR: &str = "--";

pub(crate) const USAGE_EXIT_CODE: i32 = 2;
pub(crate) const CONFIG_EXIT_CODE: i32 = 1;

pub(crate) fn default_description(callable: &str) -> String {
    format!("Argument parsing for {callable}")
}

pub(crate) fn default_help(parameter: &str) -> String {
    format!("Help message for {parameter}")
}

pub(crate) fn sub_commands_description(class: &str) -> String {
    format!("Accessible methods of {class}")
}
