use crate::parser::base::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Never wrap the help column narrower than this.
/// At an average word length of 5, this fits 3 words with spaces between them.
pub(crate) const MINIMUM_HELP_WIDTH: usize = 17;

/// The gap between the two columns.
const GUTTER: usize = 2;

/// The indent of every column row.
pub(crate) const INDENT: usize = 2;

/// Left labels longer than this are given a line of their own.
const MAXIMUM_LABEL_WIDTH: usize = 24;

/// A two column layout: a label on the left, and its (word wrapped) help on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Columns {
    label: usize,
    /// `None` means the help is never wrapped.
    help: Option<usize>,
}

impl Columns {
    /// Fit the columns for labels of at most `label` characters within `total` characters.
    pub(crate) fn fit(label: usize, total: Option<usize>) -> Self {
        let label = std::cmp::min(label, MAXIMUM_LABEL_WIDTH);
        let help = total.map(|total| {
            let used = INDENT + label + GUTTER;
            let fitted = total.saturating_sub(used);

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Fitting help column of {fitted} into {total} (label {label}).");
            }

            std::cmp::max(fitted, MINIMUM_HELP_WIDTH)
        });

        Self { label, help }
    }

    pub(crate) fn render(&self, label: &str, help: &str) -> Vec<String> {
        let width = self.label;
        let gutter = " ".repeat(GUTTER);
        let indent = " ".repeat(INDENT);
        let blank = format!("{indent}{:width$}{gutter}", "");
        let parts = match self.help {
            Some(help_width) => chunk(help, help_width),
            None => vec![help.to_string()],
        };
        let mut out = Vec::default();
        let mut parts = parts.into_iter().filter(|part| !part.is_empty());

        if label.chars().count() > width {
            out.push(format!("{indent}{label}"));
        } else {
            match parts.next() {
                Some(first) => out.push(format!("{indent}{label:width$}{gutter}{first}")),
                None => out.push(format!("{indent}{label}")),
            }
        }

        out.extend(parts.map(|part| format!("{blank}{part}")));
        out
    }
}

/// Word wrap the `paragraph` into lines of at most `width` characters.
/// Words longer than the width are hyphenated.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let length = word.chars().count();

        if current.is_empty() {
            current = split_long(word, width, &mut lines);
        } else if current.chars().count() + 1 + length <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = split_long(word, width, &mut lines);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Push the hyphenated pieces of `word` which fill whole lines, returning the remainder.
fn split_long(word: &str, width: usize, lines: &mut Vec<String>) -> String {
    let chars: Vec<char> = word.chars().collect();

    if width < 2 || chars.len() <= width {
        return word.to_string();
    }

    let step = width - 1;
    let mut pieces = chars.chunks(step).peekable();
    let mut remainder = String::default();

    while let Some(piece) = pieces.next() {
        let piece: String = piece.iter().collect();

        if pieces.peek().is_some() {
            lines.push(format!("{piece}-"));
        } else {
            remainder = piece;
        }
    }

    remainder
}

/// The terminal width, if there is one.
pub(crate) fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(width), _)| width as usize)
}

/// Where messages to the user are written.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: String);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: String) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
        error_context: RefCell<Option<ErrorContext>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, error: String) {
            self.errors.borrow_mut().push(error);
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Only one context is ever reported per parse.
            self.error_context.borrow_mut().replace(error_context);
        }
    }

    impl InMemoryInterface {
        /// The printed messages, errors, and error context.
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let InMemoryInterface {
                messages,
                errors,
                error_context,
            } = self;
            let messages = messages.into_inner();
            let errors = errors.into_inner();

            (
                (!messages.is_empty()).then(|| messages.join("\n")),
                (!errors.is_empty()).then(|| errors.join("\n")),
                error_context.into_inner(),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap()
        }
    }
}
