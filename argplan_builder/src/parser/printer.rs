use crate::constant::{HELP_NAME, HELP_SHORT};
use crate::model::Mode;
use crate::parser::interface::{terminal_width, Columns};
use crate::parser::plan::{Action, CallablePlan, ParseRule};

/// The sub-commands section of a class parser's help.
#[derive(Debug, Clone)]
pub(crate) struct SubCommandListing<'a> {
    description: String,
    /// Each sub-command name, along with its description.
    commands: Vec<(&'a str, &'a str)>,
}

impl<'a> SubCommandListing<'a> {
    pub(crate) fn new(description: String, commands: Vec<(&'a str, &'a str)>) -> Self {
        Self {
            description,
            commands,
        }
    }
}

/// Renders the usage and help messages of a parser.
pub(crate) struct Printer<'a> {
    program: String,
    description: &'a str,
    plan: Option<&'a CallablePlan>,
    help_message: &'a str,
    sub_commands: Option<SubCommandListing<'a>>,
    terminal_width: Option<usize>,
}

impl<'a> Printer<'a> {
    /// A printer sized to the current terminal, if any.
    pub(crate) fn terminal(
        program: impl Into<String>,
        description: &'a str,
        plan: Option<&'a CallablePlan>,
    ) -> Self {
        Self::new(program, description, plan, terminal_width())
    }

    pub(crate) fn new(
        program: impl Into<String>,
        description: &'a str,
        plan: Option<&'a CallablePlan>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            description,
            plan,
            help_message: crate::constant::HELP_MESSAGE,
            sub_commands: None,
            terminal_width,
        }
    }

    /// Describe the help switch with `help_message`.
    pub(crate) fn help_message(mut self, help_message: &'a str) -> Self {
        self.help_message = help_message;
        self
    }

    pub(crate) fn sub_commands(mut self, listing: SubCommandListing<'a>) -> Self {
        self.sub_commands.replace(listing);
        self
    }

    fn rules(&self) -> impl Iterator<Item = &'a ParseRule> {
        self.plan.into_iter().flat_map(|plan| plan.rules().iter())
    }

    fn choices(&self) -> Option<String> {
        self.sub_commands.as_ref().map(|listing| {
            let names: Vec<&str> = listing.commands.iter().map(|(name, _)| *name).collect();
            format!("{{{}}}", names.join(","))
        })
    }

    pub(crate) fn usage(&self) -> String {
        let mut parts = vec![format!("usage: {}", self.program), format!("[-{HELP_SHORT}]")];

        for rule in self.rules().filter(|rule| rule.mode() == Mode::Optional) {
            parts.push(format!("[{}]", option_label(rule)));
        }

        for rule in self.rules().filter(|rule| rule.mode() == Mode::Positional) {
            parts.push(positional_label(rule));
        }

        if let Some(choices) = self.choices() {
            parts.push(choices);
            parts.push("...".to_string());
        }

        parts.join(" ")
    }

    pub(crate) fn help(&self) -> String {
        let help_label = format!("-{HELP_SHORT}, --{HELP_NAME}");
        let positionals: Vec<(String, String)> = self
            .rules()
            .filter(|rule| rule.mode() == Mode::Positional)
            .map(|rule| (positional_label(rule), self.help_for(rule)))
            .collect();
        let mut options: Vec<(String, String)> =
            vec![(help_label, self.help_message.to_string())];
        options.extend(
            self.rules()
                .filter(|rule| rule.mode() == Mode::Optional)
                .map(|rule| (option_label(rule), self.help_for(rule))),
        );
        let commands: Vec<(String, String)> = self
            .sub_commands
            .iter()
            .flat_map(|listing| listing.commands.iter())
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect();

        let label_width = positionals
            .iter()
            .chain(options.iter())
            .chain(commands.iter())
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let columns = Columns::fit(label_width, self.terminal_width);
        let mut lines = vec![self.usage(), String::default()];

        if !self.description.is_empty() {
            lines.push(self.description.to_string());
            lines.push(String::default());
        }

        if !positionals.is_empty() {
            lines.push("positional arguments:".to_string());
            render_section(&columns, &positionals, &mut lines);
            lines.push(String::default());
        }

        lines.push("options:".to_string());
        render_section(&columns, &options, &mut lines);

        if let Some(listing) = &self.sub_commands {
            lines.push(String::default());
            lines.push("sub-commands:".to_string());
            lines.push(format!("  {}", listing.description));
            lines.push(String::default());
            render_section(&columns, &commands, &mut lines);
        }

        lines.join("\n")
    }

    fn help_for(&self, rule: &ParseRule) -> String {
        self.plan
            .map(|plan| plan.help_for(rule))
            .expect("internal error - rules only come from the plan")
    }
}

fn render_section(columns: &Columns, rows: &[(String, String)], lines: &mut Vec<String>) {
    for (label, help) in rows {
        lines.extend(columns.render(label, help));
    }
}

fn metavar(rule: &ParseRule) -> String {
    rule.name().to_ascii_uppercase()
}

fn positional_label(rule: &ParseRule) -> String {
    metavar(rule)
}

fn option_label(rule: &ParseRule) -> String {
    match rule.action() {
        Action::Toggle { .. } => format!("--{}", rule.name()),
        Action::Convert(_) => format!("--{} {}", rule.name(), metavar(rule)),
    }
}
