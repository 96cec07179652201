/// How a parse rule is matched on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `VALUE`: required, matched by position.
    Positional,
    /// `--NAME [VALUE]`: may be left out, in which case the default applies.
    Optional,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
