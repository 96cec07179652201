mod base;
mod docstring;
mod interface;
mod invoke;
mod matcher;
mod middleware;
mod plan;
mod printer;

pub use base::*;
pub use docstring::HelpIndex;
pub(crate) use docstring::extract_help;
pub use plan::*;

pub(crate) use interface::*;
pub(crate) use middleware::*;
pub(crate) use printer::*;
