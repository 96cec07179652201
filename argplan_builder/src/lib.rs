//! Builder module for `argplan`.
//! See the `argplan` crate root for full details.
mod api;
mod constant;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{
    Action, CallablePlan, ConfigError, Error, ErrorContext, HelpIndex, ParseRule, UsageError,
    UsageErrorKind,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
