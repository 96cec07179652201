//! Traits which, typically, may be imported without concern: `use argplan::prelude::*`.

pub use crate::api::Command;
