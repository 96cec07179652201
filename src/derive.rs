//! Derive Api for `argplan` configuration.
//!
//! ### Getting Started
//! Use the derive Api by instrumenting a struct `S` with `#[derive(Command)]`.
//! This implements the [`Command`](../prelude/trait.Command.html) trait, which parses `S` from the Cli via `S::parse()`.
//! The struct is the callable: its fields are the parameters, and its doc comment is the docstring.
//!
//! ```no_run
#![doc = include_str!("../demos/derived.rs")]
//! ```
//!
//! ### Parameter Configuration
//! Each field is declared as a [`Parameter`](../struct.Parameter.html), in field order:
//! ```console
//! Field                                 | Parameter
//! ---------------------------------------------------------------------------------
//! name: T                               | Parameter::new("name").typed::<T>()
//! name: Option<T>                       | Parameter::new("name").typed::<T>().none_default()
//! #[command(default = EXPR)] name: T    | Parameter::new("name").typed::<T>().default::<T>(EXPR)
//! ```
//!
//! So, a field without a default is a positional argument, while a field with a default (including `Option<T>`) is an option.
//! A `bool` field is a flag.
//! A string literal default is converted into the field's type via `Into`, so that `String` fields may take `default = "abc"`.
//!
//! ### Command Configuration
//! The struct accepts the attribute `#[command(..)]`, with the keys:
//! * `name = ".."`: the callable name (defaults to the struct name, in snake case).
//! * `program = ".."`: the program name shown in the usage (defaults to `env!("CARGO_CRATE_NAME")`).
//! * `delimiter = ".."`: the docstring delimiter between a parameter name and its help (defaults to `":"`).
//!
//! Unknown keys, enums, tuple structs, and generic structs are rejected at compile time.
//!
//! ```
//! use argplan::{derive::*, prelude::*};
//!
//! /// Convert a temperature.
//! ///
//! /// Args:
//! ///     degrees -> the temperature to convert
//! #[derive(Debug, PartialEq, Command)]
//! #[command(program = "convert", delimiter = "->")]
//! struct Convert {
//!     degrees: f64,
//!     #[command(default = "celsius")]
//!     unit: String,
//! }
//!
//! assert_eq!(
//!     Convert::call_tokens(&["-40"]).unwrap(),
//!     Convert {
//!         degrees: -40.0,
//!         unit: "celsius".to_string(),
//!     }
//! );
//! ```
pub use argplan_derive::*;
