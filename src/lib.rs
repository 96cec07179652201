//! `argplan` derives command line interfaces from the declared signatures and docstrings of functions, methods, and classes.
//!
//! Writing a Cli is mostly boilerplate: every parameter of the function being exposed is restated for the command line parser, along with its type, default, and help message.
//! `argplan` removes that restatement.
//! Declare the callable once, with its parameters and docstring, and `argplan` derives the parser from it:
//! * Parameters without a default are positional arguments, in declaration order.
//! * Parameters with a default are options (`--name VALUE`).
//! * `bool` parameters are flags (`--name`), which toggle away from their default.
//! * The docstring's first paragraph is the description, and its `NAME: HELP` lines are the help messages.
//!
//! The parsed values are then passed back to the callable.
//!
//! # Usage
//! This page includes a few demos on using `argplan`.
//! More examples are outlined in [the source](https://github.com/argplan/argplan/tree/main/demos).
//!
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/derived.rs")]
//! ```
//!
//! ```console
//! $ derived -h
//! usage: derived [-h] [--bananas BANANAS] [--label LABEL] [--verbose] APPLES
//!
//! Sum up some fruit.
//!
//! positional arguments:
//!   APPLES             how many apples to count
//!
//! options:
//!   -h, --help         Show this help message and exit.
//!   --bananas BANANAS  how many bananas to count
//!   --label LABEL      what to call the total
//!   --verbose          describe the counting
//!
//! $ derived 3 --bananas 4 --label=fruit
//! fruit: 7
//!
//! $ derived three
//! usage: derived [-h] [--bananas BANANAS] [--label LABEL] [--verbose] APPLES
//! error: invalid value for 'apples': cannot convert 'three' to u32.
//! three
//! ^
//! ```
//!
//! # Builder Api
//! The builder Api declares each callable explicitly.
//! * [`Function`]: a free function, whose handler takes the parsed [`Arguments`].
//! * [`Method`]: a method of `T`, whose handler also takes the instance (`&mut T`).
//! * [`Initializer`]: the initializer of `T`, which builds the instance.
//!
//! Each of these is configured with the same builder methods:
//! * `parameter`: a [`Parameter`], in declaration order.
//! A parameter may declare its type (`typed::<T>()`) and its default (`default(value)` or `none_default()`).
//! Any `T: FromStr + Debug` may be a parameter type.
//! * `docstring`: the help text, split into description and parameter help by the `delimiter` (default `":"`).
//! * `types`: the legacy alternative to declared types, a list of [`ValueType`]s applied in order to the parameters without a declared type.
//! * `name`: the exposed name (as a sub-command), in place of the callable's name.
//! * `program`: the program name shown in the usage.
//!
//! A first parameter named `self` or `cls` is the receiver, and is never parsed from the Cli.
//!
//! ```no_run
#![doc = include_str!("../demos/parse_me.rs")]
//! ```
//!
//! ```console
//! $ parse_me -h
//! usage: parse_me [-h] [--three THREE] ONE TWO
//!
//! Could use some parsing.
//!
//! positional arguments:
//!   ONE            some stuff shouldn't be written down
//!   TWO            I can turn 2 syllables words into 6 syllables words
//!
//! options:
//!   -h, --help     Show this help message and exit.
//!   --three THREE  I don't like the number three
//!
//! $ parse_me yes 2 --three 3
//! yesyes 9
//! ```
//!
//! The plan of each callable (its description, help messages, and parse rules) is built once, on first use.
//! Declaration mistakes are reported as a [`ConfigError`] at that time.
//!
//! ### Type inference
//! The conversion applied to a parameter is, in order of precedence:
//! 1. Its declared type.
//! 2. Its entry from the `types` list.
//! 3. The type of its default.
//! 4. Otherwise, the text is passed through as a `String`.
//!
//! A parameter with a `none_default()` has no type to infer from, so it must be typed by one of the first two.
//!
//! ```no_run
#![doc = include_str!("../demos/legacy_types.rs")]
//! ```
//!
//! # Classes
//! A [`Class`] collects an [`Initializer`] and [`Method`]s into a sub-command Cli.
//! The initializer's parameters are the top level arguments, after which a method is chosen as the sub-command.
//! Methods are exposed by name, with underscores replaced by hyphens.
//! Methods starting with `_` are private, and only exposed when `parse_private(true)`.
//!
//! ```no_run
#![doc = include_str!("../demos/need_parsing.rs")]
//! ```
//!
//! ```console
//! $ need_parsing 12 multiply-self-arg 2
//! 24
//!
//! $ need_parsing 12 multiply-self-arg -h
//! usage: need_parsing multiply-self-arg [-h] NUM
//!
//! Multiply the initial value.
//!
//! positional arguments:
//!   NUM         the multiplier
//!
//! options:
//!   -h, --help  Show this help message and exit.
//! ```
//!
//! # Entry points
//! Every parser offers the same family of entry points.
//! * `call_tokens(..)` / `call()`: parse the given tokens (or the process arguments), returning an [`Error`] on failure.
//! Requested help is also returned as an error (`Error::Help`), since the callable is not called.
//! * `parse_tokens(..)`: report the outcome to the user, returning the exit code on failure.
//! Help prints to stdout (exit code `0`), usage errors print to stderr (exit code `2`), and config errors print to stderr (exit code `1`).
//! * `parse()`: as `parse_tokens`, with the process arguments, exiting the process on failure.
//!
//! # Features
//! * `tracing_debug`: emit debug events (via `tracing`) while plans are built and tokens are parsed.
pub mod derive;

pub use argplan_builder::*;
