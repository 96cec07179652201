extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveCommand;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Implement `argplan::Command` for a struct with named fields.
///
/// * Each field is a parameter, in declaration order, typed by the field type.
/// An `Option<T>` field is typed by `T`, and defaults to `None`.
/// * The struct's doc comment is the docstring: its first paragraph is the description, and an `Args:` style block documents the fields.
///
/// Attributes:
/// * `#[command(name = "..", program = "..", delimiter = "..")]` on the struct.
/// * `#[command(default = EXPR)]` on a field.
#[proc_macro_derive(Command, attributes(command))]
pub fn command(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    DeriveCommand::try_from(derive_input)
        .map(TokenStream2::from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
