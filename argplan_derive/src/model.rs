use proc_macro2::TokenStream as TokenStream2;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        let st = &self.tokens.to_string();
        let ot = &other.tokens.to_string();
        st == ot
    }
}

impl Eq for DeriveValue {}

/// The `key = value` pairs of a `#[command(..)]` attribute.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeriveAttributes {
    pub pairs: HashMap<String, DeriveValue>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A field of type `T`, read back as a `T`.
    Value,
    /// A field of type `Option<T>`, read back as an `Option<T>`.
    /// Without an explicit default, it defaults to `None`.
    Optional,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveField {
    pub field_name: syn::Ident,
    /// The type parsed from the Cli (the `T` of an `Option<T>`).
    pub value_type: DeriveValue,
    pub kind: FieldKind,
    pub default: Option<DeriveValue>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveCommand {
    pub struct_name: syn::Ident,
    pub command_name: DeriveValue,
    pub program: DeriveValue,
    pub delimiter: Option<DeriveValue>,
    pub docstring: Option<String>,
    pub fields: Vec<DeriveField>,
}
