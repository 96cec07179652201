use crate::load::command_attributes;
use crate::model::{DeriveCommand, DeriveField, DeriveValue};
use quote::quote;

const STRUCT_KEYS: [&str; 3] = ["name", "program", "delimiter"];

impl TryFrom<syn::DeriveInput> for DeriveCommand {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        if !value.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &value.generics,
                "Invalid - `Command` cannot be derived for a generic struct.",
            ));
        }

        let mut attributes = command_attributes(&value.attrs, &STRUCT_KEYS)?;
        let struct_name = value.ident.clone();
        let command_name = attributes.pairs.remove("name").unwrap_or_else(|| {
            let name = snake_case(&struct_name.to_string());
            DeriveValue {
                tokens: quote! { #name },
            }
        });
        let program = attributes.pairs.remove("program").unwrap_or(DeriveValue {
            tokens: quote! { env!("CARGO_CRATE_NAME") },
        });

        let fields = match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => fields
                .named
                .iter()
                .map(DeriveField::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Vec::default(),
            _ => {
                return Err(syn::Error::new_spanned(
                    &value.ident,
                    "Invalid - `Command` can only be derived for a struct with named fields.",
                ))
            }
        };

        Ok(DeriveCommand {
            struct_name,
            command_name,
            program,
            delimiter: attributes.pairs.remove("delimiter"),
            docstring: docstring(&value.attrs),
            fields,
        })
    }
}

/// The doc comment, one line per `///` (or `#[doc = ".."]`) attribute.
fn docstring(attrs: &[syn::Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attribute| attribute.path().is_ident("doc"))
        .filter_map(|attribute| match &attribute.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(line),
                        ..
                    }),
                ..
            }) => Some(line.value()),
            _ => None,
        })
        .map(|line| match line.strip_prefix(' ') {
            Some(stripped) => stripped.to_string(),
            None => line,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// A run of capitals is one word, whose last capital may start the next word (`HTTPServer` is `http_server`).
fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::default();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let previous = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());

            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_lower)
            {
                out.push('_');
            }
        }

        out.extend(c.to_lowercase());
    }

    out
}
