use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;

use crate::model::{DeriveField, DeriveValue, FieldKind};

impl DeriveField {
    /// The parameter name, as seen by the docstring and the Cli.
    fn parameter_name(&self) -> String {
        self.field_name.unraw().to_string()
    }

    /// The `.parameter(..)` builder call which declares this field.
    pub(crate) fn declaration(&self) -> TokenStream2 {
        let DeriveValue { tokens: value_type } = &self.value_type;
        let name = self.parameter_name();
        let default = match (&self.default, &self.kind) {
            (Some(DeriveValue { tokens }), _) => {
                let value = if is_string_literal(tokens) {
                    quote! { ::core::convert::Into::<#value_type>::into(#tokens) }
                } else {
                    quote! { #tokens }
                };
                quote! { .default::<#value_type>(#value) }
            }
            (None, FieldKind::Optional) => quote! { .none_default() },
            (None, FieldKind::Value) => quote! {},
        };

        quote! {
            .parameter(::argplan::Parameter::new(#name).typed::<#value_type>() #default)
        }
    }

    /// The struct field initializer, reading this field back out of the `arguments`.
    pub(crate) fn initializer(&self) -> TokenStream2 {
        let DeriveValue { tokens: value_type } = &self.value_type;
        let field_name = &self.field_name;
        let name = self.parameter_name();

        match &self.kind {
            FieldKind::Value => quote! {
                #field_name: arguments.get::<#value_type>(#name)
            },
            FieldKind::Optional => quote! {
                #field_name: arguments.get_optional::<#value_type>(#name)
            },
        }
    }
}

/// Whether the `tokens` are a string literal, such as `"abc"`.
/// These are converted into the field type, so that a `String` (or similar) field may take a `&str` default.
fn is_string_literal(tokens: &TokenStream2) -> bool {
    matches!(
        syn::parse2::<syn::Lit>(tokens.clone()),
        Ok(syn::Lit::Str(_))
    )
}
