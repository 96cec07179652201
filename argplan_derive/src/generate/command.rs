use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveCommand, DeriveValue};

impl From<DeriveCommand> for TokenStream2 {
    fn from(value: DeriveCommand) -> Self {
        let DeriveCommand {
            struct_name,
            command_name: DeriveValue {
                tokens: command_name,
            },
            program: DeriveValue { tokens: program },
            delimiter,
            docstring,
            fields,
        } = value;
        let declarations: Vec<TokenStream2> = fields.iter().map(|f| f.declaration()).collect();
        let initializers: Vec<TokenStream2> = fields.iter().map(|f| f.initializer()).collect();
        let arguments = if fields.is_empty() {
            quote! { _ }
        } else {
            quote! { arguments }
        };
        let delimiter = match delimiter {
            Some(DeriveValue { tokens }) => quote! { .delimiter(#tokens) },
            None => quote! {},
        };
        let docstring = match docstring {
            Some(docstring) => quote! { .docstring(#docstring) },
            None => quote! {},
        };

        quote! {
            impl ::argplan::Command for #struct_name {
                fn function() -> ::argplan::Function<'static, Self> {
                    ::argplan::Function::new(#command_name, |#arguments| #struct_name {
                        #( #initializers ),*
                    })
                    #( #declarations )*
                    .program(#program)
                    #delimiter
                    #docstring
                }
            }
        }
    }
}
