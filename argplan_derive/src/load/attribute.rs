use crate::model::{DeriveAttributes, DeriveValue};
use quote::ToTokens;
use std::collections::HashMap;

impl TryFrom<&syn::Attribute> for DeriveAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
        let expressions = value.parse_args_with(attributes_parser)?;
        let mut pairs = HashMap::default();

        for expression in expressions {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let key = match assignment.left.as_ref() {
                        syn::Expr::Path(path) => path.path.get_ident().map(|i| i.to_string()),
                        _ => None,
                    };

                    match key {
                        Some(key) => {
                            // Within a single attribute, the last assignment wins.
                            pairs.insert(
                                key,
                                DeriveValue {
                                    tokens: assignment.right.to_token_stream(),
                                },
                            );
                        }
                        None => {
                            return Err(syn::Error::new_spanned(
                                &assignment.left,
                                "Invalid - attribute key must be an identifier.",
                            ))
                        }
                    }
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        &other,
                        format!(
                            "Invalid - unparseable attribute `{}`, expected `key = value`.",
                            other.to_token_stream()
                        ),
                    ))
                }
            };
        }

        Ok(Self { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use syn::parse_quote;

    #[test]
    fn construct_derive_attributes_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[command()]
        };

        // Execute
        let derive_attributes = DeriveAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(derive_attributes, DeriveAttributes::default());
    }

    #[test]
    fn construct_derive_attributes() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[command(name = "abc", default = 1 + 2)]
        };

        // Execute
        let derive_attributes = DeriveAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            derive_attributes,
            DeriveAttributes {
                pairs: HashMap::from([
                    (
                        "name".to_string(),
                        DeriveValue {
                            tokens: Literal::string("abc").into_token_stream(),
                        }
                    ),
                    (
                        "default".to_string(),
                        DeriveValue {
                            tokens: quote::quote! { 1 + 2 },
                        }
                    ),
                ])
            }
        );
    }

    #[test]
    fn construct_derive_attributes_repeated() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[command(name = "abc", name = "def")]
        };

        // Execute
        let derive_attributes = DeriveAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            derive_attributes.pairs.get("name"),
            Some(&DeriveValue {
                tokens: Literal::string("def").into_token_stream(),
            })
        );
    }

    #[test]
    fn construct_derive_attributes_no_arguments() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[command]
        };

        // Execute
        let result = DeriveAttributes::try_from(&attribute);

        // Verify
        assert!(result.is_err());
    }

    #[test]
    fn construct_derive_attributes_singleton() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[command(abc)]
        };

        // Execute
        let error = DeriveAttributes::try_from(&attribute).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Invalid - unparseable attribute `abc`, expected `key = value`."
        );
    }

    #[test]
    fn construct_derive_attributes_complex_key() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[command(a.b = 1)]
        };

        // Execute
        let error = DeriveAttributes::try_from(&attribute).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Invalid - attribute key must be an identifier."
        );
    }
}
