use crate::load::command_attributes;
use crate::model::{DeriveField, DeriveValue, FieldKind};
use quote::ToTokens;

const FIELD_KEYS: [&str; 1] = ["default"];

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = value
            .ident
            .clone()
            .expect("internal error - named fields always have an ident");
        let mut attributes = command_attributes(&value.attrs, &FIELD_KEYS)?;
        let (kind, value_type) = match option_inner(&value.ty) {
            Some(inner) => (FieldKind::Optional, inner),
            None => (FieldKind::Value, &value.ty),
        };

        Ok(DeriveField {
            field_name,
            value_type: DeriveValue {
                tokens: value_type.to_token_stream(),
            },
            kind,
            default: attributes.pairs.remove("default"),
        })
    }
}

/// The `T` of an `Option<T>` type.
fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };

    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;

    if segment.ident != "Option" {
        return None;
    }

    match &segment.arguments {
        syn::PathArguments::AngleBracketed(arguments) if arguments.args.len() == 1 => {
            match arguments.args.first() {
                Some(syn::GenericArgument::Type(inner)) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}
