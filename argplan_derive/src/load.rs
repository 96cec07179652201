mod attribute;
mod command;
mod field;

use crate::model::DeriveAttributes;

pub(self) const ATTRIBUTE: &str = "command";

/// Gather the `#[command(..)]` attributes, rejecting any key not in `allowed`.
pub(self) fn command_attributes(
    attrs: &[syn::Attribute],
    allowed: &[&str],
) -> Result<DeriveAttributes, syn::Error> {
    let mut attributes = DeriveAttributes::default();

    for attribute in attrs {
        if attribute.path().is_ident(ATTRIBUTE) {
            let DeriveAttributes { pairs } = DeriveAttributes::try_from(attribute)?;

            for (key, value) in pairs {
                if !allowed.contains(&key.as_str()) {
                    return Err(syn::Error::new_spanned(
                        attribute,
                        format!(
                            "Invalid - unknown key `{key}`, expected one of: {}.",
                            allowed.join(", ")
                        ),
                    ));
                }

                if attributes.pairs.insert(key.clone(), value).is_some() {
                    return Err(syn::Error::new_spanned(
                        attribute,
                        format!("Invalid - key `{key}` cannot be given more than once."),
                    ));
                }
            }
        }
    }

    Ok(attributes)
}
