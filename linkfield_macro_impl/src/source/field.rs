use syn::ext::IdentExt;

use super::rename::RenameRule;

/// Parsed named field of the source struct
#[derive(Clone)]
pub struct SourceField {
    /// Rust name of the field
    pub ident: syn::Ident,
    /// Attribute name, the field is looked up by
    pub name: String,
    pub skip: bool,
}

#[derive(Default, deluxe::ExtractAttributes)]
#[deluxe(attributes(linkfield), default)]
pub struct FieldMeta {
    pub rename: Option<syn::LitStr>,
    pub skip: deluxe::Flag,
}

impl SourceField {
    pub fn parse(mut field: syn::Field, rename_all: Option<RenameRule>) -> syn::Result<Self> {
        let meta: FieldMeta = deluxe::extract_attributes(&mut field)?;

        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(&field, "Expected a named field."));
        };

        let name = match (&meta.rename, rename_all) {
            (Some(lit), _) => lit.value(),
            (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
            (None, None) => ident.unraw().to_string(),
        };

        Ok(Self {
            ident,
            name,
            skip: meta.skip.is_set(),
        })
    }
}
