pub mod field;
pub mod rename;

use quote::quote;

use field::SourceField;
use rename::RenameRule;

use crate::extensions::*;

/// Generate `AttributeSource` implementation for parsed struct.
pub fn implement(source: &Source) -> proc_macro2::TokenStream {
    let ident = &source.ident;

    let mut generics = source.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::core::fmt::Debug));
        param.bounds.push(syn::parse_quote!(::linkfield::serde::Serialize));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let arms = source.fields.iter().filter(|field| !field.skip).map(|field| {
        let name = &field.name;
        let id = &field.ident;

        quote!(#name => ::linkfield::Attribute::of(&self.#id),)
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics ::linkfield::AttributeSource for #ident #ty_generics #where_clause {
            fn attribute(
                &self,
                name: &str,
            ) -> ::linkfield::serde_json::Result<::linkfield::Attribute> {
                match name {
                    #(#arms)*
                    _ => ::core::result::Result::Ok(::linkfield::Attribute::Absent),
                }
            }
        }
    }
}

/// Parsed struct, deriving `Attributes`
#[derive(Clone)]
pub struct Source {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub fields: Vec<SourceField>,
}

#[derive(Default, deluxe::ExtractAttributes)]
#[deluxe(attributes(linkfield), default)]
pub struct SourceMeta {
    pub rename_all: Option<syn::LitStr>,
}

impl Source {
    pub fn parse(mut input: syn::DeriveInput) -> syn::Result<Self> {
        let meta: SourceMeta = deluxe::extract_attributes(&mut input)?;
        let rename_all = meta.rename_all.as_ref().map(RenameRule::parse).transpose()?;

        let fields = match input.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Attributes can only be derived for structs with named fields.",
                ))
            }
        };

        let fields: Vec<SourceField> = fields
            .into_iter()
            .map(|field| SourceField::parse(field, rename_all))
            .collect_syn_results()?;

        validate_names(&fields)?;

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            fields,
        })
    }
}

fn validate_names(fields: &[SourceField]) -> syn::Result<()> {
    let mut errors: Option<syn::Error> = None;
    let visible: Vec<_> = fields.iter().filter(|field| !field.skip).collect();

    for (idx, field) in visible.iter().enumerate() {
        if visible[..idx].iter().any(|other| other.name == field.name) {
            errors.combine(syn::Error::new_spanned(
                &field.ident,
                format!("Attribute name `{}` is used by more than one field.", field.name),
            ));
        }
    }

    match errors {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
