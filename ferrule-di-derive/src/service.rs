use crate::attributes::{FieldAttributes, ServiceAttributes};
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::spanned::Spanned;
use syn::{Attribute, Data, DataStruct, DeriveInput, Error, Field, Fields, Index, Result};

const INJECT: &str = "inject";
const SERVICE: &str = "service";

fn extract_field_attributes(field: &Field) -> Result<Option<FieldAttributes>> {
    field
        .attrs
        .iter()
        .filter(|attribute| attribute.path().is_ident(INJECT))
        .map(FieldAttributes::try_from)
        .next()
        .transpose()
}

fn extract_service_attributes(attributes: &[Attribute]) -> Result<ServiceAttributes> {
    attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident(SERVICE))
        .map(ServiceAttributes::try_from)
        .next()
        .transpose()
        .map(Option::unwrap_or_default)
}

fn generate_binding(
    input: &DeriveInput,
    field: &Field,
    index: usize,
    attributes: FieldAttributes,
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let turbofish = ty_generics.as_turbofish();
    let field_ty = &field.ty;

    let (name, member, embedded) = match &field.ident {
        Some(field_ident) => (
            field_ident.to_string(),
            field_ident.to_token_stream(),
            false,
        ),
        None => {
            let index = Index::from(index);
            (index.index.to_string(), index.to_token_stream(), true)
        }
    };

    let mut modifiers = Vec::new();
    if attributes.optional {
        modifiers.push(quote!(.optional()));
    }
    if attributes.skip {
        modifiers.push(quote!(.skip()));
    }
    if let Some(name) = &attributes.name {
        modifiers.push(quote!(.named(#name)));
    }
    if embedded {
        modifiers.push(quote!(.embedded()));
    }

    quote! {
        {
            fn access #impl_generics (target: &mut #ident #ty_generics) -> &mut #field_ty #where_clause {
                &mut target.#member
            }

            ferrule_di::binding::FieldBinding::new(#name, access #turbofish) #(#modifiers)*
        }
    }
}

fn generate_bindings(input: &DeriveInput) -> Result<Vec<TokenStream>> {
    let Data::Struct(DataStruct { fields, .. }) = &input.data else {
        return Err(Error::new(
            input.span(),
            "Can only derive injection on structs!",
        ));
    };

    let fields: Vec<&Field> = match fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Unit => vec![],
    };

    fields
        .into_iter()
        .enumerate()
        .filter_map(|(index, field)| {
            extract_field_attributes(field)
                .map(|attributes| {
                    attributes.map(|attributes| generate_binding(input, field, index, attributes))
                })
                .transpose()
        })
        .try_collect()
}

pub fn expand_injectable(input: &DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let bindings = generate_bindings(input)?;

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ferrule_di::binding::Injectable for #ident #ty_generics #where_clause {
            fn bindings() -> ferrule_di::binding::Bindings<Self> {
                ferrule_di::binding::Bindings::new()
                    #(.with(#bindings))*
            }
        }
    })
}

pub fn expand_service(input: &DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let injectable = expand_injectable(input)?;
    let attributes = extract_service_attributes(&input.attrs)?;

    let initializer = attributes.init.map(|path| {
        quote! {
            fn initializer() -> Option<ferrule_di::service::Initializer<Self>> {
                Some(ferrule_di::service::Initializer::new(#path))
            }
        }
    });
    let shutdown_hook = attributes.shutdown.map(|path| {
        quote! {
            fn shutdown_hook() -> Option<ferrule_di::service::ShutdownHook<Self>> {
                Some(#path as ferrule_di::service::ShutdownHook<Self>)
            }
        }
    });

    Ok(quote! {
        #injectable

        #[automatically_derived]
        impl #impl_generics ferrule_di::capability::Capability for #ident #ty_generics #where_clause {}

        #[automatically_derived]
        impl #impl_generics ferrule_di::service::Service for #ident #ty_generics #where_clause {
            #initializer
            #shutdown_hook
        }
    })
}
