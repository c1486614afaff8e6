use crate::capability::{expand_capability, register_capability};
use crate::service::{expand_injectable, expand_service};
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, Error, Item, ItemTrait};

mod attributes;
mod capability;
mod service;

/// Generates field bindings from `#[inject]` attributes.
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn generate_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_injectable(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Makes a struct a service, with bindings from `#[inject]` and lifecycle hooks from
/// `#[service(init = "...", shutdown = "...")]`.
#[proc_macro_derive(Service, attributes(inject, service))]
pub fn generate_service(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_service(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Marks a trait as a capability which services can provide.
#[proc_macro_attribute]
pub fn capability(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemTrait);
    expand_capability(&item)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Registers the annotated trait implementation as a capability of the implementing service.
#[proc_macro_attribute]
pub fn provides(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as Item);
    register_capability(&item)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}
