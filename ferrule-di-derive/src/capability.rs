use proc_macro2::TokenStream;
use quote::quote;
use std::ops::Deref;
use syn::spanned::Spanned;
use syn::{Error, Item, ItemTrait, Result, Type};

#[cfg(feature = "threadsafe")]
fn capability_bounds() -> TokenStream {
    quote!(+ Send + Sync)
}

#[cfg(not(feature = "threadsafe"))]
fn capability_bounds() -> TokenStream {
    quote!()
}

pub fn expand_capability(item: &ItemTrait) -> Result<TokenStream> {
    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let bounds = capability_bounds();

    Ok(quote! {
        #item

        #[automatically_derived]
        impl #impl_generics ferrule_di::capability::Capability for dyn #ident #ty_generics #bounds #where_clause {}
    })
}

pub fn register_capability(item: &Item) -> Result<TokenStream> {
    let Item::Impl(item_impl) = item else {
        return Err(Error::new(
            item.span(),
            "Providing capabilities is possible only on trait implementations!",
        ));
    };

    if !item_impl.generics.params.is_empty() {
        return Err(Error::new(
            item_impl.generics.span(),
            "Providing capabilities is not supported for generic implementations!",
        ));
    }

    let trait_type = item_impl
        .trait_
        .as_ref()
        .map(|(_, path, ..)| path)
        .ok_or_else(|| Error::new(item.span(), "Missing trait identifier!"))?;

    let target_type = if let Type::Path(path) = item_impl.self_ty.deref() {
        &path.path
    } else {
        return Err(Error::new(
            item_impl.self_ty.span(),
            "Capabilities can only be provided by services!",
        ));
    };

    let bounds = capability_bounds();

    Ok(quote! {
        #item

        const _: () = {
            fn register() -> ferrule_di::capability::internal::TypedCapabilityDefinition {
                ferrule_di::capability::internal::TypedCapabilityDefinition {
                    target: ::std::any::TypeId::of::<#target_type>(),
                    definition: ferrule_di::capability_of!(#target_type => dyn #trait_type #bounds),
                }
            }

            ferrule_di::capability::internal::submit! {
                ferrule_di::capability::internal::CapabilityRegisterer {
                    register
                }
            };
        };
    })
}
