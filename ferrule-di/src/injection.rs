//! The field injection pass behind [Injector::prepare](crate::injector::Injector::prepare).

use crate::binding::{FieldBinding, Injectable};
use crate::error::{InjectorError, ResolutionError};
use crate::resolver::{ResolvedService, ServiceResolver};
use tracing::debug;

/// Injects all bound fields of `target`, in declaration order. Stops at the first error, leaving
/// already injected fields in place.
pub(crate) fn inject_fields<T: Injectable, R: ServiceResolver + ?Sized>(
    target: &mut T,
    resolver: &R,
    debug: bool,
) -> Result<(), InjectorError> {
    let bindings = T::bindings();
    bindings.validate()?;

    for binding in bindings.iter() {
        inject_field(target, binding, resolver, debug)?;
    }

    Ok(())
}

fn inject_field<T: 'static, R: ServiceResolver + ?Sized>(
    target: &mut T,
    binding: &FieldBinding<T>,
    resolver: &R,
    debug: bool,
) -> Result<(), InjectorError> {
    let modifiers = binding.modifiers();
    if modifiers.skip || binding.is_embedded() {
        if debug {
            debug!("Skipping field '{}'.", binding.name());
        }

        return Ok(());
    }

    if !binding.is_assignable(target) {
        return Err(InjectorError::Access {
            field: binding.name().to_string(),
            reason: "the field has already been set".to_string(),
        });
    }

    let resolved = match resolve(binding, resolver) {
        Ok(resolved) => resolved,
        Err(error) if modifiers.optional => {
            if debug {
                debug!(
                    "Skipping optional field '{}' which cannot be resolved: {error}",
                    binding.name()
                );
            }

            return Ok(());
        }
        Err(source) => {
            return Err(InjectorError::Resolution {
                field: binding.name().to_string(),
                source,
            })
        }
    };

    if debug {
        debug!(
            "Injecting '{}' into field '{}'.",
            resolved.type_name,
            binding.name()
        );
    }

    let type_name = resolved.type_name;
    binding
        .assign(target, resolved.instance)
        .map_err(|_| InjectorError::Access {
            field: binding.name().to_string(),
            reason: format!("'{type_name}' cannot be stored in the field"),
        })
}

fn resolve<T: 'static, R: ServiceResolver + ?Sized>(
    binding: &FieldBinding<T>,
    resolver: &R,
) -> Result<ResolvedService, ResolutionError> {
    let capability = binding.capability();
    match binding.modifiers().name.as_deref() {
        Some(name) => resolver.resolve_named(name, &capability),
        None => resolver.resolve(&capability),
    }
}
