//! Injection of dependencies into function parameters. Any function or closure taking up to 8
//! [Parameter]s and returning `Result<(), E>` can be called by the container, which resolves all
//! parameters first:
//!
//! ```
//! use ferrule_di::error::ErrorPtr;
//! use ferrule_di::injector::Injector;
//! use ferrule_di::resolver::ServicePtr;
//! use ferrule_di::{capability, provides, Service};
//!
//! #[capability]
//! trait Clock {
//!     fn now(&self) -> u64;
//! }
//!
//! #[derive(Service, Default)]
//! struct FixedClock;
//!
//! #[provides]
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         42
//!     }
//! }
//!
//! let injector = Injector::new();
//! injector.provide(FixedClock).unwrap();
//!
//! injector
//!     .prepare_func(|clock: ServicePtr<dyn Clock + Send + Sync>| -> Result<(), ErrorPtr> {
//!         assert_eq!(clock.now(), 42);
//!         Ok(())
//!     })
//!     .unwrap();
//! ```
//!
//! Supported parameter types:
//!
//! * `ServicePtr<C>` - mandatory capability
//! * `Option<ServicePtr<C>>` - optional capability
//! * [Injector] - the container itself

use crate::capability::{Capability, CapabilityId};
use crate::error::{into_error_ptr, BoxError, InvocationFailure, ResolutionError};
use crate::injector::Injector;
use crate::resolver::{ServicePtr, ServiceResolver, TypedServiceResolver};
use std::any::type_name;

/// Types which can be resolved as parameters of injected functions.
pub trait Parameter: Sized {
    fn resolve<R: ServiceResolver + ?Sized>(resolver: &R) -> Result<Self, ResolutionError>;
}

impl<C: Capability + ?Sized> Parameter for ServicePtr<C> {
    #[inline]
    fn resolve<R: ServiceResolver + ?Sized>(resolver: &R) -> Result<Self, ResolutionError> {
        resolver.get::<C>()
    }
}

impl<C: Capability + ?Sized> Parameter for Option<ServicePtr<C>> {
    #[inline]
    fn resolve<R: ServiceResolver + ?Sized>(resolver: &R) -> Result<Self, ResolutionError> {
        resolver.get_option::<C>()
    }
}

impl Parameter for Injector {
    fn resolve<R: ServiceResolver + ?Sized>(resolver: &R) -> Result<Self, ResolutionError> {
        let resolved = resolver.resolve(&CapabilityId::of::<Injector>())?;
        let service = resolved.type_name;
        resolved
            .instance
            .downcast::<Injector>()
            .map(|injector| *injector)
            .map_err(|_| ResolutionError::IncompatibleService {
                service: service.to_string(),
                capability: type_name::<Injector>().to_string(),
            })
    }
}

/// A callable whose parameters can be resolved by the container.
pub trait InjectableFn<Args> {
    /// Type names of all parameters, in declaration order.
    fn parameters() -> Vec<&'static str>;

    /// Resolves all parameters and calls the function.
    fn invoke<R: ServiceResolver + ?Sized>(self, resolver: &R) -> Result<(), InvocationFailure>;
}

/// A method-like callable taking `&mut Target` followed by resolvable parameters. Used for
/// initializers with dependencies.
pub trait InjectableMethod<Target, Args> {
    /// Type names of all parameters, excluding the target, in declaration order.
    fn parameters() -> Vec<&'static str>;

    /// Resolves all parameters and calls the method on `target`.
    fn invoke<R: ServiceResolver + ?Sized>(
        self,
        target: &mut Target,
        resolver: &R,
    ) -> Result<(), InvocationFailure>;
}

/// Human-readable signature of an injectable callable.
pub fn signature(parameters: &[&str]) -> String {
    format!("fn({}) -> Result<(), ErrorPtr>", parameters.join(", "))
}

fn resolve_parameter<P: Parameter, R: ServiceResolver + ?Sized>(
    resolver: &R,
    index: usize,
) -> Result<P, InvocationFailure> {
    P::resolve(resolver).map_err(|source| InvocationFailure::UnresolvedParameter {
        index,
        parameter: type_name::<P>(),
        source,
    })
}

macro_rules! impl_injectable {
    ($($parameter:ident),*) => {
        impl<Func, E, $($parameter,)*> InjectableFn<($($parameter,)*)> for Func
        where
            Func: FnOnce($($parameter),*) -> Result<(), E>,
            E: Into<BoxError>,
            $($parameter: Parameter,)*
        {
            fn parameters() -> Vec<&'static str> {
                vec![$(type_name::<$parameter>()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn invoke<R: ServiceResolver + ?Sized>(
                self,
                resolver: &R,
            ) -> Result<(), InvocationFailure> {
                let mut index: usize = 0;
                $(
                    let $parameter = resolve_parameter::<$parameter, R>(resolver, index)?;
                    index += 1;
                )*

                (self)($($parameter),*)
                    .map_err(|error| InvocationFailure::Returned(into_error_ptr(error.into())))
            }
        }

        impl<Func, Target, E, $($parameter,)*> InjectableMethod<Target, ($($parameter,)*)> for Func
        where
            Func: FnOnce(&mut Target, $($parameter),*) -> Result<(), E>,
            E: Into<BoxError>,
            $($parameter: Parameter,)*
        {
            fn parameters() -> Vec<&'static str> {
                vec![$(type_name::<$parameter>()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn invoke<R: ServiceResolver + ?Sized>(
                self,
                target: &mut Target,
                resolver: &R,
            ) -> Result<(), InvocationFailure> {
                let mut index: usize = 0;
                $(
                    let $parameter = resolve_parameter::<$parameter, R>(resolver, index)?;
                    index += 1;
                )*

                (self)(target, $($parameter),*)
                    .map_err(|error| InvocationFailure::Returned(into_error_ptr(error.into())))
            }
        }
    };
}

impl_injectable!();
impl_injectable!(P1);
impl_injectable!(P1, P2);
impl_injectable!(P1, P2, P3);
impl_injectable!(P1, P2, P3, P4);
impl_injectable!(P1, P2, P3, P4, P5);
impl_injectable!(P1, P2, P3, P4, P5, P6);
impl_injectable!(P1, P2, P3, P4, P5, P6, P7);
impl_injectable!(P1, P2, P3, P4, P5, P6, P7, P8);
