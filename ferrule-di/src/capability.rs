//! Capabilities are the unit of resolution: abstract contracts, usually `dyn Trait` types, which
//! registered services can satisfy. A service never satisfies a capability implicitly; each
//! capability a service fulfills must be declared, so the container can look it up without
//! inspecting the service at runtime.
//!
//! ## Declaring capabilities
//!
//! With the `derive` feature enabled, mark injectable traits with `#[capability]` and register
//! implementations with `#[provides]`:
//!
//! ```
//! use ferrule_di::{capability, provides, Service};
//!
//! #[capability]
//! trait Greeter {
//!     fn hello(&self, name: &str) -> String;
//! }
//!
//! #[derive(Service, Default)]
//! struct ConsoleGreeter;
//!
//! #[provides]
//! impl Greeter for ConsoleGreeter {
//!     fn hello(&self, name: &str) -> String {
//!         format!("Hello {name}")
//!     }
//! }
//! ```
//!
//! `#[provides]` registers the declaration statically, so every `ConsoleGreeter` later given to
//! an [Injector](crate::injector::Injector) can be requested as `dyn Greeter` (plus `Send + Sync`
//! with the `threadsafe` feature). Every service can also be requested by its concrete type.
//!
//! ## Explicit declarations
//!
//! Services can list their capabilities by hand instead, by overriding
//! [Service::capabilities](crate::service::Service::capabilities) and building each entry with the
//! [capability_of!](crate::capability_of) macro.

use crate::resolver::{CastFunction, ServiceAnyPtr};
use derivative::Derivative;
use std::any::{type_name, Any, TypeId};
use std::fmt::{Display, Formatter};

/// Marker trait for types which can be requested from the container - capability traits and
/// concrete services. Typically implemented by `#[capability]` and `#[derive(Service)]`.
pub trait Capability: 'static {}

/// Identity of a requested capability.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct CapabilityId {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl CapabilityId {
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: type_name::<C>(),
        }
    }
}

impl Display for CapabilityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Declaration that a service satisfies a given capability, along with the function able to
/// convert the type-erased service into a boxed `ServicePtr<Capability>`.
#[derive(Derivative, Clone, Copy)]
#[derivative(Debug)]
pub struct CapabilityDefinition {
    pub id: CapabilityId,

    /// Cast function associated with the capability. Please see [CastFunction] for details.
    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,
}

impl CapabilityDefinition {
    pub fn new<C: ?Sized + 'static>(cast: CastFunction) -> Self {
        Self {
            id: CapabilityId::of::<C>(),
            cast,
        }
    }

    /// Definition of the capability every service has: being requested by its own type.
    pub fn concrete<S: Any + Capability + crate::service::ServiceBounds>() -> Self {
        Self::new::<S>(cast_concrete::<S>)
    }

    #[inline]
    pub fn is(&self, id: &CapabilityId) -> bool {
        self.id.type_id == id.type_id
    }
}

fn cast_concrete<S: Any + crate::service::ServiceBounds>(
    instance: ServiceAnyPtr,
) -> Result<Box<dyn Any>, ServiceAnyPtr> {
    instance
        .downcast::<S>()
        .map(|service| Box::new(service) as Box<dyn Any>)
}

/// Returns capabilities statically registered for type `S` with `#[provides]`.
pub fn registered_capabilities<S: ?Sized + 'static>() -> Vec<CapabilityDefinition> {
    let target = TypeId::of::<S>();
    inventory::iter::<internal::CapabilityRegisterer>
        .into_iter()
        .map(|registerer| (registerer.register)())
        .filter(|definition| definition.target == target)
        .map(|definition| definition.definition)
        .collect()
}

/// Builds a [CapabilityDefinition] stating that `$service` satisfies `$capability`. The service
/// type must be coercible into the capability type.
///
/// ```
/// use ferrule_di::capability::CapabilityDefinition;
/// use ferrule_di::capability_of;
///
/// trait Store {}
///
/// struct MemoryStore;
///
/// impl Store for MemoryStore {}
///
/// let definition: CapabilityDefinition = capability_of!(MemoryStore => dyn Store + Send + Sync);
/// assert!(definition.id.type_name.contains("Store"));
/// ```
#[macro_export]
macro_rules! capability_of {
    ($service:ty => $capability:ty) => {
        $crate::capability::CapabilityDefinition::new::<$capability>(|instance| {
            instance.downcast::<$service>().map(|service| {
                ::std::boxed::Box::new(service as $crate::resolver::ServicePtr<$capability>)
                    as ::std::boxed::Box<dyn ::std::any::Any>
            })
        })
    };
}

#[doc(hidden)]
pub mod internal {
    use crate::capability::CapabilityDefinition;
    use inventory::collect;
    pub use inventory::submit;
    use std::any::TypeId;

    #[derive(Clone, Copy)]
    pub struct TypedCapabilityDefinition {
        pub target: TypeId,
        pub definition: CapabilityDefinition,
    }

    pub struct CapabilityRegisterer {
        pub register: fn() -> TypedCapabilityDefinition,
    }

    collect!(CapabilityRegisterer);
}
