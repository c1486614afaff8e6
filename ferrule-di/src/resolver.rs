//! Capability matching over registered services. The [ServiceResolver] trait is the untyped seam
//! implemented by the [Injector](crate::injector::Injector); [TypedServiceResolver] adds the
//! strongly-typed access most code uses.

use crate::capability::{Capability, CapabilityId};
use crate::error::ResolutionError;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use std::any::{type_name, Any};
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

#[cfg(not(feature = "threadsafe"))]
pub type ServicePtr<T> = Rc<T>;
#[cfg(feature = "threadsafe")]
pub type ServicePtr<T> = Arc<T>;

#[cfg(not(feature = "threadsafe"))]
pub type ServiceAnyPtr = ServicePtr<dyn Any + 'static>;
#[cfg(feature = "threadsafe")]
pub type ServiceAnyPtr = ServicePtr<dyn Any + Send + Sync + 'static>;

/// Casts a type-erased service into a `Box<ServicePtr<Capability>>`, which is then returned as
/// `Box<dyn Any>`. The original instance is handed back when the cast is not possible.
pub type CastFunction = fn(instance: ServiceAnyPtr) -> Result<Box<dyn Any>, ServiceAnyPtr>;

/// A service found by a resolver, already cast to the requested capability.
#[derive(Debug)]
pub struct ResolvedService {
    /// Fully-qualified type name of the concrete service.
    pub type_name: &'static str,
    /// Boxed `ServicePtr<Capability>`.
    pub instance: Box<dyn Any>,
}

/// Generic resolver of registered services. All lookups scan the registry in the same order and
/// return the first match.
#[cfg_attr(test, automock)]
pub trait ServiceResolver {
    /// Returns the first service satisfying given capability.
    fn resolve(&self, capability: &CapabilityId) -> Result<ResolvedService, ResolutionError>;

    /// Returns the first service whose type name ends with `name` and which satisfies given
    /// capability.
    fn resolve_named(
        &self,
        name: &str,
        capability: &CapabilityId,
    ) -> Result<ResolvedService, ResolutionError>;

    /// Returns all services satisfying given capability, in resolution order.
    fn resolve_all(&self, capability: &CapabilityId) -> Vec<ResolvedService>;

    /// Returns the first service whose type name ends with `name`, without casting it.
    fn instance_by_name(&self, name: &str) -> Result<ServiceAnyPtr, ResolutionError>;
}

/// Helper trait for [ServiceResolver] providing strongly-typed access.
pub trait TypedServiceResolver {
    /// Returns the first registered service satisfying `C`. With front insertion, this is the most
    /// recently registered one.
    fn get<C: Capability + ?Sized>(&self) -> Result<ServicePtr<C>, ResolutionError>;

    /// Like [TypedServiceResolver::get], but returns `None` when nothing satisfies `C`.
    fn get_option<C: Capability + ?Sized>(
        &self,
    ) -> Result<Option<ServicePtr<C>>, ResolutionError>;

    /// Returns the first service satisfying `C` whose type name ends with `name`.
    fn get_named<C: Capability + ?Sized>(
        &self,
        name: &str,
    ) -> Result<ServicePtr<C>, ResolutionError>;

    /// Returns all services satisfying `C`.
    fn get_all<C: Capability + ?Sized>(&self) -> Result<Vec<ServicePtr<C>>, ResolutionError>;

    /// Returns the first service whose fully-qualified type name ends with `name`.
    fn get_by_name(&self, name: &str) -> Result<ServiceAnyPtr, ResolutionError>;
}

pub(crate) fn downcast_resolved<C: ?Sized + 'static>(
    resolved: ResolvedService,
) -> Result<ServicePtr<C>, ResolutionError> {
    let service = resolved.type_name;
    resolved
        .instance
        .downcast::<ServicePtr<C>>()
        .map(|instance| *instance)
        .map_err(|_| ResolutionError::IncompatibleService {
            service: service.to_string(),
            capability: type_name::<C>().to_string(),
        })
}

impl<R: ServiceResolver + ?Sized> TypedServiceResolver for R {
    fn get<C: Capability + ?Sized>(&self) -> Result<ServicePtr<C>, ResolutionError> {
        self.resolve(&CapabilityId::of::<C>())
            .and_then(downcast_resolved)
    }

    fn get_option<C: Capability + ?Sized>(
        &self,
    ) -> Result<Option<ServicePtr<C>>, ResolutionError> {
        match self.get::<C>() {
            Ok(instance) => Ok(Some(instance)),
            Err(ResolutionError::MissingCapability(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn get_named<C: Capability + ?Sized>(
        &self,
        name: &str,
    ) -> Result<ServicePtr<C>, ResolutionError> {
        self.resolve_named(name, &CapabilityId::of::<C>())
            .and_then(downcast_resolved)
    }

    fn get_all<C: Capability + ?Sized>(&self) -> Result<Vec<ServicePtr<C>>, ResolutionError> {
        self.resolve_all(&CapabilityId::of::<C>())
            .into_iter()
            .map(downcast_resolved)
            .try_collect()
    }

    #[inline]
    fn get_by_name(&self, name: &str) -> Result<ServiceAnyPtr, ResolutionError> {
        self.instance_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::{Capability, CapabilityId};
    use crate::error::ResolutionError;
    use crate::resolver::{
        MockServiceResolver, ResolvedService, ServicePtr, TypedServiceResolver,
    };
    use mockall::predicate::*;
    use std::any::Any;

    struct TestService(i8);

    impl Capability for TestService {}

    fn resolved(value: i8) -> ResolvedService {
        ResolvedService {
            type_name: "tests::TestService",
            instance: Box::new(ServicePtr::new(TestService(value))) as Box<dyn Any>,
        }
    }

    #[test]
    fn should_downcast_resolved_service() {
        let mut resolver = MockServiceResolver::new();
        resolver
            .expect_resolve()
            .with(eq(CapabilityId::of::<TestService>()))
            .times(1)
            .returning(|_| Ok(resolved(3)));

        assert_eq!(resolver.get::<TestService>().unwrap().0, 3);
    }

    #[test]
    fn should_report_incompatible_service() {
        let mut resolver = MockServiceResolver::new();
        resolver.expect_resolve().times(1).returning(|_| {
            Ok(ResolvedService {
                type_name: "tests::Other",
                instance: Box::new(0u8),
            })
        });

        assert!(matches!(
            resolver.get::<TestService>().err().unwrap(),
            ResolutionError::IncompatibleService { .. }
        ));
    }

    #[test]
    fn should_map_missing_capability_to_none() {
        let mut resolver = MockServiceResolver::new();
        resolver.expect_resolve().times(1).returning(|capability| {
            Err(ResolutionError::MissingCapability(
                capability.type_name.to_string(),
            ))
        });

        assert!(resolver.get_option::<TestService>().unwrap().is_none());
    }

    #[test]
    fn should_return_all_services() {
        let mut resolver = MockServiceResolver::new();
        resolver
            .expect_resolve_all()
            .times(1)
            .returning(|_| vec![resolved(1), resolved(2)]);

        let services = resolver.get_all::<TestService>().unwrap();
        assert_eq!(
            services.iter().map(|service| service.0).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn should_forward_named_lookup() {
        let mut resolver = MockServiceResolver::new();
        resolver
            .expect_resolve_named()
            .with(eq("TestService"), eq(CapabilityId::of::<TestService>()))
            .times(1)
            .returning(|_, _| Ok(resolved(5)));

        assert_eq!(
            resolver.get_named::<TestService>("TestService").unwrap().0,
            5
        );
    }
}
