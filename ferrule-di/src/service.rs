//! Services are the instances managed by the container. A [Service] is [Injectable] itself, so its
//! own dependencies are injected when it's provided, and it can declare lifecycle hooks.
//!
//! With the `derive` feature, the trait is usually derived:
//!
//! ```
//! use ferrule_di::error::ErrorPtr;
//! use ferrule_di::resolver::ServicePtr;
//! use ferrule_di::{capability, provides, Service};
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! #[capability]
//! trait Storage {
//!     fn is_open(&self) -> bool;
//! }
//!
//! #[derive(Service, Default)]
//! #[service(init = "Self::open", shutdown = "Self::close")]
//! struct FileStorage {
//!     open: AtomicBool,
//! }
//!
//! impl FileStorage {
//!     // called once, when the service is provided
//!     fn open(&mut self) -> Result<(), ErrorPtr> {
//!         self.open.store(true, Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     // called once, when the container shuts down
//!     fn close(&self) {
//!         self.open.store(false, Ordering::SeqCst);
//!     }
//! }
//!
//! #[provides]
//! impl Storage for FileStorage {
//!     fn is_open(&self) -> bool {
//!         self.open.load(Ordering::SeqCst)
//!     }
//! }
//! ```
//!
//! ### Supported `#[service]` configuration
//!
//! * `init = "path"` - call `path(&mut self, parameters...)` after the service's fields have been
//! injected; parameters are resolved like for [Injector::prepare_func](crate::injector::Injector::prepare_func)
//! * `shutdown = "path"` - call `path(&self)` when the container shuts down

use crate::binding::Injectable;
use crate::capability::{registered_capabilities, Capability, CapabilityDefinition};
use crate::error::InvocationFailure;
use crate::injector::Injector;
use crate::invoke::{signature, InjectableMethod};
use crate::resolver::ServiceAnyPtr;
use derivative::Derivative;

/// Bounds required from every service; `Send + Sync` with the `threadsafe` feature.
#[cfg(feature = "threadsafe")]
pub trait ServiceBounds: Send + Sync + 'static {}
#[cfg(feature = "threadsafe")]
impl<T: Send + Sync + 'static> ServiceBounds for T {}

/// Bounds required from every service; `Send + Sync` with the `threadsafe` feature.
#[cfg(not(feature = "threadsafe"))]
pub trait ServiceBounds: 'static {}
#[cfg(not(feature = "threadsafe"))]
impl<T: 'static> ServiceBounds for T {}

/// Hook called when the container shuts down.
pub type ShutdownHook<S> = fn(&S);

/// Type-erased [ShutdownHook].
pub type ShutdownFunction = fn(instance: &ServiceAnyPtr);

/// Base trait for services managed by the container. Please see the module-level documentation
/// for more information.
pub trait Service: Injectable + Capability + ServiceBounds + Sized {
    /// Capabilities satisfied by this service, besides its own type. Defaults to the ones
    /// registered with `#[provides]`.
    fn capabilities() -> Vec<CapabilityDefinition> {
        registered_capabilities::<Self>()
    }

    /// Initializer called after the service's fields are injected.
    fn initializer() -> Option<Initializer<Self>> {
        None
    }

    /// Hook called on container shutdown.
    fn shutdown_hook() -> Option<ShutdownHook<Self>> {
        None
    }
}

/// Initialization hook for a service, with optional injected parameters.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Initializer<S> {
    parameters: Vec<&'static str>,
    #[derivative(Debug = "ignore")]
    run: Box<dyn Fn(&mut S, &Injector) -> Result<(), InvocationFailure>>,
}

impl<S: 'static> Initializer<S> {
    /// Creates an initializer from a method taking `&mut S` followed by resolvable parameters.
    pub fn new<Args: 'static, M>(method: M) -> Self
    where
        M: InjectableMethod<S, Args> + Copy + 'static,
    {
        Self {
            parameters: M::parameters(),
            run: Box::new(move |service: &mut S, injector: &Injector| {
                method.invoke(service, injector)
            }),
        }
    }

    /// Checks if the initializer declares parameters to be resolved.
    #[inline]
    pub fn is_injected(&self) -> bool {
        !self.parameters.is_empty()
    }

    #[inline]
    pub fn parameters(&self) -> &[&'static str] {
        &self.parameters
    }

    pub fn signature(&self) -> String {
        signature(&self.parameters)
    }

    pub(crate) fn run(&self, service: &mut S, injector: &Injector) -> Result<(), InvocationFailure> {
        (self.run)(service, injector)
    }
}

pub(crate) fn shutdown_instance<S: Service>(instance: &ServiceAnyPtr) {
    if let (Some(hook), Some(service)) = (S::shutdown_hook(), (**instance).downcast_ref::<S>()) {
        hook(service);
    }
}

#[cfg(test)]
mod tests {
    use crate::binding::{Bindings, Injectable};
    use crate::capability::Capability;
    use crate::error::ErrorPtr;
    use crate::injector::Injector;
    use crate::resolver::{ServiceAnyPtr, ServicePtr};
    use crate::service::{shutdown_instance, Initializer, Service, ShutdownHook};
    use std::sync::atomic::{AtomicU8, Ordering};

    #[derive(Default)]
    struct Counter {
        value: AtomicU8,
    }

    impl Capability for Counter {}

    impl Injectable for Counter {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for Counter {
        fn shutdown_hook() -> Option<ShutdownHook<Self>> {
            Some(bump as ShutdownHook<Self>)
        }
    }

    fn bump(counter: &Counter) {
        counter.value.fetch_add(1, Ordering::SeqCst);
    }

    fn start(counter: &mut Counter) -> Result<(), ErrorPtr> {
        *counter.value.get_mut() = 10;
        Ok(())
    }

    fn start_with_injector(counter: &mut Counter, _injector: Injector) -> Result<(), ErrorPtr> {
        *counter.value.get_mut() = 20;
        Ok(())
    }

    #[test]
    fn should_run_plain_initializer() {
        let initializer: Initializer<Counter> = Initializer::new(start);
        let mut counter = Counter::default();

        assert!(!initializer.is_injected());
        initializer.run(&mut counter, &Injector::new()).unwrap();
        assert_eq!(counter.value.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn should_run_injected_initializer() {
        let initializer: Initializer<Counter> = Initializer::new(start_with_injector);
        let mut counter = Counter::default();

        assert!(initializer.is_injected());
        assert!(initializer.signature().contains("Injector"));
        initializer.run(&mut counter, &Injector::new()).unwrap();
        assert_eq!(counter.value.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn should_call_erased_shutdown_hook() {
        let counter = ServicePtr::new(Counter::default());
        shutdown_instance::<Counter>(&(counter.clone() as ServiceAnyPtr));

        assert_eq!(counter.value.load(Ordering::SeqCst), 1);
    }
}
