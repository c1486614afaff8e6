//! The service container. An [Injector] owns the [Registry] of provided services and exposes all
//! container operations: registering services, resolving capabilities, injecting fields and
//! function parameters, and shutting services down.
//!
//! ```
//! use ferrule_di::injector::Injector;
//! use ferrule_di::resolver::{ServicePtr, TypedServiceResolver};
//! use ferrule_di::{capability, provides, Injectable, Service};
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
//!
//! #[derive(Injectable, Default)]
//! struct Controller {
//!     #[inject]
//!     greeter: Option<ServicePtr<dyn Greeter + Send + Sync>>,
//! }
//!
//! let injector = Injector::new();
//! injector.provide(ConsoleGreeter).unwrap();
//!
//! let mut controller = Controller::default();
//! injector.prepare(&mut controller).unwrap();
//!
//! let greeter = controller.greeter.unwrap();
//! assert_eq!(greeter.hello("World"), "Hello World");
//!
//! injector.shutdown();
//! ```
//!
//! An [Injector] is a cheap handle - clones share the same registry. Services and functions can
//! receive the container itself as an injected dependency.

use crate::binding::Injectable;
use crate::capability::{CapabilityDefinition, CapabilityId};
use crate::error::{InjectorError, InvocationFailure, ResolutionError};
use crate::injection::inject_fields;
use crate::invoke::{signature, InjectableFn, InjectableMethod};
use crate::registry::{Registry, RegistryEntry, ServiceEntry};
use crate::resolver::{ResolvedService, ServiceAnyPtr, ServicePtr, ServiceResolver};
use crate::service::{shutdown_instance, Service, ShutdownFunction};
use derivative::Derivative;
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::iter;
use tracing::debug;

/// Container configuration.
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug)]
pub struct InjectorConfig {
    /// Emit debug events for container decisions.
    pub debug: bool,
}

struct InjectorState {
    debug: bool,
    registry: RwLock<Registry>,
}

/// The service container. Please see the module-level documentation for more information.
#[derive(Clone)]
pub struct Injector {
    state: ServicePtr<InjectorState>,
}

impl Injector {
    /// Creates an empty container with debug events disabled.
    pub fn new() -> Self {
        Self::with_config(&InjectorConfig::default())
    }

    pub fn with_config(config: &InjectorConfig) -> Self {
        Self {
            state: ServicePtr::new(InjectorState {
                debug: config.debug,
                registry: RwLock::new(Registry::with_container()),
            }),
        }
    }

    #[inline]
    pub fn is_debug(&self) -> bool {
        self.state.debug
    }

    /// Number of registered services, excluding the container itself.
    pub fn len(&self) -> usize {
        self.state.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.registry.read().is_empty()
    }

    /// Registers a service: validates its declared capabilities, injects its fields, runs its
    /// initializer and finally puts it in front of all previously registered services. The
    /// registry is left unchanged on error.
    pub fn provide<S: Service>(&self, service: S) -> Result<ServicePtr<S>, InjectorError> {
        let type_name = type_name::<S>();
        if self.state.debug {
            debug!("Registering service '{type_name}'.");
        }

        let capabilities: Vec<_> = iter::once(CapabilityDefinition::concrete::<S>())
            .chain(S::capabilities())
            .collect();
        let shutdown = S::shutdown_hook().map(|_| shutdown_instance::<S> as ShutdownFunction);

        let mut instance = ServicePtr::new(service);
        ServiceEntry::new(
            type_name,
            instance.clone() as ServiceAnyPtr,
            capabilities.clone(),
            shutdown,
        )
        .validate()?;

        self.initialize(&mut instance)
            .map_err(|source| InjectorError::Registration {
                service: type_name.to_string(),
                source: Box::new(source),
            })?;

        self.state.registry.write().insert(ServiceEntry::new(
            type_name,
            instance.clone() as ServiceAnyPtr,
            capabilities,
            shutdown,
        ));

        Ok(instance)
    }

    /// Registers all given services in order, stopping at the first error. Services registered
    /// before the error stay registered.
    pub fn provide_all<I>(&self, provisions: I) -> Result<(), InjectorError>
    where
        I: IntoIterator<Item = Provision>,
    {
        provisions
            .into_iter()
            .try_for_each(|provision| provision.register(self))
    }

    fn initialize<S: Service>(&self, instance: &mut ServicePtr<S>) -> Result<(), InjectorError> {
        let type_name = type_name::<S>();
        let service = ServicePtr::get_mut(instance).ok_or_else(|| {
            InjectorError::Validation(format!("service '{type_name}' is already shared"))
        })?;

        self.prepare(service)?;

        if let Some(initializer) = S::initializer() {
            if self.state.debug {
                debug!("Initializing service '{type_name}'.");
            }

            initializer
                .run(service, self)
                .map_err(|failure| match failure {
                    InvocationFailure::Returned(source) if !initializer.is_injected() => {
                        InjectorError::Initialization {
                            service: type_name.to_string(),
                            source,
                        }
                    }
                    source => InjectorError::Invocation {
                        signature: initializer.signature(),
                        source,
                    },
                })?;
        }

        Ok(())
    }

    /// Injects dependencies into all bound fields of `target`.
    pub fn prepare<T: Injectable>(&self, target: &mut T) -> Result<(), InjectorError> {
        inject_fields(target, self, self.state.debug)
    }

    /// Like [Injector::prepare], but panics on error.
    pub fn must_prepare<T: Injectable>(&self, target: &mut T) {
        if let Err(error) = self.prepare(target) {
            panic!("{error}");
        }
    }

    /// Resolves all parameters of `function` and calls it.
    pub fn prepare_func<Args, F>(&self, function: F) -> Result<(), InjectorError>
    where
        F: InjectableFn<Args>,
    {
        <F as InjectableFn<Args>>::invoke(function, self).map_err(|source| {
            InjectorError::Invocation {
                signature: signature(&F::parameters()),
                source,
            }
        })
    }

    /// Resolves all parameters of `method`, excluding the leading `&mut T`, and calls it on
    /// `target`.
    pub fn prepare_method<T, Args, M>(&self, target: &mut T, method: M) -> Result<(), InjectorError>
    where
        M: InjectableMethod<T, Args>,
    {
        <M as InjectableMethod<T, Args>>::invoke(method, target, self).map_err(|source| {
            InjectorError::Invocation {
                signature: signature(&M::parameters()),
                source,
            }
        })
    }

    /// Calls shutdown hooks of all registered services in resolution order and removes them from
    /// the container. Subsequent calls do nothing.
    pub fn shutdown(&self) {
        let services = self.state.registry.write().detach_services();
        for service in services {
            if self.state.debug && service.has_shutdown_hook() {
                debug!("Shutting down service '{}'.", service.type_name());
            }

            service.shutdown();
        }
    }

    fn container_service(&self) -> ResolvedService {
        ResolvedService {
            type_name: type_name::<Injector>(),
            instance: Box::new(self.clone()) as Box<dyn Any>,
        }
    }

    fn find_map<T>(&self, mut f: impl FnMut(&RegistryEntry) -> Option<T>) -> Option<T> {
        self.state.registry.read().entries().find_map(|entry| f(entry))
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Injector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("debug", &self.state.debug)
            .field("services", &self.len())
            .finish()
    }
}

fn is_container(capability: &CapabilityId) -> bool {
    capability.type_id == TypeId::of::<Injector>()
}

impl ServiceResolver for Injector {
    fn resolve(&self, capability: &CapabilityId) -> Result<ResolvedService, ResolutionError> {
        self.find_map(|entry| match entry {
            RegistryEntry::Container if is_container(capability) => {
                Some(Ok(self.container_service()))
            }
            RegistryEntry::Container => None,
            RegistryEntry::Service(service) => service.cast(capability),
        })
        .unwrap_or_else(|| {
            Err(ResolutionError::MissingCapability(
                capability.type_name.to_string(),
            ))
        })
    }

    fn resolve_named(
        &self,
        name: &str,
        capability: &CapabilityId,
    ) -> Result<ResolvedService, ResolutionError> {
        self.find_map(|entry| match entry {
            RegistryEntry::Container
                if is_container(capability) && type_name::<Injector>().ends_with(name) =>
            {
                Some(Ok(self.container_service()))
            }
            RegistryEntry::Container => None,
            RegistryEntry::Service(service) if service.matches_name(name) => {
                service.cast(capability)
            }
            RegistryEntry::Service(_) => None,
        })
        .unwrap_or_else(|| Err(ResolutionError::MissingName(name.to_string())))
    }

    fn resolve_all(&self, capability: &CapabilityId) -> Vec<ResolvedService> {
        let registry = self.state.registry.read();
        registry
            .entries()
            .filter_map(|entry| match entry {
                RegistryEntry::Container if is_container(capability) => {
                    Some(self.container_service())
                }
                RegistryEntry::Container => None,
                RegistryEntry::Service(service) => {
                    service.cast(capability).and_then(Result::ok)
                }
            })
            .collect()
    }

    fn instance_by_name(&self, name: &str) -> Result<ServiceAnyPtr, ResolutionError> {
        self.find_map(|entry| match entry {
            RegistryEntry::Container if type_name::<Injector>().ends_with(name) => {
                Some(ServicePtr::new(self.clone()) as ServiceAnyPtr)
            }
            RegistryEntry::Container => None,
            RegistryEntry::Service(service) if service.matches_name(name) => {
                Some(service.instance().clone())
            }
            RegistryEntry::Service(_) => None,
        })
        .ok_or_else(|| ResolutionError::MissingName(name.to_string()))
    }
}

/// A pending registration of a service of any type, for use with [Injector::provide_all].
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Provision {
    type_name: &'static str,
    #[derivative(Debug = "ignore")]
    register: Box<dyn FnOnce(&Injector) -> Result<(), InjectorError>>,
}

impl Provision {
    pub fn new<S: Service>(service: S) -> Self {
        Self {
            type_name: type_name::<S>(),
            register: Box::new(move |injector: &Injector| injector.provide(service).map(|_| ())),
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn register(self, injector: &Injector) -> Result<(), InjectorError> {
        (self.register)(injector)
    }
}

/// Creates a list of [Provision]s from services of different types.
///
/// ```
/// use ferrule_di::injector::Injector;
/// use ferrule_di::{provisions, Service};
///
/// #[derive(Service, Default)]
/// struct Database;
///
/// #[derive(Service, Default)]
/// struct Cache;
///
/// let injector = Injector::new();
/// injector.provide_all(provisions![Database, Cache]).unwrap();
/// assert_eq!(injector.len(), 2);
/// ```
#[macro_export]
macro_rules! provisions {
    ($($service:expr),* $(,)?) => {
        vec![$($crate::injector::Provision::new($service)),*]
    };
}

#[cfg(test)]
mod tests {
    use crate::binding::{Bindings, FieldBinding, Injectable};
    use crate::capability::{Capability, CapabilityDefinition};
    use crate::error::{ErrorKind, ErrorPtr, InjectorError, InvocationFailure, ResolutionError};
    use crate::injector::{Injector, InjectorConfig};
    use crate::resolver::{ServiceAnyPtr, ServicePtr, TypedServiceResolver};
    use crate::service::{Initializer, Service, ShutdownHook};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;

    trait Greeter {
        fn hello(&self, name: &str) -> String;
    }

    #[cfg(feature = "threadsafe")]
    type DynGreeter = dyn Greeter + Send + Sync;
    #[cfg(not(feature = "threadsafe"))]
    type DynGreeter = dyn Greeter;

    impl Capability for DynGreeter {}

    #[derive(Default)]
    struct FirstGreeter;

    impl Capability for FirstGreeter {}

    impl Injectable for FirstGreeter {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for FirstGreeter {
        fn capabilities() -> Vec<CapabilityDefinition> {
            vec![crate::capability_of!(FirstGreeter => DynGreeter)]
        }
    }

    impl Greeter for FirstGreeter {
        fn hello(&self, name: &str) -> String {
            format!("Hello {name}")
        }
    }

    #[derive(Default)]
    struct SecondGreeter {
        previous: Option<ServicePtr<DynGreeter>>,
    }

    fn previous(greeter: &mut SecondGreeter) -> &mut Option<ServicePtr<DynGreeter>> {
        &mut greeter.previous
    }

    impl Capability for SecondGreeter {}

    impl Injectable for SecondGreeter {
        fn bindings() -> Bindings<Self> {
            Bindings::new().field("previous", previous)
        }
    }

    impl Service for SecondGreeter {
        fn capabilities() -> Vec<CapabilityDefinition> {
            vec![crate::capability_of!(SecondGreeter => DynGreeter)]
        }
    }

    impl Greeter for SecondGreeter {
        fn hello(&self, name: &str) -> String {
            self.previous
                .as_ref()
                .map(|previous| previous.hello(&format!("{name} elloH")))
                .unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct Controller {
        greeter: Option<ServicePtr<DynGreeter>>,
    }

    fn greeter(controller: &mut Controller) -> &mut Option<ServicePtr<DynGreeter>> {
        &mut controller.greeter
    }

    impl Injectable for Controller {
        fn bindings() -> Bindings<Self> {
            Bindings::new().field("greeter", greeter)
        }
    }

    #[derive(Default)]
    struct OptionalController {
        greeter: Option<ServicePtr<DynGreeter>>,
    }

    fn optional_greeter(controller: &mut OptionalController) -> &mut Option<ServicePtr<DynGreeter>> {
        &mut controller.greeter
    }

    impl Injectable for OptionalController {
        fn bindings() -> Bindings<Self> {
            Bindings::new().with(FieldBinding::new("greeter", optional_greeter).optional())
        }
    }

    #[derive(Default)]
    struct Closable {
        closed: AtomicU8,
    }

    impl Capability for Closable {}

    impl Injectable for Closable {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for Closable {
        fn shutdown_hook() -> Option<ShutdownHook<Self>> {
            Some(close as ShutdownHook<Self>)
        }
    }

    fn close(closable: &Closable) {
        closable.closed.fetch_add(1, Ordering::SeqCst);
    }

    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Capability for Recorder {}

    impl Injectable for Recorder {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for Recorder {
        fn shutdown_hook() -> Option<ShutdownHook<Self>> {
            Some(record as ShutdownHook<Self>)
        }
    }

    fn record(recorder: &Recorder) {
        recorder.log.lock().push(recorder.label);
    }

    #[derive(Default)]
    struct FailingInit;

    impl Capability for FailingInit {}

    impl Injectable for FailingInit {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for FailingInit {
        fn initializer() -> Option<Initializer<Self>> {
            Some(Initializer::new(fail))
        }
    }

    fn fail(_: &mut FailingInit) -> Result<(), ErrorPtr> {
        Err(Arc::new(ResolutionError::MissingName("init".to_string())) as ErrorPtr)
    }

    #[derive(Default)]
    struct CountingInit {
        greeters: usize,
    }

    impl Capability for CountingInit {}

    impl Injectable for CountingInit {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for CountingInit {
        fn initializer() -> Option<Initializer<Self>> {
            Some(Initializer::new(count_greeters))
        }
    }

    fn count_greeters(
        target: &mut CountingInit,
        injector: Injector,
    ) -> Result<(), ResolutionError> {
        target.greeters = injector.get_all::<DynGreeter>()?.len();
        Ok(())
    }

    #[derive(Default)]
    struct Broken;

    impl Capability for Broken {}

    impl Injectable for Broken {
        fn bindings() -> Bindings<Self> {
            Bindings::new()
        }
    }

    impl Service for Broken {
        fn capabilities() -> Vec<CapabilityDefinition> {
            vec![crate::capability_of!(FirstGreeter => DynGreeter)]
        }
    }

    #[test]
    fn should_delegate_through_most_recent_service() {
        let injector = Injector::with_config(&InjectorConfig { debug: true });
        injector.provide(FirstGreeter).unwrap();
        let second = injector.provide(SecondGreeter::default()).unwrap();

        let mut controller = Controller::default();
        injector.prepare(&mut controller).unwrap();

        assert!(second.previous.is_some());
        assert_eq!(
            controller.greeter.unwrap().hello("World"),
            "Hello World elloH"
        );
        assert_eq!(injector.len(), 2);
    }

    #[test]
    fn should_fail_mandatory_field() {
        let injector = Injector::new();
        let mut controller = Controller::default();

        let error = injector.prepare(&mut controller).unwrap_err();

        assert!(matches!(
            error,
            InjectorError::Resolution { ref field, source: ResolutionError::MissingCapability(_) }
                if field == "greeter"
        ));
    }

    #[test]
    #[should_panic]
    fn should_panic_on_must_prepare_failure() {
        Injector::new().must_prepare(&mut Controller::default());
    }

    #[test]
    fn should_leave_missing_optional_field() {
        let injector = Injector::new();
        let mut controller = OptionalController::default();

        injector.prepare(&mut controller).unwrap();
        assert!(controller.greeter.is_none());
    }

    #[test]
    fn should_wrap_registration_failure() {
        let injector = Injector::new();

        let error = injector.provide(SecondGreeter::default()).err().unwrap();

        assert_eq!(error.kind(), ErrorKind::Resolution);
        assert!(matches!(
            error,
            InjectorError::Registration { ref service, .. } if service.ends_with("SecondGreeter")
        ));
        assert!(injector.is_empty());
    }

    #[test]
    fn should_reject_invalid_capability() {
        let injector = Injector::new();

        let error = injector.provide(Broken).err().unwrap();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(injector.is_empty());
    }

    #[test]
    fn should_report_failed_initializer() {
        let injector = Injector::new();

        let error = injector.provide(FailingInit).err().unwrap();

        assert!(matches!(
            error.root(),
            InjectorError::Initialization { service, .. } if service.ends_with("FailingInit")
        ));
        assert!(injector.is_empty());
    }

    #[test]
    fn should_run_injected_initializer() {
        let injector = Injector::new();
        injector.provide(FirstGreeter).unwrap();
        injector.provide(SecondGreeter::default()).unwrap();

        let counting = injector.provide(CountingInit::default()).unwrap();

        assert_eq!(counting.greeters, 2);
    }

    #[test]
    fn should_shut_down_once() {
        let injector = Injector::new();
        injector.provide(FirstGreeter).unwrap();
        let first = injector.provide(Closable::default()).unwrap();
        let second = injector.provide(Closable::default()).unwrap();

        injector.shutdown();
        injector.shutdown();

        assert_eq!(first.closed.load(Ordering::SeqCst), 1);
        assert_eq!(second.closed.load(Ordering::SeqCst), 1);
        assert!(injector.is_empty());
    }

    #[test]
    fn should_shut_down_most_recent_first() {
        let log = Arc::new(Mutex::new(vec![]));
        let injector = Injector::new();
        injector
            .provide(Recorder {
                label: "First",
                log: log.clone(),
            })
            .unwrap();
        injector
            .provide(Recorder {
                label: "Second",
                log: log.clone(),
            })
            .unwrap();

        injector.shutdown();
        injector.shutdown();

        assert_eq!(*log.lock(), vec!["Second", "First"]);
    }

    #[test]
    fn should_resolve_by_name() {
        let injector = Injector::new();
        injector.provide(FirstGreeter).unwrap();
        injector.provide(SecondGreeter::default()).unwrap();

        let instance = injector.get_by_name("FirstGreeter").unwrap();
        assert!((*instance).downcast_ref::<FirstGreeter>().is_some());

        let greeter = injector.get_named::<DynGreeter>("FirstGreeter").unwrap();
        assert_eq!(greeter.hello("you"), "Hello you");

        assert!(matches!(
            injector.get_by_name("ThirdGreeter").unwrap_err(),
            ResolutionError::MissingName(_)
        ));
        assert!(injector.get_by_name("Injector").is_ok());
    }

    #[test]
    fn should_resolve_concrete_type() {
        let injector = Injector::new();
        let provided = injector.provide(Closable::default()).unwrap();

        let resolved = injector.get::<Closable>().unwrap();
        assert!(ServicePtr::ptr_eq(&provided, &resolved));
        assert!(injector.get_option::<FirstGreeter>().unwrap().is_none());
    }

    #[test]
    fn should_invoke_function_with_parameters() {
        let injector = Injector::new();
        injector.provide(FirstGreeter).unwrap();
        let closable = injector.provide(Closable::default()).unwrap();

        let mut greeting = String::new();
        injector
            .prepare_func(
                |greeter: ServicePtr<DynGreeter>, closable: ServicePtr<Closable>| -> Result<(), ErrorPtr> {
                    greeting = greeter.hello("there");
                    close(&closable);
                    Ok(())
                },
            )
            .unwrap();

        assert_eq!(greeting, "Hello there");
        assert_eq!(closable.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_surface_function_error() {
        let injector = Injector::new();
        injector.provide(FirstGreeter).unwrap();

        let error = injector
            .prepare_func(|_: ServicePtr<DynGreeter>| -> Result<(), String> {
                Err("failed".to_string())
            })
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Invocation);
        assert!(matches!(
            error,
            InjectorError::Invocation { source: InvocationFailure::Returned(ref source), .. }
                if source.to_string() == "failed"
        ));
    }

    #[test]
    fn should_name_unresolved_parameter() {
        let injector = Injector::new();

        let error = injector
            .prepare_func(
                |_: Injector, _: ServicePtr<DynGreeter>| -> Result<(), ErrorPtr> { Ok(()) },
            )
            .unwrap_err();

        assert!(matches!(
            error,
            InjectorError::Invocation {
                source: InvocationFailure::UnresolvedParameter { index: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn should_prepare_method() {
        let injector = Injector::new();
        injector.provide(FirstGreeter).unwrap();

        let mut count = 0usize;
        injector
            .prepare_method(
                &mut count,
                |count: &mut usize, greeters: Option<ServicePtr<DynGreeter>>| -> Result<(), ErrorPtr> {
                    *count = greeters.into_iter().count();
                    Ok(())
                },
            )
            .unwrap();

        assert_eq!(count, 1);
    }

    #[test]
    fn should_provide_all_in_order() {
        let injector = Injector::new();

        injector
            .provide_all(provisions![FirstGreeter, SecondGreeter::default()])
            .unwrap();

        assert_eq!(injector.get::<DynGreeter>().unwrap().hello("A"), "Hello A elloH");
        assert_eq!(
            injector
                .get_all::<DynGreeter>()
                .unwrap()
                .iter()
                .map(|greeter| greeter.hello("B"))
                .collect::<Vec<_>>(),
            vec!["Hello B elloH".to_string(), "Hello B".to_string()]
        );
    }

    #[test]
    fn should_stop_provide_all_at_first_error() {
        let injector = Injector::new();

        assert!(injector
            .provide_all(provisions![
                FirstGreeter,
                FailingInit,
                Closable::default()
            ])
            .is_err());
        assert_eq!(injector.len(), 1);
    }

    #[test]
    fn should_share_registry_between_clones() {
        let injector = Injector::new();
        let clone = injector.clone();
        clone.provide(FirstGreeter).unwrap();

        let instance: ServiceAnyPtr = injector.get_by_name("FirstGreeter").unwrap();
        assert!(instance.downcast::<FirstGreeter>().is_ok());
    }
}
