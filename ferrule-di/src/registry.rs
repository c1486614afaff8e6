//! Ordered storage of registered services. New services are inserted at the front, so a forward
//! scan finds the most recently registered match first. The container itself is represented by a
//! [RegistryEntry::Container] sentinel, added once at construction.

use crate::capability::{CapabilityDefinition, CapabilityId};
use crate::error::{InjectorError, ResolutionError};
use crate::resolver::{ResolvedService, ServiceAnyPtr};
use crate::service::ShutdownFunction;
use derivative::Derivative;
use std::collections::VecDeque;

/// A registered, type-erased service.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ServiceEntry {
    type_name: &'static str,
    #[derivative(Debug = "ignore")]
    instance: ServiceAnyPtr,
    capabilities: Vec<CapabilityDefinition>,
    #[derivative(Debug = "ignore")]
    shutdown: Option<ShutdownFunction>,
}

impl ServiceEntry {
    pub fn new(
        type_name: &'static str,
        instance: ServiceAnyPtr,
        capabilities: Vec<CapabilityDefinition>,
        shutdown: Option<ShutdownFunction>,
    ) -> Self {
        Self {
            type_name,
            instance,
            capabilities,
            shutdown,
        }
    }

    /// Fully-qualified type name of the service.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn instance(&self) -> &ServiceAnyPtr {
        &self.instance
    }

    #[inline]
    pub fn capabilities(&self) -> &[CapabilityDefinition] {
        &self.capabilities
    }

    #[inline]
    pub fn has_shutdown_hook(&self) -> bool {
        self.shutdown.is_some()
    }

    #[inline]
    pub fn provides(&self, capability: &CapabilityId) -> bool {
        self.capabilities
            .iter()
            .any(|definition| definition.is(capability))
    }

    #[inline]
    pub fn matches_name(&self, name: &str) -> bool {
        self.type_name.ends_with(name)
    }

    /// Casts the service to given capability, if it declares it.
    pub fn cast(
        &self,
        capability: &CapabilityId,
    ) -> Option<Result<ResolvedService, ResolutionError>> {
        self.capabilities
            .iter()
            .find(|definition| definition.is(capability))
            .map(|definition| {
                (definition.cast)(self.instance.clone())
                    .map(|instance| ResolvedService {
                        type_name: self.type_name,
                        instance,
                    })
                    .map_err(|_| ResolutionError::IncompatibleService {
                        service: self.type_name.to_string(),
                        capability: capability.type_name.to_string(),
                    })
            })
    }

    /// Checks that every declared capability can actually be cast from the instance.
    pub fn validate(&self) -> Result<(), InjectorError> {
        for definition in &self.capabilities {
            if (definition.cast)(self.instance.clone()).is_err() {
                return Err(InjectorError::Validation(format!(
                    "service '{}' does not satisfy declared capability '{}'",
                    self.type_name, definition.id
                )));
            }
        }

        Ok(())
    }

    /// Runs the shutdown hook, if present.
    pub fn shutdown(&self) {
        if let Some(shutdown) = self.shutdown {
            shutdown(&self.instance);
        }
    }
}

/// An entry in the [Registry].
#[derive(Clone, Debug)]
pub enum RegistryEntry {
    /// The container itself.
    Container,
    Service(ServiceEntry),
}

/// Ordered store of registry entries. Entries are only removed on teardown.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: VecDeque<RegistryEntry>,
}

impl Registry {
    /// Creates a registry containing only the container sentinel.
    pub fn with_container() -> Self {
        Self {
            entries: [RegistryEntry::Container].into_iter().collect(),
        }
    }

    /// Adds a service in front of all existing entries.
    pub fn insert(&mut self, entry: ServiceEntry) {
        self.entries.push_front(RegistryEntry::Service(entry));
    }

    /// Iterates over all entries in resolution order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Iterates over service entries in resolution order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            RegistryEntry::Service(service) => Some(service),
            RegistryEntry::Container => None,
        })
    }

    /// Number of registered services, excluding the container.
    pub fn len(&self) -> usize {
        self.services().count()
    }

    pub fn is_empty(&self) -> bool {
        self.services().next().is_none()
    }

    /// Removes and returns all services in resolution order, keeping the container sentinel.
    pub fn detach_services(&mut self) -> Vec<ServiceEntry> {
        let (services, rest): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| matches!(entry, RegistryEntry::Service(_)));

        self.entries = rest.into_iter().collect();
        services
            .into_iter()
            .filter_map(|entry| match entry {
                RegistryEntry::Service(service) => Some(service),
                RegistryEntry::Container => None,
            })
            .collect()
    }
}
