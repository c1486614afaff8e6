//! Field binding descriptors, used by the container to inject dependencies into existing values.
//!
//! Any type which wants its fields to be filled by [Injector::prepare](crate::injector::Injector::prepare)
//! implements [Injectable], returning one [FieldBinding] per managed field. Fields without a
//! binding are never touched. With the `derive` feature, bindings are generated from `#[inject]`
//! attributes:
//!
//! ```
//! use ferrule_di::resolver::ServicePtr;
//! use ferrule_di::{capability, Injectable};
//!
//! #[capability]
//! trait Greeter {
//!     fn hello(&self, name: &str) -> String;
//! }
//!
//! #[derive(Injectable, Default)]
//! struct Controller {
//!     // mandatory dependency
//!     #[inject]
//!     greeter: Option<ServicePtr<dyn Greeter + Send + Sync>>,
//!     // missing dependency is not an error
//!     #[inject(optional)]
//!     fallback: Option<ServicePtr<dyn Greeter + Send + Sync>>,
//!     // select by type name suffix
//!     #[inject(name = "FormalGreeter")]
//!     formal: Option<ServicePtr<dyn Greeter + Send + Sync>>,
//!     // declared, but never injected
//!     #[inject(skip)]
//!     manual: Option<ServicePtr<dyn Greeter + Send + Sync>>,
//!     // not managed at all
//!     visits: u32,
//! }
//! ```
//!
//! ### Supported `#[inject]` modifiers
//!
//! * `optional` - leave the field untouched when no service satisfies its capability
//! * `skip` - never inject the field
//! * `name = "suffix"` - only consider services whose type name ends with given suffix
//!
//! Unnamed (tuple struct) fields are treated as embedded members and always skipped.

use crate::capability::CapabilityId;
use crate::error::InjectorError;
use crate::injector::Injector;
use crate::resolver::ServicePtr;
use derivative::Derivative;
use fxhash::FxHashSet;
use std::any::Any;
#[cfg(not(feature = "threadsafe"))]
use std::cell::OnceCell;
use std::str::FromStr;
#[cfg(feature = "threadsafe")]
use std::sync::OnceLock;

/// Types whose fields can be injected by the container.
pub trait Injectable: 'static {
    /// Returns field bindings for this type. Called on every injection pass.
    fn bindings() -> Bindings<Self>
    where
        Self: Sized;
}

/// Per-field injection modifiers, mirroring the comma-separated `#[inject(...)]` list.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct FieldModifiers {
    /// Don't fail if the dependency cannot be resolved.
    pub optional: bool,
    /// Never inject the field.
    pub skip: bool,
    /// Only consider services whose type name ends with this value.
    pub name: Option<String>,
}

impl FromStr for FieldModifiers {
    type Err = InjectorError;

    /// Parses a modifier list, e.g. `optional,name=Primary`. Empty entries are ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut modifiers = FieldModifiers::default();
        for modifier in value.split(',').map(str::trim).filter(|m| !m.is_empty()) {
            match modifier.split_once('=') {
                Some((key, name)) if key.trim() == "name" => {
                    let name = name.trim().trim_matches('"');
                    if name.is_empty() {
                        return Err(InjectorError::Validation(
                            "empty name modifier".to_string(),
                        ));
                    }

                    modifiers.name = Some(name.to_string());
                }
                None if modifier == "optional" => modifiers.optional = true,
                None if modifier == "skip" => modifiers.skip = true,
                _ => {
                    return Err(InjectorError::Validation(format!(
                        "unrecognized field modifier: {modifier}"
                    )))
                }
            }
        }

        Ok(modifiers)
    }
}

/// A slot which can hold an injected dependency.
pub trait InjectedField: 'static {
    /// Capability requested for the slot.
    fn capability() -> CapabilityId;

    /// Checks if the slot can currently accept a value.
    fn is_assignable(&self) -> bool;

    /// Stores a resolved value, which should be a boxed `ServicePtr<Capability>`. Returns the value
    /// back if it's incompatible or the slot is not assignable.
    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}

impl<C: ?Sized + 'static> InjectedField for Option<ServicePtr<C>> {
    #[inline]
    fn capability() -> CapabilityId {
        CapabilityId::of::<C>()
    }

    #[inline]
    fn is_assignable(&self) -> bool {
        true
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self = Some(*value.downcast::<ServicePtr<C>>()?);
        Ok(())
    }
}

#[cfg(feature = "threadsafe")]
impl<C: ?Sized + 'static> InjectedField for OnceLock<ServicePtr<C>> {
    #[inline]
    fn capability() -> CapabilityId {
        CapabilityId::of::<C>()
    }

    #[inline]
    fn is_assignable(&self) -> bool {
        self.get().is_none()
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = *value.downcast::<ServicePtr<C>>()?;
        self.set(value)
            .map_err(|value| Box::new(value) as Box<dyn Any>)
    }
}

#[cfg(not(feature = "threadsafe"))]
impl<C: ?Sized + 'static> InjectedField for OnceCell<ServicePtr<C>> {
    #[inline]
    fn capability() -> CapabilityId {
        CapabilityId::of::<C>()
    }

    #[inline]
    fn is_assignable(&self) -> bool {
        self.get().is_none()
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = *value.downcast::<ServicePtr<C>>()?;
        self.set(value)
            .map_err(|value| Box::new(value) as Box<dyn Any>)
    }
}

impl InjectedField for Option<Injector> {
    #[inline]
    fn capability() -> CapabilityId {
        CapabilityId::of::<Injector>()
    }

    #[inline]
    fn is_assignable(&self) -> bool {
        true
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self = Some(*value.downcast::<Injector>()?);
        Ok(())
    }
}

trait FieldSlot<T> {
    fn capability(&self) -> CapabilityId;

    fn is_assignable(&self, target: &mut T) -> bool;

    fn assign(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}

struct FieldAccessor<T, F> {
    access: fn(&mut T) -> &mut F,
}

impl<T, F: InjectedField> FieldSlot<T> for FieldAccessor<T, F> {
    #[inline]
    fn capability(&self) -> CapabilityId {
        F::capability()
    }

    fn is_assignable(&self, target: &mut T) -> bool {
        (self.access)(target).is_assignable()
    }

    fn assign(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.access)(target).assign(value)
    }
}

/// Binding of a single field of `T` to the capability it requests.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct FieldBinding<T> {
    name: String,
    modifiers: FieldModifiers,
    embedded: bool,
    #[derivative(Debug = "ignore")]
    slot: Box<dyn FieldSlot<T>>,
}

impl<T: 'static> FieldBinding<T> {
    /// Creates a mandatory binding for the field returned by `access`.
    pub fn new<F: InjectedField>(name: impl Into<String>, access: fn(&mut T) -> &mut F) -> Self {
        Self {
            name: name.into(),
            modifiers: Default::default(),
            embedded: false,
            slot: Box::new(FieldAccessor { access }),
        }
    }

    /// Replaces all modifiers.
    pub fn with_modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the binding as optional.
    pub fn optional(mut self) -> Self {
        self.modifiers.optional = true;
        self
    }

    /// Marks the binding as skipped.
    pub fn skip(mut self) -> Self {
        self.modifiers.skip = true;
        self
    }

    /// Restricts resolution to services with type names ending with `name`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.modifiers.name = Some(name.into());
        self
    }

    /// Marks the binding as referring to an embedded (unnamed) member.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn modifiers(&self) -> &FieldModifiers {
        &self.modifiers
    }

    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    #[inline]
    pub fn capability(&self) -> CapabilityId {
        self.slot.capability()
    }

    pub(crate) fn is_assignable(&self, target: &mut T) -> bool {
        self.slot.is_assignable(target)
    }

    pub(crate) fn assign(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        self.slot.assign(target, value)
    }
}

/// Ordered list of [FieldBinding]s for a type.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Default(bound = ""))]
pub struct Bindings<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T: 'static> Bindings<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a binding.
    pub fn with(mut self, binding: FieldBinding<T>) -> Self {
        self.fields.push(binding);
        self
    }

    /// Shorthand for adding a mandatory [FieldBinding].
    pub fn field<F: InjectedField>(
        self,
        name: impl Into<String>,
        access: fn(&mut T) -> &mut F,
    ) -> Self {
        self.with(FieldBinding::new(name, access))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.fields.iter()
    }

    /// Checks that every binding has a unique, non-empty name.
    pub fn validate(&self) -> Result<(), InjectorError> {
        let mut names = FxHashSet::default();
        for binding in &self.fields {
            if binding.name.is_empty() {
                return Err(InjectorError::Validation(
                    "field binding without a name".to_string(),
                ));
            }

            if !names.insert(binding.name.as_str()) {
                return Err(InjectorError::Validation(format!(
                    "field '{}' is bound more than once",
                    binding.name
                )));
            }
        }

        Ok(())
    }
}
