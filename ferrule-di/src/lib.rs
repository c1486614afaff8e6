//! A runtime service container. Services are registered in an [Injector](injector::Injector) along
//! with the [capabilities](capability) they satisfy; the container then resolves those
//! capabilities for struct fields ([binding]), function parameters ([invoke]) and direct lookups
//! ([resolver]), and drives service [lifecycle hooks](service).
//!
//! ### Features
//!
//! * `threadsafe` (default) - use `Arc` and require `Send + Sync` from services
//! * `derive` (default) - enable `#[derive(Injectable)]`, `#[derive(Service)]`, `#[capability]`
//! and `#[provides]`

pub mod binding;
pub mod capability;
pub mod error;
mod injection;
pub mod injector;
pub mod invoke;
pub mod registry;
pub mod resolver;
pub mod service;

#[cfg(feature = "derive")]
pub use ferrule_di_derive::{capability, provides, Injectable, Service};
