//! Application framework based on the [ferrule_di] service container.
//!
//! Traditional applications start in the `main()` function and often explicitly initialize and pass
//! around various services. With a service container in place, services can be registered once
//! and wired together by the container. This, in turn, requires an entrypoint for the application
//! which runs the actual business logic and tears services down afterwards. This crate provides
//! such entrypoint in the form of [Application](application::Application), which also configures
//! additional supporting infrastructure, e.g. logging.
//!
//! ### Features
//!
//! * `threadsafe` - use threadsafe pointers and `Send + Sync` trait bounds

pub mod application;
pub mod config;
pub mod runner;
