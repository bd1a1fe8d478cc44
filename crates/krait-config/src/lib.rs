//! Shared configuration and host-environment detection for the Krait
//! admin tooling.
//!
//! The admin binary operates from inside an application root directory.
//! This crate owns the pieces both the lifecycle controller and future
//! tooling need to agree on: the application configuration file format,
//! the layout of runtime artefacts relative to the root, and the
//! host-environment facts (platform family, managed-hosting detection)
//! that are resolved once per invocation and injected downstream.

mod application;
mod host;
mod paths;

pub use application::{ApplicationConfig, ConfigError};
pub use host::{HostingContext, Platform};
pub use paths::ApplicationPaths;
