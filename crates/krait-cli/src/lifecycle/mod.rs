//! Lifecycle management for the supervised `kraitd` runtime.
//!
//! This module is split into focused submodules so each concern remains
//! small and testable:
//! - [`types`] defines the command models and IO helpers.
//! - [`error`] captures the error surface exposed to the CLI.
//! - [`marker`] wraps the on-disk liveness marker.
//! - [`reactor`] selects the platform event-loop identifier.
//! - [`privileges`] validates reserved-port access.
//! - [`plugins`] resolves the application identifier from descriptors.
//! - [`launcher`] builds argument vectors and executes the runtime.
//! - [`signals`] delivers the graceful stop interrupt.
//! - [`controller`] implements the start/stop/restart flows.

mod controller;
mod error;
mod launcher;
mod marker;
mod plugins;
mod privileges;
mod reactor;
mod signals;
mod types;

pub(crate) use controller::SystemLifecycle;
pub(crate) use error::LifecycleError;
pub(crate) use privileges::current_user_is_privileged;
pub(crate) use types::{LifecycleContext, LifecycleInvocation, LifecycleOutput};
