//! High-level orchestration for runtime lifecycle commands.
//!
//! This module wires the start/stop/restart flows together using the
//! helpers in the sibling modules, ensuring the CLI drives a single
//! entrypoint when interacting with the supervised runtime.

use std::io::Write;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use krait_config::ApplicationPaths;

use super::error::LifecycleError;
use super::launcher::{
    LaunchOutcome, LaunchStrategy, ProcessLauncher, RuntimeLauncher, build_launch_plan,
};
use super::marker::{FileMarker, LivenessMarker};
use super::plugins::resolve_application_name;
use super::privileges::validate_port;
use super::signals::signal_runtime;
use super::types::{
    LifecycleCommand, LifecycleContext, LifecycleInvocation, LifecycleOutput, StartRequest,
};

/// Interval between liveness-marker checks while a restart waits for the
/// stopping runtime to clear its own marker.
const RESTART_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Distinguishes the operator-initiated start from the automatic
/// follow-up after the runtime reported a stale install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartAttempt {
    Initial,
    Retry,
}

/// Production lifecycle controller.
///
/// The marker and launcher are injected so tests can observe launch
/// attempts and simulate runtime outcomes without spawning processes.
pub(crate) struct SystemLifecycle<M, L> {
    pub(super) marker: M,
    pub(super) launcher: L,
}

impl SystemLifecycle<FileMarker, ProcessLauncher> {
    pub(crate) fn for_application(paths: &ApplicationPaths) -> Self {
        Self::new(FileMarker::new(paths.pid_path()), ProcessLauncher::new())
    }
}

impl<M: LivenessMarker, L: RuntimeLauncher> SystemLifecycle<M, L> {
    pub(crate) fn new(marker: M, launcher: L) -> Self {
        Self { marker, launcher }
    }

    pub(crate) fn handle<W: Write, E: Write>(
        &mut self,
        invocation: LifecycleInvocation,
        context: LifecycleContext<'_>,
        output: &mut LifecycleOutput<W, E>,
    ) -> Result<ExitCode, LifecycleError> {
        match invocation.command {
            LifecycleCommand::Start => self.start(invocation.request, context, output),
            LifecycleCommand::Stop => self.stop(output),
            LifecycleCommand::Restart => self.restart(invocation.request, context, output),
        }
    }

    pub(super) fn start<W: Write, E: Write>(
        &mut self,
        request: StartRequest,
        context: LifecycleContext<'_>,
        output: &mut LifecycleOutput<W, E>,
    ) -> Result<ExitCode, LifecycleError> {
        if self.marker.exists() {
            return Err(LifecycleError::AlreadyRunning {
                path: self.marker.path().to_path_buf(),
            });
        }
        // Reserved ports only exist on POSIX platforms; elsewhere the
        // validation is skipped deliberately.
        if context.platform.is_posix() {
            validate_port(context.config, context.privileged)?;
        }
        let application = resolve_application_name(context.paths.plugins_dir())?;
        let plan = build_launch_plan(context, request, &application);

        // Once the banner field is written the line stays open until a
        // marker terminates it, so every early return below must close
        // it first.
        let banner_open = plan.strategy == LaunchStrategy::SupervisedSpawn;
        if banner_open {
            output.status_field(format_args!("starting application {application}..."))?;
        }

        let mut attempt = StartAttempt::Initial;
        loop {
            let outcome = match self.launcher.launch(&plan) {
                Ok(outcome) => outcome,
                Err(error) => {
                    if banner_open {
                        output.status_marker(false)?;
                    }
                    return Err(error);
                }
            };
            match outcome {
                LaunchOutcome::Success { stdout } => {
                    output.status_marker(true)?;
                    let trimmed = stdout.trim_end();
                    if !trimmed.is_empty() {
                        output.stdout_line(format_args!("{trimmed}"))?;
                    }
                    return Ok(ExitCode::SUCCESS);
                }
                LaunchOutcome::AlreadyRunning if attempt == StartAttempt::Initial => {
                    // The runtime keeps a cached plugin registry; a stale
                    // entry makes the first launch report the application
                    // as already installed. One clean retry clears it,
                    // unless a live instance wrote its marker meanwhile.
                    if self.marker.exists() {
                        if banner_open {
                            output.status_marker(false)?;
                        }
                        return Err(LifecycleError::AlreadyRunning {
                            path: self.marker.path().to_path_buf(),
                        });
                    }
                    attempt = StartAttempt::Retry;
                }
                LaunchOutcome::AlreadyRunning => {
                    output.status_marker(false)?;
                    return Err(LifecycleError::LaunchFailed {
                        detail: String::from(
                            "runtime still reports the application as already installed after one retry",
                        ),
                    });
                }
                LaunchOutcome::Failure { detail } => {
                    output.status_marker(false)?;
                    let trimmed = detail.trim_end();
                    if !trimmed.is_empty() {
                        output.stderr_line(format_args!("{trimmed}"))?;
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    pub(super) fn stop<W: Write, E: Write>(
        &mut self,
        output: &mut LifecycleOutput<W, E>,
    ) -> Result<ExitCode, LifecycleError> {
        if !self.marker.exists() {
            return Err(LifecycleError::NotRunning {
                path: self.marker.path().to_path_buf(),
            });
        }
        let pid = self.marker.read()?;
        output.status_field(format_args!("killing process id {pid} with SIGINT signal"))?;
        // Success is reported on signal delivery alone; whether the
        // runtime actually exits (and clears its marker) is not tracked
        // here.
        match signal_runtime(pid) {
            Ok(()) => {
                output.status_marker(true)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                output.status_marker(false)?;
                Err(error)
            }
        }
    }

    pub(super) fn restart<W: Write, E: Write>(
        &mut self,
        request: StartRequest,
        context: LifecycleContext<'_>,
        output: &mut LifecycleOutput<W, E>,
    ) -> Result<ExitCode, LifecycleError> {
        self.stop(output)?;
        self.wait_for_marker_removal();
        self.start(request, context, output)
    }

    /// Blocks until the stopping runtime removes its own marker.
    ///
    /// Deliberately unbounded: the stop signal has already been
    /// delivered, and an operator can interrupt the command if the
    /// runtime hangs instead of exiting.
    fn wait_for_marker_removal(&self) {
        while self.marker.exists() {
            thread::sleep(RESTART_POLL_INTERVAL);
        }
    }
}
