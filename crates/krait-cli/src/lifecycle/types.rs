//! Lifecycle command types and output abstractions.
//!
//! Defines the payloads and IO wrappers shared across lifecycle commands
//! so the controller can remain agnostic of concrete writers.

use std::ffi::OsStr;
use std::fmt;
use std::io::Write;

use krait_config::{ApplicationConfig, ApplicationPaths, HostingContext, Platform};

use super::LifecycleError;
use crate::AdminCommand;

/// Supported lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleCommand {
    Start,
    Stop,
    Restart,
}

/// Start parameters forwarded from the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StartRequest {
    /// Port passed with `start --port`, overriding the configured one.
    pub(crate) port_override: Option<u16>,
}

/// Invocation payload forwarded from the CLI runtime.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LifecycleInvocation {
    pub(crate) command: LifecycleCommand,
    pub(crate) request: StartRequest,
}

impl From<AdminCommand> for LifecycleInvocation {
    fn from(command: AdminCommand) -> Self {
        match command {
            AdminCommand::Start { port } => Self {
                command: LifecycleCommand::Start,
                request: StartRequest {
                    port_override: port,
                },
            },
            AdminCommand::Stop => Self {
                command: LifecycleCommand::Stop,
                request: StartRequest::default(),
            },
            AdminCommand::Restart => Self {
                command: LifecycleCommand::Restart,
                request: StartRequest::default(),
            },
        }
    }
}

/// Shared context available to lifecycle handlers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LifecycleContext<'a> {
    pub(crate) config: &'a ApplicationConfig,
    pub(crate) paths: &'a ApplicationPaths,
    pub(crate) platform: Platform,
    pub(crate) hosting: HostingContext,
    pub(crate) privileged: bool,
    /// Test override for the runtime binary; production resolves it from
    /// `KRAITD_BIN` or the default name.
    pub(crate) runtime_binary: Option<&'a OsStr>,
}

/// Width of the command status field. The inline `[Ok]`/`[Fail]` marker
/// lands in a fixed column so sequential commands line up.
const STATUS_FIELD_WIDTH: usize = 73;

/// Output handle abstracting over stdout/stderr writers.
pub(crate) struct LifecycleOutput<W: Write, E: Write> {
    stdout: W,
    stderr: E,
}

impl<W: Write, E: Write> LifecycleOutput<W, E> {
    pub(crate) fn new(stdout: W, stderr: E) -> Self {
        Self { stdout, stderr }
    }

    pub(crate) fn stdout_line(&mut self, args: fmt::Arguments<'_>) -> Result<(), LifecycleError> {
        self.stdout.write_fmt(args).map_err(LifecycleError::Io)?;
        self.stdout.write_all(b"\n").map_err(LifecycleError::Io)?;
        self.stdout.flush().map_err(LifecycleError::Io)
    }

    pub(crate) fn stderr_line(&mut self, args: fmt::Arguments<'_>) -> Result<(), LifecycleError> {
        self.stderr.write_fmt(args).map_err(LifecycleError::Io)?;
        self.stderr.write_all(b"\n").map_err(LifecycleError::Io)?;
        self.stderr.flush().map_err(LifecycleError::Io)
    }

    /// Writes a padded status field without a trailing newline so the
    /// matching [`Self::status_marker`] completes the line.
    pub(crate) fn status_field(&mut self, args: fmt::Arguments<'_>) -> Result<(), LifecycleError> {
        let field = args.to_string();
        write!(self.stdout, "{field:<width$}", width = STATUS_FIELD_WIDTH)
            .map_err(LifecycleError::Io)?;
        self.stdout.flush().map_err(LifecycleError::Io)
    }

    /// Completes a status field with an inline `[Ok]`/`[Fail]` marker.
    pub(crate) fn status_marker(&mut self, ok: bool) -> Result<(), LifecycleError> {
        let marker = if ok { "[Ok]" } else { "[Fail]" };
        self.stdout
            .write_all(marker.as_bytes())
            .map_err(LifecycleError::Io)?;
        self.stdout.write_all(b"\n").map_err(LifecycleError::Io)?;
        self.stdout.flush().map_err(LifecycleError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_command_carries_port_override() {
        let invocation = LifecycleInvocation::from(AdminCommand::Start { port: Some(9001) });
        assert_eq!(invocation.command, LifecycleCommand::Start);
        assert_eq!(invocation.request.port_override, Some(9001));
    }

    #[test]
    fn stop_and_restart_carry_no_override() {
        let stop = LifecycleInvocation::from(AdminCommand::Stop);
        assert_eq!(stop.command, LifecycleCommand::Stop);
        assert_eq!(stop.request, StartRequest::default());
        let restart = LifecycleInvocation::from(AdminCommand::Restart);
        assert_eq!(restart.command, LifecycleCommand::Restart);
    }

    #[test]
    fn status_marker_lands_in_fixed_column() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut output = LifecycleOutput::new(&mut stdout, &mut stderr);
        output
            .status_field(format_args!("starting application blog..."))
            .expect("field write");
        output.status_marker(true).expect("marker write");
        let text = String::from_utf8(stdout).expect("utf-8 output");
        assert_eq!(text.find("[Ok]"), Some(STATUS_FIELD_WIDTH));
        assert!(text.ends_with("[Ok]\n"));
    }
}
