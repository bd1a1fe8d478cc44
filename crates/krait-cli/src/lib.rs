//! Command-line runtime for the Krait admin tool.
//!
//! The module owns argument parsing, configuration bootstrapping, and
//! dispatch into the lifecycle controller. Host facts (platform family,
//! managed hosting, user privilege) are resolved once here and injected
//! downstream so the controller stays deterministic under test.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use krait_config::{ApplicationPaths, ConfigError, HostingContext, Platform};
use thiserror::Error;

mod config;
mod lifecycle;

pub(crate) use config::{ConfigLoader, JsonConfigLoader};
use lifecycle::{
    LifecycleContext, LifecycleError, LifecycleInvocation, LifecycleOutput, SystemLifecycle,
    current_user_is_privileged,
};

/// Host facts resolved once per invocation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Host {
    pub(crate) platform: Platform,
    pub(crate) hosting: HostingContext,
    pub(crate) privileged: bool,
}

impl Host {
    fn detect() -> Self {
        Self {
            platform: Platform::detect(),
            hosting: HostingContext::detect(),
            privileged: current_user_is_privileged(),
        }
    }
}

/// Runs the admin CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_usage(&error, stdout, stderr),
    };
    // The admin tool operates on the application rooted at the current
    // working directory, mirroring where the runtime drops its marker.
    let paths = ApplicationPaths::from_root(".");
    run_command(&cli, Host::detect(), &paths, &JsonConfigLoader, stdout, stderr)
}

pub(crate) fn run_command<W, E, L>(
    cli: &Cli,
    host: Host,
    paths: &ApplicationPaths,
    loader: &L,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let result = loader
        .load(paths)
        .map_err(AppError::from)
        .and_then(|config| {
            let context = LifecycleContext {
                config: &config,
                paths,
                platform: host.platform,
                hosting: host.hosting,
                privileged: host.privileged,
                runtime_binary: None,
            };
            let invocation = LifecycleInvocation::from(cli.command);
            let mut lifecycle = SystemLifecycle::for_application(paths);
            let mut output = LifecycleOutput::new(&mut *stdout, &mut *stderr);
            lifecycle
                .handle(invocation, context, &mut output)
                .map_err(AppError::from)
        });
    match result {
        Ok(exit_code) => exit_code,
        Err(error) => {
            let _ = writeln!(stderr, "error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn report_usage<W, E>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    W: Write,
    E: Write,
{
    let rendered = error.render();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{rendered}");
            ExitCode::SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{rendered}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "krait-admin",
    version,
    about = "Administration tool for krait applications"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: AdminCommand,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub(crate) enum AdminCommand {
    /// Starts the application runtime (run from the application root).
    Start {
        /// Overrides the port configured in config/application.json.
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Stops the running application.
    Stop,
    /// Stops the application, waits for its marker to clear, and starts
    /// it again.
    Restart,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    LoadConfiguration(#[from] ConfigError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
